// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoder for CAT-TP (Card Application Toolkit Transport Protocol)
//! segments, as carried over TCP or UDP in SIM/smart-card signaling.
//!
//! CAT-TP has no reserved port, so a capture pipeline cannot identify
//! it from the transport header alone. [`classify`] is the cheap,
//! bounds-safe structural gate used for that protocol guess;
//! [`decode`] is the full decoder, producing a validated [`Segment`]
//! or a [`DecodeError`]. Both are pure functions over a single buffer
//! and keep no state across calls, so concurrent use over independent
//! buffers needs no coordination.
//!
//! Checksum verification, connection tracking, and encoding are out of
//! scope; the checksum field is surfaced as-is.

#![deny(unreachable_patterns)]
#![deny(unused_must_use)]

pub mod flags;
pub mod header;
pub mod segment;
pub mod variable;

pub use flags::CattpFlags;
pub use header::CattpHdr;
pub use header::CattpMeta;
pub use segment::DecodeError;
pub use segment::Segment;
pub use segment::classify;
pub use segment::decode;
pub use segment::summarize;
pub use variable::ResetReason;
pub use variable::VariableArea;
