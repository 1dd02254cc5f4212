// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CAT-TP header flags.

use bitflags::bitflags;
use core::fmt;
use core::fmt::Display;
use serde::Deserialize;
use serde::Serialize;

/// Mask of the flag bits within byte 0 of the fixed header.
pub const CATTP_FLAGS_MASK: u8 = 0xFC;

/// Mask of the protocol version bits within byte 0.
pub const CATTP_VERSION_MASK: u8 = 0x03;

bitflags! {
    /// The six CAT-TP header flags, bits 7-2 of byte 0.
    #[derive(
        Clone,
        Copy,
        Debug,
        Deserialize,
        Eq,
        Hash,
        Ord,
        PartialEq,
        PartialOrd,
        Serialize,
    )]
    #[serde(transparent)]
    pub struct CattpFlags: u8 {
        const SYN = 0x80;
        const ACK = 0x40;
        const EACK = 0x20;
        const RST = 0x10;
        const NUL = 0x08;
        const SEG = 0x04;
    }
}

/// Presentation order of the flag labels. Fixed regardless of which
/// bits are set, so summaries are deterministic.
const FLAG_LABELS: [(CattpFlags, &str); 6] = [
    (CattpFlags::SYN, "SYN"),
    (CattpFlags::ACK, "ACK"),
    (CattpFlags::EACK, "EACK"),
    (CattpFlags::RST, "RST"),
    (CattpFlags::NUL, "NUL"),
    (CattpFlags::SEG, "SEG"),
];

impl CattpFlags {
    /// Decode byte 0 of the fixed header. The version bits (1-0) are
    /// not flags and are dropped here.
    pub fn from_byte(byte0: u8) -> Self {
        Self::from_bits_truncate(byte0)
    }
}

impl Display for CattpFlags {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("NONE");
        }

        let mut sep = "";
        for (flag, label) in FLAG_LABELS {
            if self.contains(flag) {
                write!(f, "{sep}{label}")?;
                sep = ", ";
            }
        }

        Ok(())
    }
}
