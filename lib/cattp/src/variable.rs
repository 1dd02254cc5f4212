// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The flag-dependent variable area of the CAT-TP header.
//!
//! Bytes `[18, hdr_len)` of a segment take one of a few shapes: SYN
//! segments carry the negotiated PDU/SDU sizes, EACK segments carry a
//! list of out-of-sequence acknowledgement numbers, RST segments carry
//! a one-byte reset reason. Anything else is kept as opaque bytes so
//! future flag combinations still round through the decoder.

use crate::flags::CattpFlags;
use crate::header::CattpHdr;
use crate::segment::DecodeError;
use core::fmt;
use core::fmt::Display;
use serde::Deserialize;
use serde::Serialize;

/// Why a connection was reset, from the one-byte RST variable area.
///
/// Codes 0 through 6 are assigned; anything else decodes as
/// [`ResetReason::Unknown`] rather than failing, so a capture of a
/// newer peer still dissects.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ResetReason {
    NormalEnding,
    IllegalParameters,
    TemporarilyUnavailable,
    PortUnavailable,
    UnexpectedPdu,
    MaxRetriesExceeded,
    VersionNotSupported,
    Unknown(u8),
}

impl From<u8> for ResetReason {
    fn from(code: u8) -> Self {
        match code {
            0 => Self::NormalEnding,
            1 => Self::IllegalParameters,
            2 => Self::TemporarilyUnavailable,
            3 => Self::PortUnavailable,
            4 => Self::UnexpectedPdu,
            5 => Self::MaxRetriesExceeded,
            6 => Self::VersionNotSupported,
            code => Self::Unknown(code),
        }
    }
}

impl ResetReason {
    /// The wire code for this reason.
    pub fn code(self) -> u8 {
        match self {
            Self::NormalEnding => 0,
            Self::IllegalParameters => 1,
            Self::TemporarilyUnavailable => 2,
            Self::PortUnavailable => 3,
            Self::UnexpectedPdu => 4,
            Self::MaxRetriesExceeded => 5,
            Self::VersionNotSupported => 6,
            Self::Unknown(code) => code,
        }
    }
}

impl Display for ResetReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NormalEnding => write!(f, "Normal ending"),
            Self::IllegalParameters => {
                write!(f, "Connection set-up failure, illegal parameters")
            }
            Self::TemporarilyUnavailable => {
                write!(f, "Temporarily unable to establish a connection")
            }
            Self::PortUnavailable => write!(f, "Requested port not available"),
            Self::UnexpectedPdu => write!(f, "Unexpected PDU received"),
            Self::MaxRetriesExceeded => write!(f, "Maximum retries exceeded"),
            Self::VersionNotSupported => write!(f, "Version not supported"),
            Self::Unknown(code) => write!(f, "Unknown reason ({code})"),
        }
    }
}

/// Which shape the variable area takes for a given flag combination.
///
/// The protocol does not combine SYN, EACK and RST, but a decoder
/// still has to pick exactly one interpretation when a peer sets more
/// than one of them. The declared priority is SYN over EACK over RST;
/// any other combination leaves the area opaque.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Shape {
    Syn,
    Eack,
    Rst,
    Opaque,
}

impl Shape {
    fn select(flags: CattpFlags) -> Self {
        if flags.contains(CattpFlags::SYN) {
            Self::Syn
        } else if flags.contains(CattpFlags::EACK) {
            Self::Eack
        } else if flags.contains(CattpFlags::RST) {
            Self::Rst
        } else {
            Self::Opaque
        }
    }
}

/// The decoded variable area.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum VariableArea<'a> {
    /// `hdr_len == 18`, no variable area on the wire.
    None,

    /// SYN: the PDU/SDU sizes negotiated at connection setup.
    SynParams { max_pdu: u16, max_sdu: u16 },

    /// EACK: out-of-sequence acknowledgement numbers, in wire order.
    EackList(Vec<u16>),

    /// RST: the reason the connection was torn down.
    RstInfo(ResetReason),

    /// A variable area present without any shape-selecting flag.
    /// Preserved uninterpreted.
    Opaque(&'a [u8]),
}

impl<'a> VariableArea<'a> {
    /// Decode `src[18..hdr_len]` according to `flags`.
    ///
    /// `hdr_len` comes off the wire, so it is validated against the
    /// real buffer length here; callers must not assume it is in
    /// bounds.
    pub fn decode(
        flags: CattpFlags,
        hdr_len: usize,
        src: &'a [u8],
    ) -> Result<Self, DecodeError> {
        if hdr_len == CattpHdr::SIZE {
            return Ok(Self::None);
        }

        let area = src.get(CattpHdr::SIZE..hdr_len).ok_or(
            DecodeError::TruncatedVariableArea {
                needed: hdr_len.saturating_sub(CattpHdr::SIZE),
                available: src.len().saturating_sub(CattpHdr::SIZE),
            },
        )?;

        match Shape::select(flags) {
            Shape::Syn => {
                if area.len() < 4 {
                    return Err(DecodeError::TruncatedVariableArea {
                        needed: 4,
                        available: area.len(),
                    });
                }
                Ok(Self::SynParams {
                    max_pdu: u16::from_be_bytes([area[0], area[1]]),
                    max_sdu: u16::from_be_bytes([area[2], area[3]]),
                })
            }

            Shape::Eack => {
                if area.len() % 2 != 0 {
                    // An odd area means the last acknowledgement
                    // number is cut in half.
                    return Err(DecodeError::TruncatedVariableArea {
                        needed: area.len() + 1,
                        available: area.len(),
                    });
                }
                let numbers = area
                    .chunks_exact(2)
                    .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                    .collect();
                Ok(Self::EackList(numbers))
            }

            // The slice above is non-empty whenever hdr_len > 18.
            Shape::Rst => Ok(Self::RstInfo(ResetReason::from(area[0]))),

            Shape::Opaque => Ok(Self::Opaque(area)),
        }
    }
}
