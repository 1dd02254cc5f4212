// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Whole-segment decoding: the heuristic gate, assembly of the fixed
//! header, variable area and payload into one validated record, and
//! the one-line summary.

use crate::header::CattpHdr;
use crate::variable::VariableArea;
use core::fmt;
use core::fmt::Display;
use thiserror::Error;

/// Ways a buffer can fail to decode as a CAT-TP segment.
///
/// Every variant is a recoverable, per-buffer result. A failure here
/// means "malformed/not decodable", which callers should keep distinct
/// from [`classify`] returning `false` ("not this protocol").
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum DecodeError {
    /// Fewer bytes than the 18-byte fixed header.
    #[error("{available} bytes is too short for the fixed header")]
    TooShort { available: usize },

    /// The declared header length is below the fixed-header minimum.
    #[error("declared header length {hdr_len} is below the 18 byte minimum")]
    InvalidHeaderLength { hdr_len: u8 },

    /// The declared lengths do not add up to the buffer length.
    #[error(
        "header length {hdr_len} + data length {data_len} \
         != buffer length {buf_len}"
    )]
    LengthMismatch { hdr_len: u8, data_len: u16, buf_len: usize },

    /// The flag-selected variable-area shape needs more bytes than the
    /// header carries.
    #[error("variable area needs {needed} bytes, only {available} present")]
    TruncatedVariableArea { needed: usize, available: usize },

    /// The payload extends past the end of the buffer.
    #[error("payload ends at byte {needed} of a {available} byte buffer")]
    TruncatedPayload { needed: usize, available: usize },
}

/// Heuristic gate: does `bytes` plausibly hold a CAT-TP segment?
///
/// CAT-TP entities pick their own ports, so transport demultiplexers
/// have to guess the protocol from structure alone. The checks are
/// staged so that no read happens before the length that makes it safe
/// has been verified: minimum fixed-header length first, then the
/// declared header length, then the combined-length equation.
///
/// A `true` here is a cheap structural guess, not a promise that
/// [`decode`] will succeed; any structural problem collapses to
/// `false`.
pub fn classify(bytes: &[u8]) -> bool {
    if bytes.len() < CattpHdr::SIZE {
        return false;
    }

    let hdr_len = usize::from(bytes[3]);
    if hdr_len < CattpHdr::SIZE {
        return false;
    }

    let data_len = usize::from(u16::from_be_bytes([bytes[8], bytes[9]]));
    hdr_len + data_len == bytes.len()
}

/// A fully decoded CAT-TP segment.
///
/// Immutable once built; the variable area and payload borrow from the
/// input buffer. Construction goes through [`decode`], the only place
/// the length invariants (`hdr_len >= 18` and `hdr_len + data_len ==
/// buffer length`) are enforced.
#[derive(Debug)]
pub struct Segment<'a> {
    hdr: CattpHdr<'a>,
    variable: VariableArea<'a>,
    payload: &'a [u8],
}

impl<'a> Segment<'a> {
    pub fn header(&self) -> &CattpHdr<'a> {
        &self.hdr
    }

    pub fn variable_area(&self) -> &VariableArea<'a> {
        &self.variable
    }

    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }
}

/// Decode one CAT-TP segment from `bytes`.
///
/// The buffer must hold exactly one segment: the declared header and
/// data lengths have to account for every byte.
pub fn decode(bytes: &[u8]) -> Result<Segment<'_>, DecodeError> {
    let hdr = CattpHdr::parse(bytes)?;

    let hdr_len = hdr.hdr_len();
    if hdr_len < CattpHdr::SIZE {
        return Err(DecodeError::InvalidHeaderLength {
            hdr_len: hdr_len as u8,
        });
    }

    let data_len = usize::from(hdr.data_len());
    if hdr_len + data_len != bytes.len() {
        return Err(DecodeError::LengthMismatch {
            hdr_len: hdr_len as u8,
            data_len: hdr.data_len(),
            buf_len: bytes.len(),
        });
    }

    let variable = VariableArea::decode(hdr.flags(), hdr_len, bytes)?;

    // Implied by the length equation above, but the payload slice must
    // never be able to leave the buffer on its own.
    let payload = bytes.get(hdr_len..hdr_len + data_len).ok_or(
        DecodeError::TruncatedPayload {
            needed: hdr_len + data_len,
            available: bytes.len(),
        },
    )?;

    Ok(Segment { hdr, variable, payload })
}

impl Display for Segment<'_> {
    /// The classic info-column line, e.g.
    /// `1➞2 [SYN] Seq=0 Ack=0 Win=0 Len=0`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}➞{} [{}] Seq={} Ack={} Win={} Len={}",
            self.hdr.src_port(),
            self.hdr.dst_port(),
            self.hdr.flags(),
            self.hdr.seq(),
            self.hdr.ack(),
            self.hdr.window_size(),
            self.hdr.data_len(),
        )
    }
}

/// One-line human-readable description of a decoded segment.
pub fn summarize(segment: &Segment) -> String {
    segment.to_string()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn classify_short_buffers() {
        for len in 0..CattpHdr::SIZE {
            let bytes = vec![0xFFu8; len];
            assert!(!classify(&bytes));
        }
    }

    #[test]
    fn classify_bad_hdr_len() {
        let mut bytes = [0u8; 18];
        bytes[3] = 0x11;
        assert!(!classify(&bytes));
    }

    #[test]
    fn classify_length_equation() {
        let mut bytes = vec![0u8; 22];
        bytes[3] = 0x12;
        bytes[9] = 0x04;
        assert!(classify(&bytes));

        // One byte short of the declared extent.
        bytes.pop();
        assert!(!classify(&bytes));
    }

    #[test]
    fn decode_short_buffers() {
        for len in 0..CattpHdr::SIZE {
            let bytes = vec![0xFFu8; len];
            assert_eq!(
                decode(&bytes).unwrap_err(),
                DecodeError::TooShort { available: len },
            );
        }
    }

    #[test]
    fn decode_invalid_hdr_len() {
        let mut bytes = [0u8; 18];
        bytes[3] = 0x05;
        assert_eq!(
            decode(&bytes).unwrap_err(),
            DecodeError::InvalidHeaderLength { hdr_len: 5 },
        );
    }

    #[test]
    fn decode_length_mismatch() {
        // Declared hdr_len 22, actual buffer 20 bytes.
        let mut bytes = vec![0u8; 20];
        bytes[0] = 0x80;
        bytes[3] = 0x16;
        assert_eq!(
            decode(&bytes).unwrap_err(),
            DecodeError::LengthMismatch {
                hdr_len: 22,
                data_len: 0,
                buf_len: 20
            },
        );
        assert!(!classify(&bytes));
    }

    #[test]
    fn segment_invariant_holds() {
        let mut bytes = vec![0u8; 25];
        bytes[3] = 0x12;
        bytes[9] = 0x07;
        let seg = decode(&bytes).unwrap();
        assert_eq!(
            seg.header().hdr_len() + seg.payload().len(),
            bytes.len()
        );
    }

    #[test]
    fn error_display_is_useful() {
        let err = DecodeError::LengthMismatch {
            hdr_len: 22,
            data_len: 0,
            buf_len: 20,
        };
        let msg = err.to_string();
        assert!(msg.contains("22"));
        assert!(msg.contains("20"));
    }
}
