// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The CAT-TP fixed header.
//!
//! Eighteen bytes at the front of every segment; all multi-byte fields
//! are big-endian. The declared header length covers the fixed part
//! plus the flag-dependent variable area, and is only sanity-checked
//! here for presence. Whether it is consistent with the rest of the
//! buffer is judged during segment assembly, which has the full
//! segment in hand.

use crate::flags::CATTP_VERSION_MASK;
use crate::flags::CattpFlags;
use crate::segment::DecodeError;
use core::mem;
use serde::Deserialize;
use serde::Serialize;
use zerocopy::FromBytes;
use zerocopy::Immutable;
use zerocopy::IntoBytes;
use zerocopy::KnownLayout;
use zerocopy::Ref;
use zerocopy::Unaligned;

/// Note: For now we keep this unaligned to be safe.
#[repr(C)]
#[derive(
    Clone, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned,
)]
pub struct CattpHdrRaw {
    pub flags_vsn: u8,
    pub reserved: [u8; 2],
    pub hdr_len: u8,
    pub src_port: [u8; 2],
    pub dst_port: [u8; 2],
    pub data_len: [u8; 2],
    pub seq_nb: [u8; 2],
    pub ack_nb: [u8; 2],
    pub win_size: [u8; 2],
    pub csum: [u8; 2],
}

impl CattpHdrRaw {
    pub const SIZE: usize = mem::size_of::<Self>();
}

/// A validated view over the fixed header at the front of a buffer.
#[derive(Debug)]
pub struct CattpHdr<'a> {
    base: Ref<&'a [u8], CattpHdrRaw>,
}

impl<'a> CattpHdr<'a> {
    pub const SIZE: usize = CattpHdrRaw::SIZE;

    /// Parse the fixed header off the front of `src`.
    pub fn parse(src: &'a [u8]) -> Result<Self, DecodeError> {
        let (base, _rest) = Ref::<_, CattpHdrRaw>::from_prefix(src)
            .map_err(|_| DecodeError::TooShort { available: src.len() })?;
        Ok(Self { base })
    }

    /// The raw bytes of the fixed header.
    pub fn bytes(&self) -> &[u8] {
        self.base.as_bytes()
    }

    pub fn version(&self) -> u8 {
        self.base.flags_vsn & CATTP_VERSION_MASK
    }

    pub fn flags(&self) -> CattpFlags {
        CattpFlags::from_byte(self.base.flags_vsn)
    }

    /// Declared header length in bytes, fixed part included.
    pub fn hdr_len(&self) -> usize {
        usize::from(self.base.hdr_len)
    }

    pub fn src_port(&self) -> u16 {
        u16::from_be_bytes(self.base.src_port)
    }

    pub fn dst_port(&self) -> u16 {
        u16::from_be_bytes(self.base.dst_port)
    }

    /// Payload length in bytes. Excludes the header.
    pub fn data_len(&self) -> u16 {
        u16::from_be_bytes(self.base.data_len)
    }

    pub fn seq(&self) -> u16 {
        u16::from_be_bytes(self.base.seq_nb)
    }

    pub fn ack(&self) -> u16 {
        u16::from_be_bytes(self.base.ack_nb)
    }

    pub fn window_size(&self) -> u16 {
        u16::from_be_bytes(self.base.win_size)
    }

    /// The checksum as carried on the wire. Surfaced, never verified.
    pub fn csum(&self) -> u16 {
        u16::from_be_bytes(self.base.csum)
    }
}

/// Owned snapshot of the fixed header fields, decoded to host order.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CattpMeta {
    pub version: u8,
    pub flags: CattpFlags,
    pub hdr_len: u8,
    pub src_port: u16,
    pub dst_port: u16,
    pub data_len: u16,
    pub seq: u16,
    pub ack: u16,
    pub window_size: u16,
    pub csum: u16,
}

impl From<&CattpHdr<'_>> for CattpMeta {
    fn from(hdr: &CattpHdr) -> Self {
        CattpMeta {
            version: hdr.version(),
            flags: hdr.flags(),
            hdr_len: hdr.base.hdr_len,
            src_port: hdr.src_port(),
            dst_port: hdr.dst_port(),
            data_len: hdr.data_len(),
            seq: hdr.seq(),
            ack: hdr.ack(),
            window_size: hdr.window_size(),
            csum: hdr.csum(),
        }
    }
}
