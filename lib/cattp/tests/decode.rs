// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Whole-segment decoding against captured wire fixtures.

use cattp::CattpFlags;
use cattp::CattpMeta;
use cattp::DecodeError;
use cattp::ResetReason;
use cattp::VariableArea;
use cattp::classify;
use cattp::decode;
use cattp::summarize;

#[test]
fn syn_segment() {
    #[rustfmt::skip]
    let bytes = [
        // flags (SYN) + version
        0x80,
        // reserved
        0x00, 0x00,
        // header len
        0x16,
        // source port + dest port
        0x00, 0x01, 0x00, 0x02,
        // data len
        0x00, 0x00,
        // seq + ack
        0x00, 0x00, 0x00, 0x00,
        // window
        0x00, 0x00,
        // checksum
        0x00, 0x00,
        // max PDU size + max SDU size
        0x05, 0x78, 0x02, 0x00,
    ];

    assert!(classify(&bytes));

    let seg = decode(&bytes).unwrap();
    let hdr = seg.header();
    assert_eq!(hdr.flags(), CattpFlags::SYN);
    assert_eq!(hdr.hdr_len(), 22);
    assert_eq!(hdr.src_port(), 1);
    assert_eq!(hdr.dst_port(), 2);
    assert_eq!(hdr.data_len(), 0);
    assert_eq!(
        *seg.variable_area(),
        VariableArea::SynParams { max_pdu: 1400, max_sdu: 512 },
    );
    assert!(seg.payload().is_empty());

    assert_eq!(summarize(&seg), "1➞2 [SYN] Seq=0 Ack=0 Win=0 Len=0");
}

#[test]
fn eack_segment() {
    #[rustfmt::skip]
    let bytes = [
        // flags (EACK) + version
        0x20,
        // reserved
        0x00, 0x00,
        // header len
        0x16,
        // source port + dest port
        0x00, 0x05, 0x00, 0x06,
        // data len
        0x00, 0x00,
        // seq + ack
        0x00, 0x00, 0x00, 0x00,
        // window
        0x00, 0x00,
        // checksum
        0x00, 0x00,
        // acknowledged sequence numbers
        0x00, 0x05, 0x00, 0x0A,
    ];

    assert!(classify(&bytes));

    let seg = decode(&bytes).unwrap();
    assert_eq!(*seg.variable_area(), VariableArea::EackList(vec![5, 10]));
}

#[test]
fn nul_data_segment() {
    #[rustfmt::skip]
    let bytes = [
        // flags (NUL) + version
        0x08,
        // reserved
        0x00, 0x00,
        // header len
        0x12,
        // source port + dest port
        0x00, 0x01, 0x00, 0x02,
        // data len
        0x00, 0x03,
        // seq + ack
        0x00, 0x00, 0x00, 0x00,
        // window
        0x00, 0x00,
        // checksum
        0x00, 0x00,
        // payload
        0x41, 0x42, 0x43,
    ];

    assert!(classify(&bytes));

    let seg = decode(&bytes).unwrap();
    assert_eq!(*seg.variable_area(), VariableArea::None);
    assert_eq!(seg.payload(), b"ABC");

    assert_eq!(summarize(&seg), "1➞2 [NUL] Seq=0 Ack=0 Win=0 Len=3");
}

#[test]
fn rst_segment() {
    #[rustfmt::skip]
    let bytes = [
        // flags (RST) + version
        0x10,
        // reserved
        0x00, 0x00,
        // header len
        0x13,
        // source port + dest port
        0x00, 0x01, 0x00, 0x02,
        // data len
        0x00, 0x00,
        // seq + ack
        0x00, 0x00, 0x00, 0x00,
        // window
        0x00, 0x00,
        // checksum
        0x00, 0x00,
        // reason code
        0x03,
    ];

    assert!(classify(&bytes));

    let seg = decode(&bytes).unwrap();
    assert_eq!(
        *seg.variable_area(),
        VariableArea::RstInfo(ResetReason::PortUnavailable),
    );
}

#[test]
fn truncated_syn_segment() {
    // Declared header length 22, but the capture only holds 20 bytes.
    let mut bytes = vec![0u8; 20];
    bytes[0] = 0x80;
    bytes[3] = 0x16;

    assert!(!classify(&bytes));
    assert_eq!(
        decode(&bytes).unwrap_err(),
        DecodeError::LengthMismatch { hdr_len: 22, data_len: 0, buf_len: 20 },
    );
}

#[test]
fn undersized_header_length() {
    let mut bytes = [0u8; 18];
    bytes[3] = 0x05;

    assert!(!classify(&bytes));
    assert_eq!(
        decode(&bytes).unwrap_err(),
        DecodeError::InvalidHeaderLength { hdr_len: 5 },
    );
}

#[test]
fn meta_serde_round_trip() {
    let mut bytes = [0u8; 18];
    bytes[0] = 0x42;
    bytes[3] = 0x12;
    bytes[5] = 0x07;

    let seg = decode(&bytes).unwrap();
    let meta = CattpMeta::from(seg.header());

    let json = serde_json::to_string(&meta).unwrap();
    let back: CattpMeta = serde_json::from_str(&json).unwrap();
    assert_eq!(meta, back);
    assert_eq!(back.flags, CattpFlags::ACK);
    assert_eq!(back.src_port, 7);
}
