//! Codec Tests
//!
//! Tests for request encoding and response decoding.

use std::io::Cursor;

use cachewire::protocol::{
    encode_request, read_response, Opcode, Request, Status, HEADER_SIZE, REQUEST_MAGIC,
    RESPONSE_MAGIC,
};
use cachewire::CacheWireError;

/// Build a raw response frame by hand, server-side-shaped.
fn response_frame(
    opcode: u8,
    status: u16,
    extras: &[u8],
    key: &[u8],
    body: &[u8],
    opaque: u32,
    cas: u64,
) -> Vec<u8> {
    let total = (extras.len() + key.len() + body.len()) as u32;
    let mut frame = Vec::with_capacity(HEADER_SIZE + total as usize);
    frame.push(RESPONSE_MAGIC);
    frame.push(opcode);
    frame.extend_from_slice(&(key.len() as u16).to_be_bytes());
    frame.push(extras.len() as u8);
    frame.push(0);
    frame.extend_from_slice(&status.to_be_bytes());
    frame.extend_from_slice(&total.to_be_bytes());
    frame.extend_from_slice(&opaque.to_be_bytes());
    frame.extend_from_slice(&cas.to_be_bytes());
    frame.extend_from_slice(extras);
    frame.extend_from_slice(key);
    frame.extend_from_slice(body);
    frame
}

// =============================================================================
// Request Encoding Tests
// =============================================================================

#[test]
fn test_encode_get_header_layout() {
    let req = Request::new(Opcode::Get, 0x0102, b"foo".to_vec());
    let frame = encode_request(&req);

    assert_eq!(frame.len(), HEADER_SIZE + 3);
    assert_eq!(frame[0], REQUEST_MAGIC);
    assert_eq!(frame[1], 0x00); // GET opcode
    assert_eq!(&frame[2..4], &[0x00, 0x03]); // key length
    assert_eq!(frame[4], 0x00); // extras length
    assert_eq!(frame[5], 0x00); // data type, reserved
    assert_eq!(&frame[6..8], &[0x01, 0x02]); // vbucket id
    assert_eq!(&frame[8..12], &[0x00, 0x00, 0x00, 0x03]); // total body length
    assert_eq!(&frame[12..16], &[0x00; 4]); // opaque
    assert_eq!(&frame[16..24], &[0x00; 8]); // cas
    assert_eq!(&frame[24..], b"foo");
}

#[test]
fn test_encode_section_order() {
    let mut req = Request::new(Opcode::Set, 0, b"key".to_vec());
    req.extras = vec![0xAA, 0xBB];
    req.body = b"value".to_vec();
    let frame = encode_request(&req);

    // Sections follow the header in fixed order: extras, key, body.
    assert_eq!(&frame[24..26], &[0xAA, 0xBB]);
    assert_eq!(&frame[26..29], b"key");
    assert_eq!(&frame[29..], b"value");
    assert_eq!(&frame[8..12], &[0x00, 0x00, 0x00, 0x0A]);
}

#[test]
fn test_store_extras_packing() {
    let extras = Request::store_extras(0x01020304, 600);
    assert_eq!(extras, vec![0x01, 0x02, 0x03, 0x04, 0x00, 0x00, 0x02, 0x58]);
}

#[test]
fn test_encode_opaque_and_cas() {
    let mut req = Request::new(Opcode::Delete, 0, b"k".to_vec());
    req.opaque = 0xDEADBEEF;
    req.cas = 0x0102030405060708;
    let frame = encode_request(&req);

    assert_eq!(&frame[12..16], &[0xDE, 0xAD, 0xBE, 0xEF]);
    assert_eq!(
        &frame[16..24],
        &[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]
    );
}

// =============================================================================
// Round-Trip Tests
// =============================================================================

#[test]
fn test_round_trip_with_magic_swap() {
    let mut req = Request::new(Opcode::Set, 0, b"mykey".to_vec());
    req.extras = Request::store_extras(7, 300);
    req.body = b"myvalue".to_vec();
    req.opaque = 424242;
    req.cas = 99;

    let mut frame = encode_request(&req);
    frame[0] = RESPONSE_MAGIC;

    let mut hdr = [0u8; HEADER_SIZE];
    let resp = read_response(&mut Cursor::new(frame), &mut hdr).unwrap();

    assert_eq!(resp.opcode, Opcode::Set);
    assert_eq!(resp.key, b"mykey");
    assert_eq!(resp.extras, Request::store_extras(7, 300));
    assert_eq!(resp.body, b"myvalue");
    assert_eq!(resp.opaque, 424242);
    assert_eq!(resp.cas, 99);
}

#[test]
fn test_decode_section_length_sum() {
    let frame = response_frame(0x00, 0x0000, &[1, 2, 3, 4], b"statkey", b"payload", 0, 0);
    let declared = u32::from_be_bytes([frame[8], frame[9], frame[10], frame[11]]) as usize;

    let mut hdr = [0u8; HEADER_SIZE];
    let resp = read_response(&mut Cursor::new(frame), &mut hdr).unwrap();

    assert_eq!(resp.extras.len() + resp.key.len() + resp.body.len(), declared);
    assert_eq!(resp.extras, vec![1, 2, 3, 4]);
    assert_eq!(resp.key, b"statkey");
    assert_eq!(resp.body, b"payload");
}

#[test]
fn test_decode_all_sections_empty() {
    let frame = response_frame(0x04, 0x0000, &[], &[], &[], 7, 0);

    let mut hdr = [0u8; HEADER_SIZE];
    let resp = read_response(&mut Cursor::new(frame), &mut hdr).unwrap();

    assert_eq!(resp.opcode, Opcode::Delete);
    assert!(resp.extras.is_empty());
    assert!(resp.key.is_empty());
    assert!(resp.body.is_empty());
    assert_eq!(resp.opaque, 7);
}

// =============================================================================
// Status-As-Data Tests
// =============================================================================

#[test]
fn test_non_success_status_is_not_an_error() {
    let frame = response_frame(0x00, 0x0001, &[], &[], &[], 0, 0);

    let mut hdr = [0u8; HEADER_SIZE];
    let resp = read_response(&mut Cursor::new(frame), &mut hdr).unwrap();

    assert_eq!(resp.status, Status::KeyNotFound);
    assert!(!resp.status.is_success());
    assert!(resp.body.is_empty());
}

// =============================================================================
// Malformed Frame Tests
// =============================================================================

#[test]
fn test_decode_bad_magic() {
    let mut frame = response_frame(0x00, 0x0000, &[], &[], b"x", 0, 0);
    frame[0] = 0x99;

    let mut hdr = [0u8; HEADER_SIZE];
    let err = read_response(&mut Cursor::new(frame), &mut hdr).unwrap_err();
    match err {
        CacheWireError::BadMagic(byte) => assert_eq!(byte, 0x99),
        other => panic!("expected BadMagic, got {:?}", other),
    }
}

#[test]
fn test_decode_request_magic_is_rejected() {
    let mut frame = response_frame(0x00, 0x0000, &[], &[], &[], 0, 0);
    frame[0] = REQUEST_MAGIC;

    let mut hdr = [0u8; HEADER_SIZE];
    let err = read_response(&mut Cursor::new(frame), &mut hdr).unwrap_err();
    assert!(matches!(err, CacheWireError::BadMagic(b) if b == REQUEST_MAGIC));
}

#[test]
fn test_decode_length_underflow() {
    // Declares key length 5 + extras length 2 but total body length 4;
    // the body-length subtraction must fail, not wrap.
    let mut frame = vec![RESPONSE_MAGIC, 0x00];
    frame.extend_from_slice(&5u16.to_be_bytes());
    frame.push(2);
    frame.push(0);
    frame.extend_from_slice(&0u16.to_be_bytes());
    frame.extend_from_slice(&4u32.to_be_bytes());
    frame.extend_from_slice(&0u32.to_be_bytes());
    frame.extend_from_slice(&0u64.to_be_bytes());

    let mut hdr = [0u8; HEADER_SIZE];
    let err = read_response(&mut Cursor::new(frame), &mut hdr).unwrap_err();
    match err {
        CacheWireError::LengthUnderflow { total, key, extras } => {
            assert_eq!(total, 4);
            assert_eq!(key, 5);
            assert_eq!(extras, 2);
        }
        other => panic!("expected LengthUnderflow, got {:?}", other),
    }
}

#[test]
fn test_decode_truncated_header() {
    let frame = response_frame(0x00, 0x0000, &[], &[], &[], 0, 0);

    let mut hdr = [0u8; HEADER_SIZE];
    let err = read_response(&mut Cursor::new(&frame[..10]), &mut hdr).unwrap_err();
    match err {
        CacheWireError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof),
        other => panic!("expected Io error, got {:?}", other),
    }
}

#[test]
fn test_decode_truncated_body() {
    let frame = response_frame(0x00, 0x0000, &[], &[], b"truncated body", 0, 0);

    let mut hdr = [0u8; HEADER_SIZE];
    let err = read_response(&mut Cursor::new(&frame[..HEADER_SIZE + 4]), &mut hdr).unwrap_err();
    match err {
        CacheWireError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof),
        other => panic!("expected Io error, got {:?}", other),
    }
}

#[test]
fn test_decode_unknown_opcode() {
    let frame = response_frame(0x7F, 0x0000, &[], &[], &[], 0, 0);

    let mut hdr = [0u8; HEADER_SIZE];
    let err = read_response(&mut Cursor::new(frame), &mut hdr).unwrap_err();
    assert!(matches!(err, CacheWireError::UnknownOpcode(0x7F)));
}

#[test]
fn test_decode_unknown_status() {
    let frame = response_frame(0x00, 0x7777, &[], &[], &[], 0, 0);

    let mut hdr = [0u8; HEADER_SIZE];
    let err = read_response(&mut Cursor::new(frame), &mut hdr).unwrap_err();
    assert!(matches!(err, CacheWireError::UnknownStatus(0x7777)));
}

// =============================================================================
// Wire Value Tests
// =============================================================================

#[test]
fn test_protocol_standard_opcodes() {
    assert_eq!(Opcode::Get as u8, 0x00);
    assert_eq!(Opcode::Set as u8, 0x01);
    assert_eq!(Opcode::Add as u8, 0x02);
    assert_eq!(Opcode::Delete as u8, 0x04);
    assert_eq!(Opcode::Stat as u8, 0x10);
    assert_eq!(REQUEST_MAGIC, 0x80);
    assert_eq!(RESPONSE_MAGIC, 0x81);
}

#[test]
fn test_status_conversion() {
    assert_eq!(Status::from_u16(0x0000), Some(Status::NoError));
    assert_eq!(Status::from_u16(0x0001), Some(Status::KeyNotFound));
    assert_eq!(Status::from_u16(0x0002), Some(Status::KeyExists));
    assert_eq!(Status::from_u16(0xFFFF), None);
    assert!(Status::NoError.is_success());
    assert!(!Status::KeyExists.is_success());
}
