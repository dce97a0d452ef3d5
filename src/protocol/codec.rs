//! Frame codec
//!
//! Encoding and decoding functions for the binary wire protocol.
//! Pure functions over an abstract byte stream; no state lives here.
//!
//! ## Frame Format
//!
//! Every frame is a fixed 24-byte header followed by three variable
//! sections in fixed order: extras, key, body. All integers are
//! big-endian.
//!
//! ```text
//! byte 0:      magic (0x80 request, 0x81 response)
//! byte 1:      opcode
//! bytes 2-3:   key length (u16)
//! byte 4:      extras length (u8)
//! byte 5:      data type (reserved, 0)
//! bytes 6-7:   vbucket id (request) / status (response) (u16)
//! bytes 8-11:  total body length (u32)
//! bytes 12-15: opaque (u32)
//! bytes 16-23: CAS (u64)
//! bytes 24..:  extras, then key, then body
//! ```
//!
//! The total body length covers all three sections, so the
//! body length of a response must be derived arithmetically:
//! `body = total - key - extras`. That subtraction is the one place a
//! malformed header could wrap to a huge allocation, so it is checked
//! explicitly.

use std::io::{Read, Write};

use bytes::BufMut;

use crate::error::{CacheWireError, Result};
use super::request::{MAX_EXTRAS_LEN, MAX_KEY_LEN};
use super::{Opcode, Request, Response, Status};

/// Magic byte opening every request frame
pub const REQUEST_MAGIC: u8 = 0x80;

/// Magic byte opening every response frame
pub const RESPONSE_MAGIC: u8 = 0x81;

/// Fixed header size for both frame directions
pub const HEADER_SIZE: usize = 24;

// =============================================================================
// Request Encoding
// =============================================================================

/// Encode a request to the exact byte sequence placed on the wire.
///
/// Section lengths exceeding their header field widths are a
/// programming-contract violation, not a runtime error.
pub fn encode_request(request: &Request) -> Vec<u8> {
    debug_assert!(
        request.key.len() <= MAX_KEY_LEN,
        "key exceeds 16-bit length field"
    );
    debug_assert!(
        request.extras.len() <= MAX_EXTRAS_LEN,
        "extras exceed 8-bit length field"
    );

    let mut frame = Vec::with_capacity(HEADER_SIZE + request.total_body_len() as usize);

    frame.put_u8(REQUEST_MAGIC);
    frame.put_u8(request.opcode as u8);
    frame.put_u16(request.key.len() as u16);
    frame.put_u8(request.extras.len() as u8);
    frame.put_u8(0); // data type, reserved
    frame.put_u16(request.vbucket_id);
    frame.put_u32(request.total_body_len());
    frame.put_u32(request.opaque);
    frame.put_u64(request.cas);

    frame.extend_from_slice(&request.extras);
    frame.extend_from_slice(&request.key);
    frame.extend_from_slice(&request.body);

    frame
}

/// Write a request frame to a stream and flush it
pub fn write_request<W: Write>(writer: &mut W, request: &Request) -> Result<()> {
    let frame = encode_request(request);
    writer.write_all(&frame)?;
    writer.flush()?;
    Ok(())
}

// =============================================================================
// Response Decoding
// =============================================================================

/// Parsed response header with the derived body length
#[derive(Debug, Clone, Copy)]
struct FrameHeader {
    opcode: Opcode,
    status: Status,
    key_len: usize,
    extras_len: usize,
    body_len: usize,
    opaque: u32,
    cas: u64,
}

/// Parse and validate a 24-byte response header.
///
/// Fails on a non-response magic byte, an unrecognized opcode or
/// status, or key + extras lengths exceeding the declared total body
/// length.
fn decode_header(hdr: &[u8; HEADER_SIZE]) -> Result<FrameHeader> {
    if hdr[0] != RESPONSE_MAGIC {
        return Err(CacheWireError::BadMagic(hdr[0]));
    }

    let opcode = Opcode::from_u8(hdr[1]).ok_or(CacheWireError::UnknownOpcode(hdr[1]))?;
    let key_len = u16::from_be_bytes([hdr[2], hdr[3]]);
    let extras_len = hdr[4];
    let raw_status = u16::from_be_bytes([hdr[6], hdr[7]]);
    let status = Status::from_u16(raw_status).ok_or(CacheWireError::UnknownStatus(raw_status))?;
    let total_body_len = u32::from_be_bytes([hdr[8], hdr[9], hdr[10], hdr[11]]);
    let opaque = u32::from_be_bytes([hdr[12], hdr[13], hdr[14], hdr[15]]);
    let cas = u64::from_be_bytes([
        hdr[16], hdr[17], hdr[18], hdr[19], hdr[20], hdr[21], hdr[22], hdr[23],
    ]);

    // The total covers extras + key + body, so the body length falls
    // out by subtraction. A header where key + extras exceed the total
    // is malformed; wrapping here would request a near-4GB allocation.
    let body_len = total_body_len
        .checked_sub(key_len as u32 + extras_len as u32)
        .ok_or(CacheWireError::LengthUnderflow {
            total: total_body_len,
            key: key_len,
            extras: extras_len,
        })?;

    Ok(FrameHeader {
        opcode,
        status,
        key_len: key_len as usize,
        extras_len: extras_len as usize,
        body_len: body_len as usize,
        opaque,
        cas,
    })
}

/// Read one section of the declared length, skipping the read entirely
/// for zero-length sections.
fn read_section<R: Read>(reader: &mut R, len: usize) -> Result<Vec<u8>> {
    let mut section = vec![0u8; len];
    if len > 0 {
        reader.read_exact(&mut section)?;
    }
    Ok(section)
}

/// Read a complete response frame from a stream.
///
/// Blocks until the header and all three sections are read in full.
/// `hdr_buf` is the caller-owned header scratch buffer; it is fully
/// overwritten before being interpreted, so no stale bytes from a
/// previous read can leak into this frame. A short read anywhere
/// (stream closed mid-header or mid-section) is a hard failure and the
/// stream must be considered unusable afterward.
pub fn read_response<R: Read>(reader: &mut R, hdr_buf: &mut [u8; HEADER_SIZE]) -> Result<Response> {
    reader.read_exact(hdr_buf)?;
    let header = decode_header(hdr_buf)?;

    // Sections arrive in fixed order: extras, key, body.
    let extras = read_section(reader, header.extras_len)?;
    let key = read_section(reader, header.key_len)?;
    let body = read_section(reader, header.body_len)?;

    Ok(Response {
        opcode: header.opcode,
        status: header.status,
        key,
        extras,
        body,
        opaque: header.opaque,
        cas: header.cas,
    })
}
