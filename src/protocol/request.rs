//! Request frame definitions
//!
//! Represents requests sent to the server. A request is built fresh
//! per operation, is immutable once built, and is discarded after
//! encoding.

use bytes::BufMut;

use super::Opcode;

/// Maximum key length the 16-bit header field can carry
pub const MAX_KEY_LEN: usize = u16::MAX as usize;

/// Maximum extras length the 8-bit header field can carry
pub const MAX_EXTRAS_LEN: usize = u8::MAX as usize;

/// A request frame
#[derive(Debug, Clone)]
pub struct Request {
    /// Command opcode
    pub opcode: Opcode,

    /// Virtual bucket id used by the server to route the key
    pub vbucket_id: u16,

    /// The key this request operates on (may be empty)
    pub key: Vec<u8>,

    /// Compare-and-swap version token (0 when unused)
    pub cas: u64,

    /// Caller-chosen correlation token, echoed back by the server
    pub opaque: u32,

    /// Opcode-specific fixed-meaning fields (e.g. flags/expiration)
    pub extras: Vec<u8>,

    /// The value payload (may be empty)
    pub body: Vec<u8>,
}

impl Request {
    /// Create a request with empty extras and body
    pub fn new(opcode: Opcode, vbucket_id: u16, key: Vec<u8>) -> Self {
        Self {
            opcode,
            vbucket_id,
            key,
            cas: 0,
            opaque: 0,
            extras: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Pack store-operation extras: a 32-bit flags value in the high
    /// half and a 32-bit expiration in the low half, written as one
    /// big-endian u64.
    pub fn store_extras(flags: u32, expiration: u32) -> Vec<u8> {
        let mut extras = Vec::with_capacity(8);
        extras.put_u64((flags as u64) << 32 | expiration as u64);
        extras
    }

    /// Total body length as declared in the header
    pub fn total_body_len(&self) -> u32 {
        (self.extras.len() + self.key.len() + self.body.len()) as u32
    }
}
