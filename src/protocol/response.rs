//! Response frame definitions
//!
//! Represents responses decoded off the wire. The three variable
//! sections always satisfy
//! `extras.len() + key.len() + body.len() == total body length`
//! as declared in the frame header, and appear in that fixed order
//! both on the wire and in memory.

use super::{Opcode, Status};

/// A decoded response frame, owned by the caller after decode
#[derive(Debug, Clone)]
pub struct Response {
    /// Opcode of the request this responds to
    pub opcode: Opcode,

    /// Server-reported outcome. Returned as data, never translated
    /// into an error by the codec or the connection; callers decide
    /// whether a non-success status is a failure for their use case.
    pub status: Status,

    /// Key section (non-empty for stat frames and GetK-style replies)
    pub key: Vec<u8>,

    /// Extras section
    pub extras: Vec<u8>,

    /// Value payload
    pub body: Vec<u8>,

    /// Correlation token echoed from the request
    pub opaque: u32,

    /// Compare-and-swap version token for the stored value
    pub cas: u64,
}
