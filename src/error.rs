//! Error types for cachewire
//!
//! Provides a unified error type for all operations.
//!
//! A non-success status code in a well-formed response is *not* an
//! error at this layer; it is returned to the caller as data inside
//! the [`Response`](crate::protocol::Response). The variants here cover
//! transport failures and protocol violations only, both of which leave
//! the connection unusable.

use thiserror::Error;

/// Result type alias using CacheWireError
pub type Result<T> = std::result::Result<T, CacheWireError>;

/// Unified error type for cachewire operations
#[derive(Debug, Error)]
pub enum CacheWireError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection is closed")]
    ConnectionClosed,

    // -------------------------------------------------------------------------
    // Protocol Violations
    // -------------------------------------------------------------------------
    /// The first header byte was not the response magic. The stream is
    /// desynchronized and cannot be safely resumed.
    #[error("bad magic: 0x{0:02x}")]
    BadMagic(u8),

    /// The header declared key + extras lengths exceeding the total
    /// body length; the body-length subtraction would underflow.
    #[error(
        "malformed frame: key length {key} + extras length {extras} exceeds total body length {total}"
    )]
    LengthUnderflow { total: u32, key: u16, extras: u8 },

    // -------------------------------------------------------------------------
    // Unrecognized Wire Values
    // -------------------------------------------------------------------------
    #[error("unknown opcode: 0x{0:02x}")]
    UnknownOpcode(u8),

    #[error("unknown status: 0x{0:04x}")]
    UnknownStatus(u16),
}
