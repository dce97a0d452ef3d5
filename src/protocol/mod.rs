//! Protocol Module
//!
//! Defines the binary wire protocol spoken with the cache server.
//!
//! ## Frame Layout
//!
//! Both directions use a fixed 24-byte header followed by three
//! variable-length sections in fixed order (all integers big-endian):
//!
//! ```text
//! ┌──────────┬──────────┬──────────────┬─────────┬─────────┐
//! │ Header   │  Extras  │     Key      │       Body        │
//! │ (24)     │ (0-255)  │  (0-65535)   │   (remainder)     │
//! └──────────┴──────────┴──────────────┴───────────────────┘
//! ```
//!
//! Requests open with magic `0x80`, responses with magic `0x81`. The
//! header declares a single total body length covering all three
//! sections; the body length of a response is derived by subtracting
//! the key and extras lengths from it.
//!
//! ## Opcodes (protocol-standard values)
//! - 0x00: GET
//! - 0x01: SET
//! - 0x02: ADD
//! - 0x04: DELETE
//! - 0x10: STAT

mod opcode;
mod request;
mod response;
mod codec;

pub use opcode::{Opcode, Status};
pub use request::{Request, MAX_EXTRAS_LEN, MAX_KEY_LEN};
pub use response::Response;
pub use codec::{
    encode_request, read_response, write_request, HEADER_SIZE, REQUEST_MAGIC, RESPONSE_MAGIC,
};
