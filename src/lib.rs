//! # cachewire
//!
//! A memcached binary protocol client with:
//! - Exact binary frame encoding/decoding (24-byte headers, big-endian)
//! - A single blocking connection with send-and-wait, send-only, and
//!   receive-only sequencing
//! - Typed get/set/add/delete operations and stats enumeration
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Client (facade)                          │
//! │          get / set / add / delete / stats                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     Connection                               │
//! │     one TcpStream + reusable 24-byte header buffer           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    Frame Codec                               │
//! │     encode_request / read_response (stateless)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                       ▼
//!                  cache server
//! ```
//!
//! One request is in flight at a time per connection; there is no
//! pooling, pipelining, or retry layer.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CacheWireError, Result};
pub use config::Config;
pub use network::Connection;
pub use client::{Client, StatEntry};
pub use protocol::{Opcode, Request, Response, Status};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of cachewire
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
