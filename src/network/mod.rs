//! Network Module
//!
//! Dialing and frame sequencing over a single stream socket.

mod connection;

pub use connection::Connection;
