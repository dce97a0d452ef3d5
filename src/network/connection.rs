//! Connection Handler
//!
//! Owns exactly one stream socket and one reusable header scratch
//! buffer, and sequences frame writes and reads over it.

use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::config::Config;
use crate::error::{CacheWireError, Result};
use crate::protocol::{self, Request, Response, HEADER_SIZE};

/// A single connection to a cache server.
///
/// All operations are blocking and the connection is not internally
/// synchronized: sharing one `Connection` between threads without
/// external serialization is not safe, because the header scratch
/// buffer is mutated in place on every read. Responses arrive in the
/// order requests were written; callers pairing [`transmit`] with a
/// later [`receive`] must keep at most one request outstanding.
///
/// [`transmit`]: Connection::transmit
/// [`receive`]: Connection::receive
pub struct Connection {
    /// The underlying stream, or None once closed
    stream: Option<TcpStream>,

    /// Header scratch buffer, reused across every read. Fully
    /// overwritten before each use; never exposed outside this type.
    hdr_buf: [u8; HEADER_SIZE],

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Dial a server with the default configuration
    pub fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        Self::connect_with(addr, &Config::default())
    }

    /// Dial a server, applying socket options from the given config
    pub fn connect_with<A: ToSocketAddrs>(addr: A, config: &Config) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;

        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        stream.set_nodelay(config.nodelay)?;
        if config.read_timeout_ms > 0 {
            stream.set_read_timeout(Some(Duration::from_millis(config.read_timeout_ms)))?;
        }
        if config.write_timeout_ms > 0 {
            stream.set_write_timeout(Some(Duration::from_millis(config.write_timeout_ms)))?;
        }

        tracing::debug!("connected to {}", peer_addr);

        Ok(Self {
            stream: Some(stream),
            hdr_buf: [0u8; HEADER_SIZE],
            peer_addr,
        })
    }

    fn stream_mut(&mut self) -> Result<&mut TcpStream> {
        self.stream.as_mut().ok_or(CacheWireError::ConnectionClosed)
    }

    /// Write a request frame and block for its response
    pub fn send(&mut self, request: &Request) -> Result<Response> {
        self.transmit(request)?;
        self.receive()
    }

    /// Write a request frame without waiting for a response
    pub fn transmit(&mut self, request: &Request) -> Result<()> {
        let stream = self.stream_mut()?;
        protocol::write_request(stream, request)?;
        tracing::trace!(opcode = ?request.opcode, key_len = request.key.len(), "sent request");
        Ok(())
    }

    /// Block for and return the next response frame.
    ///
    /// Assumes a request was already written; with nothing outstanding
    /// this blocks until the server sends data or the socket deadline
    /// (if configured) expires.
    pub fn receive(&mut self) -> Result<Response> {
        let stream = self.stream.as_mut().ok_or(CacheWireError::ConnectionClosed)?;
        let response = protocol::read_response(stream, &mut self.hdr_buf)?;
        tracing::trace!(
            opcode = ?response.opcode,
            status = ?response.status,
            body_len = response.body.len(),
            "received response"
        );
        Ok(response)
    }

    /// Close the connection.
    ///
    /// Shuts the socket down in both directions, so an operation
    /// blocked on this stream elsewhere observes an I/O error rather
    /// than hanging. Subsequent operations on this connection fail
    /// with [`CacheWireError::ConnectionClosed`]. Idempotent.
    pub fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            let _ = stream.shutdown(Shutdown::Both);
            tracing::debug!("closed connection to {}", self.peer_addr);
        }
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.close();
    }
}
