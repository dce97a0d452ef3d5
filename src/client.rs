//! Client Facade
//!
//! Typed operations over a [`Connection`]: each named operation builds
//! a request with opcode-specific fields and drives it through
//! send-and-wait. Non-success statuses come back as data in the
//! [`Response`]; only the caller decides whether, say, a key-not-found
//! on get is a failure.

use std::collections::HashMap;
use std::net::ToSocketAddrs;

use crate::config::Config;
use crate::error::Result;
use crate::network::Connection;
use crate::protocol::{Opcode, Request, Response};

/// Fixed opaque token stamped on stat requests
const STATS_OPAQUE: u32 = 918494;

/// A single server-reported statistic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatEntry {
    /// The stat key
    pub key: String,

    /// The stat value
    pub value: String,
}

/// A cache client over one server connection
pub struct Client {
    conn: Connection,
}

impl Client {
    /// Dial a server with the default configuration
    pub fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        Ok(Self {
            conn: Connection::connect(addr)?,
        })
    }

    /// Dial a server with the given configuration
    pub fn connect_with<A: ToSocketAddrs>(addr: A, config: &Config) -> Result<Self> {
        Ok(Self {
            conn: Connection::connect_with(addr, config)?,
        })
    }

    /// Close the underlying connection
    pub fn close(&mut self) {
        self.conn.close();
    }

    // -------------------------------------------------------------------------
    // Custom request surface
    // -------------------------------------------------------------------------

    /// Send a custom request and block for its response
    pub fn send(&mut self, request: &Request) -> Result<Response> {
        self.conn.send(request)
    }

    /// Send a custom request without waiting for a response
    pub fn transmit(&mut self, request: &Request) -> Result<()> {
        self.conn.transmit(request)
    }

    /// Block for and return the next response
    pub fn receive(&mut self) -> Result<Response> {
        self.conn.receive()
    }

    // -------------------------------------------------------------------------
    // Named operations
    // -------------------------------------------------------------------------

    /// Get the value for a key
    pub fn get(&mut self, vbucket_id: u16, key: &str) -> Result<Response> {
        self.conn
            .send(&Request::new(Opcode::Get, vbucket_id, key.as_bytes().to_vec()))
    }

    /// Delete a key
    pub fn delete(&mut self, vbucket_id: u16, key: &str) -> Result<Response> {
        self.conn
            .send(&Request::new(Opcode::Delete, vbucket_id, key.as_bytes().to_vec()))
    }

    /// Set the value for a key
    pub fn set(
        &mut self,
        vbucket_id: u16,
        key: &str,
        flags: u32,
        expiration: u32,
        body: &[u8],
    ) -> Result<Response> {
        self.store(Opcode::Set, vbucket_id, key, flags, expiration, body)
    }

    /// Add a value for a key (store only if it does not exist)
    pub fn add(
        &mut self,
        vbucket_id: u16,
        key: &str,
        flags: u32,
        expiration: u32,
        body: &[u8],
    ) -> Result<Response> {
        self.store(Opcode::Add, vbucket_id, key, flags, expiration, body)
    }

    fn store(
        &mut self,
        opcode: Opcode,
        vbucket_id: u16,
        key: &str,
        flags: u32,
        expiration: u32,
        body: &[u8],
    ) -> Result<Response> {
        let mut request = Request::new(opcode, vbucket_id, key.as_bytes().to_vec());
        request.extras = Request::store_extras(flags, expiration);
        request.body = body.to_vec();
        self.conn.send(&request)
    }

    // -------------------------------------------------------------------------
    // Stats Enumeration
    // -------------------------------------------------------------------------

    /// Fetch statistics from the server.
    ///
    /// Use `""` as the group key for top-level stats. One stat request
    /// triggers a server-driven burst of responses: each frame with a
    /// non-empty key is one statistic, and the burst ends with a
    /// single empty-key terminator frame that carries no data. The
    /// response count is not known in advance.
    pub fn stats(&mut self, group: &str) -> Result<Vec<StatEntry>> {
        let mut entries = Vec::with_capacity(128);

        let mut request = Request::new(Opcode::Stat, 0, group.as_bytes().to_vec());
        request.opaque = STATS_OPAQUE;
        self.conn.transmit(&request)?;

        loop {
            let response = self.conn.receive()?;
            if response.key.is_empty() {
                break;
            }
            entries.push(StatEntry {
                key: String::from_utf8_lossy(&response.key).into_owned(),
                value: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }

        Ok(entries)
    }

    /// Fetch statistics folded into a key to value mapping.
    ///
    /// Last write wins on duplicate keys, though the server is not
    /// expected to emit duplicates.
    pub fn stats_map(&mut self, group: &str) -> Result<HashMap<String, String>> {
        let entries = self.stats(group)?;
        let mut map = HashMap::with_capacity(entries.len());
        for entry in entries {
            map.insert(entry.key, entry.value);
        }
        Ok(map)
    }
}
