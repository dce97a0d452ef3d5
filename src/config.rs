//! Configuration for cachewire
//!
//! Socket-level tuning for a dialed connection. The core performs
//! unconditional full reads and writes with no timeout layer of its
//! own; deadlines, if desired, are imposed here on the underlying
//! socket.

/// Connection configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Disable Nagle's algorithm for low latency
    pub nodelay: bool,

    /// Socket read timeout in milliseconds (0 = no timeout)
    pub read_timeout_ms: u64,

    /// Socket write timeout in milliseconds (0 = no timeout)
    pub write_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            nodelay: true,
            read_timeout_ms: 0,
            write_timeout_ms: 0,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Enable or disable TCP_NODELAY
    pub fn nodelay(mut self, nodelay: bool) -> Self {
        self.config.nodelay = nodelay;
        self
    }

    /// Set the socket read timeout (in milliseconds, 0 disables)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the socket write timeout (in milliseconds, 0 disables)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
