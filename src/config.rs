//! Configuration for downlink
//!
//! Centralized configuration with sensible defaults.

/// Main configuration for a downlink endpoint
///
/// Shared between both roles: the responder uses the listen address and
/// per-connection timeouts, the sender uses the connect timeout and the
/// response read chunk size.
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// TCP listen address for the responder
    pub listen_addr: String,

    /// Max concurrent client connections
    pub max_connections: usize,

    /// Stream read timeout (milliseconds); 0 disables the timeout
    pub read_timeout_ms: u64,

    /// Stream write timeout (milliseconds); 0 disables the timeout
    pub write_timeout_ms: u64,

    /// Sender connect timeout (milliseconds)
    pub connect_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Frame Configuration
    // -------------------------------------------------------------------------
    /// Chunk size used when accumulating a response payload from the stream
    pub chunk_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:7122".to_string(),
            max_connections: 64,
            read_timeout_ms: 5000,
            write_timeout_ms: 5000,
            connect_timeout_ms: 5000,
            chunk_size: 1024,
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
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the TCP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Set the maximum number of concurrent connections
    pub fn max_connections(mut self, count: usize) -> Self {
        self.config.max_connections = count;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Set the connect timeout (in milliseconds)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Set the response payload read chunk size (in bytes)
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
