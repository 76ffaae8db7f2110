//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::num::NonZeroUsize;

/// Default byte budget: 1 MiB of keys and values.
pub const DEFAULT_MAX_SIZE: usize = 1024 * 1024;

/// Default HTTP port.
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Byte budget of the cache (sum of key and value lengths)
    pub max_size: NonZeroUsize,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_SIZE` - Cache budget in bytes (default: 1048576; zero or unparsable falls back to the default)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        Self {
            max_size: env::var("MAX_SIZE")
                .ok()
                .and_then(|v| v.parse::<NonZeroUsize>().ok())
                .unwrap_or_else(default_max_size),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_size: default_max_size(),
            server_port: DEFAULT_SERVER_PORT,
        }
    }
}

fn default_max_size() -> NonZeroUsize {
    NonZeroUsize::new(DEFAULT_MAX_SIZE).unwrap_or(NonZeroUsize::MIN)
}
