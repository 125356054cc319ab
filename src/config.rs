//! Configuration Module
//!
//! Loads client and server settings from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote REST API
    pub api_base_url: String,
    /// Port the view backend listens on
    pub server_port: u16,
    /// Default cache TTL in milliseconds
    pub default_ttl_ms: u64,
    /// Cache capacity bound, 0 = unbounded
    pub max_entries: usize,
    /// Seconds between expired-entry sweeps, 0 = no sweeper
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `API_BASE_URL` - Remote API base URL (default: http://localhost:8000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DEFAULT_TTL_MS` - Default cache TTL in milliseconds (default: 300000)
    /// - `MAX_ENTRIES` - Maximum cache entries, 0 for unbounded (default: 0)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds, 0 disables (default: 0)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: env::var("API_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.api_base_url),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            default_ttl_ms: parse_var("DEFAULT_TTL_MS").unwrap_or(defaults.default_ttl_ms),
            max_entries: parse_var("MAX_ENTRIES").unwrap_or(defaults.max_entries),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
        }
    }

    pub fn default_ttl(&self) -> Duration {
        Duration::from_millis(self.default_ttl_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            server_port: 3000,
            default_ttl_ms: 300_000,
            max_entries: 0,
            cleanup_interval: 0,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
