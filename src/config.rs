//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use tracing::warn;

/// Fallback signing secret so the server still boots in development.
const INSECURE_DEFAULT_SECRET: &str = "insecure-dev-secret-change-me";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Lifetime in seconds for cached responses
    pub cache_ttl: u64,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// HMAC secret used to verify bearer tokens
    pub jwt_secret: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_TTL` - Cached response lifetime in seconds (default: 60)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 30)
    /// - `JWT_SECRET_KEY` - HS256 signing secret (default: insecure dev value)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            cache_ttl: env::var("CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            jwt_secret: env::var("JWT_SECRET_KEY").unwrap_or_else(|_| {
                warn!("JWT_SECRET_KEY not set, using an insecure development secret");
                INSECURE_DEFAULT_SECRET.to_string()
            }),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cache_ttl: 60,
            cleanup_interval: 30,
            jwt_secret: INSECURE_DEFAULT_SECRET.to_string(),
        }
    }
}
