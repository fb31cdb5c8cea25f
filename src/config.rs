//! Configuration management for item-echo.
//!
//! Configuration comes from:
//! - Command-line arguments via clap
//! - Environment variables with `ITEM_ECHO_` prefix
//! - Sensible defaults for all settings
//!
//! # Environment Variables
//!
//! - `ITEM_ECHO_HOST` - Server bind address (default: 0.0.0.0)
//! - `ITEM_ECHO_PORT` - Server port (default: 8000)
//! - `ITEM_ECHO_CORS_ORIGINS` - Allowed CORS origins, comma-separated (default: any)
//! - `ITEM_ECHO_MAX_BODY_BYTES` - Maximum request body size (default: 65536)

use clap::Parser;

use crate::server::{RouterConfig, DEFAULT_MAX_BODY_BYTES};

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 8000;

/// Smallest accepted body limit.
pub const MIN_BODY_BYTES: usize = 1024;

/// Largest accepted body limit.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

// =============================================================================
// CLI Arguments
// =============================================================================

/// item-echo - validates and echoes query, path and JSON body inputs.
#[derive(Parser, Debug, Clone)]
#[command(name = "item-echo")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "ITEM_ECHO_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "ITEM_ECHO_PORT")]
    pub port: u16,

    /// Maximum request body size in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_BODY_BYTES, env = "ITEM_ECHO_MAX_BODY_BYTES")]
    pub max_body_bytes: usize,

    // =========================================================================
    // CORS Configuration
    // =========================================================================
    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "ITEM_ECHO_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("host must not be empty. Set --host or ITEM_ECHO_HOST".to_string());
        }

        if self.max_body_bytes < MIN_BODY_BYTES || self.max_body_bytes > MAX_BODY_BYTES {
            return Err("max_body_bytes must be between 1KB and 16MB".to_string());
        }

        if let Some(origins) = &self.cors_origins {
            if let Some(bad) = origins.iter().find(|o| o.parse::<http::HeaderValue>().is_err()) {
                return Err(format!("Invalid CORS origin: {:?}", bad));
            }
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Build the router configuration from these settings.
    pub fn router_config(&self) -> RouterConfig {
        let mut router_config = RouterConfig::new()
            .with_max_body_bytes(self.max_body_bytes)
            .with_tracing(!self.no_tracing);

        if let Some(ref origins) = self.cors_origins {
            router_config = router_config.with_cors_origins(origins.clone());
        }

        router_config
    }
}

// =============================================================================
// Tests
// =============================================================================
