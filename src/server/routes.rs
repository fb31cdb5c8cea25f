//! Router configuration for the item echo API.
//!
//! This module defines the HTTP routes and applies middleware for CORS,
//! request tracing and the request body limit.
//!
//! # Route Structure
//!
//! ```text
//! /                                  GET   - Greeting
//! /items/                            GET   - Item listing
//!                                    POST  - Create (echo) an item
//! /items/{item_id}                   GET   - Read an item ID
//!                                    PUT   - Update (merge) an item
//! /users/{user_id}/items/{item_id}   GET   - Read a user's item
//! ```
//!
//! Unmatched paths answer 404 and unsupported methods on a known path
//! answer 405, both as JSON error bodies.
//!
//! # Example
//!
//! ```ignore
//! use item_echo::server::routes::{create_router, RouterConfig};
//!
//! let config = RouterConfig::new()
//!     .with_cors_origins(vec!["https://example.com".to_string()]);
//!
//! let router = create_router(config);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::time::Duration;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use http::header::CONTENT_TYPE;
use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_item_handler, method_not_allowed_handler, not_found_handler, read_item_handler,
    read_items_handler, read_user_item_handler, root_handler, update_item_handler,
};

/// Default maximum request body size (64 KiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Allowed CORS origins (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Maximum accepted request body size in bytes
    pub max_body_bytes: usize,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RouterConfig {
    /// Create a new router configuration.
    ///
    /// By default:
    /// - CORS allows any origin
    /// - Request bodies are limited to 64 KiB
    /// - Tracing is enabled
    pub fn new() -> Self {
        Self {
            cors_origins: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            enable_tracing: true,
        }
    }

    /// Set specific allowed CORS origins.
    ///
    /// Pass an empty vec to disallow all cross-origin requests.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Set the maximum request body size in bytes.
    pub fn with_max_body_bytes(mut self, bytes: usize) -> Self {
        self.max_body_bytes = bytes;
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// All routes are stateless; every handler validates its own inputs
/// through the [`Validated`](super::extract::Validated) extractor.
pub fn create_router(config: RouterConfig) -> Router {
    let cors = build_cors_layer(&config);

    let router = Router::new()
        .route("/", get(root_handler))
        .route("/items/", get(read_items_handler).post(create_item_handler))
        .route(
            "/items/{item_id}",
            get(read_item_handler).put(update_item_handler),
        )
        .route("/users/{user_id}/items/{item_id}", get(read_user_item_handler))
        .fallback(not_found_handler)
        .method_not_allowed_fallback(method_not_allowed_handler)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(cors);

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(86400)); // 24 hours

    match &config.cors_origins {
        None => cors.allow_origin(Any),
        Some(origins) if origins.is_empty() => cors,
        Some(origins) => {
            let parsed_origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed_origins)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
