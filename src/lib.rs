//! # item-echo
//!
//! A small HTTP service that validates and echoes request inputs.
//!
//! Every endpoint decodes its path parameters, query string and JSON body,
//! checks them against declared field constraints, and either answers with
//! an echo (or trivial merge) of the inputs or rejects the request with a
//! 422 listing every failing field.
//!
//! ## Architecture
//!
//! - [`models`] - Request schemas (`Item`, `Image`, `User`, `FilterParams`)
//!   with `validator` constraints and custom checks
//! - [`validate`] - Error-accumulating decoding of raw inputs
//! - [`server`] - Axum handlers, the `Validated` extractor, and routing
//! - [`config`] - CLI and environment configuration
//! - [`error`] - API error types
//!
//! ## Example
//!
//! ```rust,no_run
//! use item_echo::{create_router, RouterConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let router = create_router(RouterConfig::new());
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await.unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod validate;

// Re-export commonly used types
pub use config::Config;
pub use error::{ApiError, FieldError};
pub use models::{check_http_url, check_valid_id, FilterParams, Image, Item, OrderBy, User};
pub use server::{create_router, ErrorResponse, RouterConfig, Validated};
pub use validate::{Decoder, QueryParams, Source};
