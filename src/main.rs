//! item-echo - validates and echoes request inputs over HTTP.
//!
//! This binary parses configuration, sets up logging and serves the router.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use item_echo::{config::Config, server::create_router};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let version = env!("CARGO_PKG_VERSION");
    info!("item-echo v{}", version);
    info!("Configuration:");
    match config.cors_origins {
        Some(ref origins) => info!("  CORS origins: {}", origins.join(", ")),
        None => info!("  CORS origins: any"),
    }
    info!("  Max body size: {} bytes", config.max_body_bytes);
    info!("  Request tracing: {}", !config.no_tracing);

    let router = create_router(config.router_config());
    let addr = config.bind_address();

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    info!("");
    info!("  Server listening on: http://{}", addr);
    info!("");
    info!("  Try these endpoints:");
    info!("    curl http://{}/", addr);
    info!("    curl 'http://{}/items/?q=foo&id=isbn-1&limit=10'", addr);
    info!("    curl http://{}/users/7/items/abc?short=true", addr);
    info!("");

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "item_echo=debug,tower_http=debug"
    } else {
        "item_echo=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
