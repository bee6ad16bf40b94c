//! Entry point for the Price Engine binary.
//!
//! Running this binary will start an HTTP server that exposes a
//! minimal API for quoting projects.  The billing settings JSON file
//! may be specified via the `PRICE_SETTINGS_FILE` environment
//! variable; if unset the server starts with built-in defaults.  The
//! bind address comes from `PRICE_BIND_ADDR` and defaults to
//! `127.0.0.1:3000`.  Log verbosity follows `RUST_LOG`.

use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    // Determine where the settings file is located, if any
    let settings_path = std::env::var("PRICE_SETTINGS_FILE").ok().map(PathBuf::from);
    // Determine bind address
    let addr = std::env::var("PRICE_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    if let Err(err) = price_engine::api::serve(&addr, settings_path.as_deref()).await {
        error!("error running server: {err}");
    }
}

// Public re-exports so the binary has access to library modules
pub use price_engine::{api, engine, models, settings};
