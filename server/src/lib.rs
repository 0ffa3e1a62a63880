mod backend;
mod config;

use std::sync::OnceLock;

use axum::{Router, routing::get};
use tracing_subscriber::EnvFilter;
use types::Result;

pub use crate::backend::BackendClient;
pub use crate::config::Config;

static BACKEND: OnceLock<BackendClient> = OnceLock::new();

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // The dev server may have installed a subscriber already.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Load configuration, connect the backend client and return the extra
/// routes served next to the app.
pub async fn init() -> Result<Router> {
    let config = Config::load()?;
    tracing::info!(?config, "loaded configuration");

    if BACKEND.get().is_none() {
        let _ = BACKEND.set(BackendClient::from_config(&config)?);
    }

    Ok(Router::new().route("/healthz", get(healthz)))
}

async fn healthz() -> &'static str {
    "ok"
}

/// The backend client. Fails if [`init`] has not run.
pub fn backend() -> Result<&'static BackendClient> {
    BACKEND
        .get()
        .ok_or_else(|| "backend client is not initialized".into())
}
