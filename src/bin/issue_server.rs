//! Serves the issue tracker over HTTP.
//!
//! Settings come from `issue-tracker.toml` (or the file named by
//! `ISSUE_TRACKER_CONFIG`) and `ISSUE_TRACKER__*` environment overrides. The
//! server stops gracefully on Ctrl-C.

use std::sync::Arc;

use issue_tracker::{
    api::{AppState, build_router},
    config::Settings,
    telemetry,
};
use tracing::{info, warn};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let settings = Settings::load()?;
    telemetry::init(&settings.log_filter)?;

    let addr = settings.socket_addr()?;
    let app = build_router(Arc::new(AppState::in_memory()));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "issue tracker listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("issue tracker stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
    }
}
