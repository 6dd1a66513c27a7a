//! Tracing subscriber installation.

use thiserror::Error;
use tracing_subscriber::{EnvFilter, filter::ParseError};

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured filter directive is invalid.
    #[error("invalid log filter: {0}")]
    InvalidFilter(#[from] ParseError),

    /// A global subscriber is already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Install(Box<dyn std::error::Error + Send + Sync>),
}

/// Builds the event filter, preferring `RUST_LOG` over `fallback`.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] when `RUST_LOG` is unset and
/// `fallback` is not a valid directive.
pub fn filter(fallback: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .map_err(TelemetryError::from)
}

/// Installs the global `fmt` subscriber.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the filter is invalid or a subscriber is
/// already installed.
pub fn init(fallback_filter: &str) -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(fallback_filter)?)
        .with_target(true)
        .try_init()
        .map_err(TelemetryError::Install)
}
