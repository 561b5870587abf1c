//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::config::Config;

/// Application state shared across all request handlers.
///
/// The configuration is immutable after startup and `Arc`-wrapped so that
/// Axum can clone the state for each request without copying it. There is no
/// other cross-request state.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide gateway configuration.
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new [`AppState`] holding `config`.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}
