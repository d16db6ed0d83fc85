//! Shared application state for request handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::lifecycle::Readiness;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Contains the application configuration and the process readiness flag
/// written by the lifecycle manager.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub readiness: Readiness,
}

impl AppState {
    /// Creates a new application state with a fresh, not-ready readiness flag.
    pub fn new(config: AppConfig) -> Self {
        Self::with_readiness(config, Readiness::new())
    }

    pub fn with_readiness(config: AppConfig, readiness: Readiness) -> Self {
        Self {
            config: Arc::new(config),
            readiness,
        }
    }
}
