//! Shared, read-only application state.

use std::path::PathBuf;
use std::sync::Arc;

use iceage_core::IceageConfig;

/// State handed to every handler. Nothing in it changes after start-up.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Resolved configuration
    pub config: IceageConfig,
}

/// Cheaply clonable handle used as the router state.
pub type SharedState = Arc<AppState>;

impl AppState {
    /// Wrap a configuration.
    pub fn new(config: IceageConfig) -> SharedState {
        Arc::new(Self { config })
    }

    /// Shapefile catalog directory.
    pub fn shapefile_dir(&self) -> PathBuf {
        self.config.catalog.shapefile_dir()
    }

    /// Melt-rate directory.
    pub fn melt_rate_dir(&self) -> PathBuf {
        self.config.catalog.melt_rate_dir()
    }
}
