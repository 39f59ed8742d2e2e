//! # iceage-api
//!
//! HTTP front end of the ICE-AGE iceberg catalog.
//!
//! - [`views`]: server-rendered pages (home, shapefile viewer, spatial map,
//!   statistics, gallery, acknowledgements)
//! - [`routes`]: axum router with page, download, image and JSON handlers
//! - [`server`]: listener setup and graceful shutdown

pub mod error;
pub mod params;
pub mod routes;
pub mod server;
pub mod state;
pub mod views;

pub use error::{Error, Result};
pub use params::Params;
pub use routes::router;
pub use server::Server;
pub use state::{AppState, SharedState};
