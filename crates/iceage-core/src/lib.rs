//! ICE-AGE core types: errors, configuration and date ranges.
//!
//! This crate has no internal ICE-AGE dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error taxonomy and Result alias
//! - [`config`]: Config file resolution and catalog paths
//! - [`dates`]: `YYYYMMDD` date ranges used to name catalog folders

pub mod config;
pub mod dates;
pub mod error;

// Re-export key types at crate root for convenience
pub use config::{CatalogConfig, ConfigManager, GalleryImage, IceageConfig};
pub use dates::DateRange;
pub use error::{Error, Result};
