//! Geometry and statistics helpers for ICE-AGE.
//!
//! - [`projection`]: EPSG:4326 ↔ EPSG:3413 reprojection
//! - [`bounds`]: bounding boxes and per-iceberg size summaries
//! - [`quartiles`]: equal-frequency area bins
//! - [`orientation`]: dominant-edge angle of an outline
//! - [`stats`]: normalisation and correlation

pub mod bounds;
pub mod orientation;
pub mod projection;
pub mod quartiles;
pub mod stats;

pub use bounds::{max_extent, summarize, translate_to_origin, Extent, ShapeSummary};
pub use orientation::{dominant_angle, dominant_angle_multi, orient_horizontal};
pub use projection::{Crs, Reprojector};
pub use quartiles::{group_by_quartile, quartile_bins, Quartile};
