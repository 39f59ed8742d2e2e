//! Figures, maps and page layout for the ICE-AGE dashboard.
//!
//! - [`palette`]: colour maps and fixed category colours
//! - [`charts`]: bar chart, correlogram, shape panels, quartile figure
//! - [`map`]: Leaflet map documents backed by GeoJSON
//! - [`html`]: page shell, navigation and form controls

pub mod charts;
pub mod html;
pub mod map;
pub mod palette;

pub use charts::{
    render, render_png, render_svg, Chart, Correlogram, DistributionChart, Format, QuartileFigure,
    ShapePanel,
};
pub use map::{IcebergPopup, MapView, TileStyle};
pub use palette::Rgb;
