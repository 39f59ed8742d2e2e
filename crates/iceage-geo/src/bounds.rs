//! Axis-aligned extents and per-iceberg size summaries.

use geo::{Area, BoundingRect, MultiPolygon, Translate};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    /// Minimum x
    pub min_x: f64,
    /// Minimum y
    pub min_y: f64,
    /// Maximum x
    pub max_x: f64,
    /// Maximum y
    pub max_y: f64,
}

impl Extent {
    /// Bounding box of a geometry, or `None` for empty geometry.
    pub fn of(geometry: &MultiPolygon<f64>) -> Option<Self> {
        let rect = geometry.bounding_rect()?;
        Some(Self {
            min_x: rect.min().x,
            min_y: rect.min().y,
            max_x: rect.max().x,
            max_y: rect.max().y,
        })
    }

    /// Width along x.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height along y.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Whether every bound is finite.
    pub fn is_finite(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
    }
}

/// Size of one iceberg outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeSummary {
    /// Shapefile name
    pub name: String,
    /// Bounding-box width in metres
    pub width: f64,
    /// Bounding-box height in metres
    pub height: f64,
    /// Planar area in square metres
    pub area: f64,
}

/// Summarize named geometries that are already in a planar CRS.
///
/// Empty geometry and non-finite extents are skipped rather than treated as
/// errors.
pub fn summarize<'a, I>(shapes: I) -> Vec<ShapeSummary>
where
    I: IntoIterator<Item = (&'a str, &'a MultiPolygon<f64>)>,
{
    shapes
        .into_iter()
        .filter_map(|(name, geometry)| {
            let Some(extent) = Extent::of(geometry).filter(Extent::is_finite) else {
                log::warn!("Skipping '{name}': empty or invalid geometry");
                return None;
            };
            Some(ShapeSummary {
                name: name.to_string(),
                width: extent.width(),
                height: extent.height(),
                area: geometry.unsigned_area(),
            })
        })
        .collect()
}

/// Largest width and largest height across summaries (shared axis limits).
pub fn max_extent(summaries: &[ShapeSummary]) -> (f64, f64) {
    summaries.iter().fold((0.0_f64, 0.0_f64), |(w, h), s| {
        (w.max(s.width), h.max(s.height))
    })
}

/// Shift a geometry so its bounding-box minimum sits at the origin.
pub fn translate_to_origin(geometry: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    match Extent::of(geometry) {
        Some(extent) => geometry.translate(-extent.min_x, -extent.min_y),
        None => geometry.clone(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::projection::{Crs, Reprojector};
    use approx::assert_abs_diff_eq;
    use geo::{polygon, MultiPolygon};

    fn unit_square() -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![
            (x: -0.5, y: -0.5),
            (x: 0.5, y: -0.5),
            (x: 0.5, y: 0.5),
            (x: -0.5, y: 0.5),
        ]])
    }

    fn rectangle(x0: f64, y0: f64, w: f64, h: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![
            (x: x0, y: y0),
            (x: x0 + w, y: y0),
            (x: x0 + w, y: y0 + h),
            (x: x0, y: y0 + h),
        ]])
    }

    #[test]
    fn test_unit_square_identity_projection() {
        let reprojector = Reprojector::new().unwrap();
        let square = reprojector.to_polar(&unit_square(), Crs::Polar).unwrap();
        let summaries = summarize([("square.shp", &square)]);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].width, 1.0);
        assert_eq!(summaries[0].height, 1.0);
        assert_abs_diff_eq!(summaries[0].area, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_geometry_skipped() {
        let empty = MultiPolygon::<f64>(vec![]);
        let square = unit_square();
        let summaries = summarize([("empty.shp", &empty), ("square.shp", &square)]);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].name, "square.shp");
    }

    #[test]
    fn test_max_extent() {
        let a = rectangle(0.0, 0.0, 30.0, 10.0);
        let b = rectangle(100.0, 100.0, 20.0, 40.0);
        let summaries = summarize([("a", &a), ("b", &b)]);
        assert_eq!(max_extent(&summaries), (30.0, 40.0));
        assert_eq!(max_extent(&[]), (0.0, 0.0));
    }

    #[test]
    fn test_translate_to_origin() {
        let shifted = translate_to_origin(&rectangle(-500.0, 250.0, 20.0, 10.0));
        let extent = Extent::of(&shifted).unwrap();
        assert_eq!(extent.min_x, 0.0);
        assert_eq!(extent.min_y, 0.0);
        assert_eq!(extent.width(), 20.0);
        assert_eq!(extent.height(), 10.0);
    }
}
