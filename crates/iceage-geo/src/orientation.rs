//! Dominant-edge orientation of iceberg outlines.
//!
//! Used to line shapes up in the quartile comparison figure and reported
//! per shape by the JSON listing.

use geo::{Area, Centroid, MinimumRotatedRect, MultiPolygon, Polygon, Rotate, Translate};

/// Angle in degrees of the longest edge of the minimum-area enclosing
/// rectangle, measured from the horizontal.
///
/// Edges are undirected, so the result lies in `(-90, 90]`. Returns `None`
/// for geometry without area.
pub fn dominant_angle(polygon: &Polygon<f64>) -> Option<f64> {
    if !(polygon.unsigned_area() > 0.0) {
        return None;
    }
    let rect = polygon.minimum_rotated_rect()?;
    let longest = rect
        .exterior()
        .lines()
        .max_by(|a, b| {
            let la = a.dx().hypot(a.dy());
            let lb = b.dx().hypot(b.dy());
            la.total_cmp(&lb)
        })?;

    let (dx, dy) = (longest.dx(), longest.dy());
    if dx == 0.0 && dy == 0.0 {
        return None;
    }
    Some(fold_half_turn(dy.atan2(dx).to_degrees()))
}

/// Dominant angle of the largest member of a multipolygon.
pub fn dominant_angle_multi(geometry: &MultiPolygon<f64>) -> Option<f64> {
    geometry
        .0
        .iter()
        .max_by(|a, b| a.unsigned_area().total_cmp(&b.unsigned_area()))
        .and_then(dominant_angle)
}

/// Rotate a geometry so its dominant edge is horizontal and centre it on the
/// origin. Geometry without a centroid is returned unchanged.
pub fn orient_horizontal(geometry: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    let Some(centroid) = geometry.centroid() else {
        return geometry.clone();
    };
    let angle = dominant_angle_multi(geometry).unwrap_or(0.0);
    geometry
        .rotate_around_point(-angle, centroid)
        .translate(-centroid.x(), -centroid.y())
}

fn fold_half_turn(mut degrees: f64) -> f64 {
    while degrees > 90.0 {
        degrees -= 180.0;
    }
    while degrees <= -90.0 {
        degrees += 180.0;
    }
    degrees
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use geo::{polygon, Coord, LineString};
    use proptest::prelude::*;

    fn rotated_rectangle(w: f64, h: f64, degrees: f64, dx: f64, dy: f64) -> Polygon<f64> {
        let (s, c) = degrees.to_radians().sin_cos();
        let corners = [(0.0, 0.0), (w, 0.0), (w, h), (0.0, h), (0.0, 0.0)];
        let ring: Vec<Coord<f64>> = corners
            .iter()
            .map(|&(x, y)| Coord {
                x: x * c - y * s + dx,
                y: x * s + y * c + dy,
            })
            .collect();
        Polygon::new(LineString::from(ring), vec![])
    }

    fn half_turn_distance(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(180.0);
        d.min(180.0 - d)
    }

    #[test]
    fn test_axis_aligned_wide_rectangle() {
        let poly = polygon![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 2.0), (x: 0.0, y: 2.0)];
        assert!(half_turn_distance(dominant_angle(&poly).unwrap(), 0.0) < 1e-9);
    }

    #[test]
    fn test_axis_aligned_tall_rectangle() {
        let poly = polygon![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0), (x: 2.0, y: 10.0), (x: 0.0, y: 10.0)];
        assert!(half_turn_distance(dominant_angle(&poly).unwrap(), 90.0) < 1e-9);
    }

    #[test]
    fn test_rotated_rectangle() {
        let poly = rotated_rectangle(100.0, 20.0, 30.0, 0.0, 0.0);
        assert!(half_turn_distance(dominant_angle(&poly).unwrap(), 30.0) < 1e-6);
    }

    #[test]
    fn test_degenerate_polygon() {
        let poly = Polygon::new(LineString::<f64>::from(Vec::<Coord<f64>>::new()), vec![]);
        assert!(dominant_angle(&poly).is_none());
    }

    #[test]
    fn test_orient_horizontal_flattens_rectangle() {
        let poly = rotated_rectangle(100.0, 20.0, 40.0, 5_000.0, -2_000.0);
        let oriented = orient_horizontal(&MultiPolygon(vec![poly]));
        let angle = dominant_angle_multi(&oriented).unwrap();
        assert!(half_turn_distance(angle, 0.0) < 1e-6);
        let c = oriented.centroid().unwrap();
        assert_abs_diff_eq!(c.x(), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(c.y(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_multi_uses_largest_member() {
        let small = rotated_rectangle(10.0, 1.0, 0.0, 0.0, 0.0);
        let large = rotated_rectangle(100.0, 10.0, 60.0, 500.0, 500.0);
        let angle = dominant_angle_multi(&MultiPolygon(vec![small, large])).unwrap();
        assert!(half_turn_distance(angle, 60.0) < 1e-6);
    }

    proptest! {
        #[test]
        fn test_angle_in_range(
            w in 1.0f64..1e4,
            ratio in 1.5f64..10.0,
            deg in -180.0f64..180.0,
        ) {
            let poly = rotated_rectangle(w * ratio, w, deg, 0.0, 0.0);
            let angle = dominant_angle(&poly).unwrap();
            prop_assert!((-180.0..=180.0).contains(&angle));
        }

        #[test]
        fn test_angle_translation_invariant(
            w in 1.0f64..1e3,
            ratio in 1.5f64..10.0,
            deg in -180.0f64..180.0,
            dx in -1e5f64..1e5,
            dy in -1e5f64..1e5,
        ) {
            let base = dominant_angle(&rotated_rectangle(w * ratio, w, deg, 0.0, 0.0)).unwrap();
            let moved = dominant_angle(&rotated_rectangle(w * ratio, w, deg, dx, dy)).unwrap();
            prop_assert!(half_turn_distance(base, moved) < 1e-3);
        }
    }
}
