//! Reprojection between geographic coordinates and the polar stereographic
//! grid used for all iceberg measurements.

use geo::{Coord, MapCoords, MultiPolygon};
use proj4rs::Proj;
use serde::{Deserialize, Serialize};

use iceage_core::{Error, Result};

/// WGS 84 longitude/latitude (EPSG:4326).
pub const EPSG_4326: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// NSIDC Sea Ice Polar Stereographic North (EPSG:3413), metres.
pub const EPSG_3413: &str =
    "+proj=stere +lat_0=90 +lat_ts=70 +lon_0=-45 +k=1 +x_0=0 +y_0=0 +datum=WGS84 +units=m +no_defs";

/// Coordinate reference systems found in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Crs {
    /// Longitude/latitude in degrees
    Geographic,
    /// Polar stereographic metres
    Polar,
}

impl Crs {
    /// EPSG code of this CRS.
    pub fn epsg(&self) -> u32 {
        match self {
            Crs::Geographic => 4326,
            Crs::Polar => 3413,
        }
    }

    /// Guess the CRS from the WKT in a `.prj` sidecar.
    ///
    /// A `GEOGCS` root means lon/lat. Anything else (including an empty
    /// string) is taken to be the catalog's native polar grid.
    pub fn from_wkt(wkt: &str) -> Self {
        if wkt.trim_start().to_ascii_uppercase().starts_with("GEOGCS") {
            Crs::Geographic
        } else {
            Crs::Polar
        }
    }
}

/// Converts geometries between [`Crs::Geographic`] and [`Crs::Polar`].
pub struct Reprojector {
    geographic: Proj,
    polar: Proj,
}

impl std::fmt::Debug for Reprojector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reprojector").finish_non_exhaustive()
    }
}

impl Reprojector {
    /// Build the projection pair.
    pub fn new() -> Result<Self> {
        let geographic = Proj::from_proj_string(EPSG_4326)
            .map_err(|e| Error::projection(format!("EPSG:4326 definition: {e:?}")))?;
        let polar = Proj::from_proj_string(EPSG_3413)
            .map_err(|e| Error::projection(format!("EPSG:3413 definition: {e:?}")))?;
        Ok(Self { geographic, polar })
    }

    /// Project a single lon/lat (degrees) to polar metres.
    pub fn point_to_polar(&self, lon: f64, lat: f64) -> Result<(f64, f64)> {
        let mut point = (lon.to_radians(), lat.to_radians(), 0.0);
        proj4rs::transform::transform(&self.geographic, &self.polar, &mut point)
            .map_err(|e| Error::projection(format!("({lon}, {lat}) to EPSG:3413: {e:?}")))?;
        Ok((point.0, point.1))
    }

    /// Project a single polar point (metres) back to lon/lat degrees.
    pub fn point_to_geographic(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        let mut point = (x, y, 0.0);
        proj4rs::transform::transform(&self.polar, &self.geographic, &mut point)
            .map_err(|e| Error::projection(format!("({x}, {y}) to EPSG:4326: {e:?}")))?;
        Ok((point.0.to_degrees(), point.1.to_degrees()))
    }

    /// Reproject a geometry from `from` into the polar grid.
    pub fn to_polar(&self, geometry: &MultiPolygon<f64>, from: Crs) -> Result<MultiPolygon<f64>> {
        match from {
            Crs::Polar => Ok(geometry.clone()),
            Crs::Geographic => geometry.try_map_coords(|c: Coord<f64>| {
                self.point_to_polar(c.x, c.y).map(|(x, y)| Coord { x, y })
            }),
        }
    }

    /// Reproject a polar geometry to lon/lat (for web maps).
    pub fn to_geographic(&self, geometry: &MultiPolygon<f64>) -> Result<MultiPolygon<f64>> {
        geometry.try_map_coords(|c: Coord<f64>| {
            self.point_to_geographic(c.x, c.y).map(|(x, y)| Coord { x, y })
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use geo::{polygon, MultiPolygon};

    #[test]
    fn test_crs_from_wkt() {
        assert_eq!(
            Crs::from_wkt(r#"GEOGCS["GCS_WGS_1984",DATUM["D_WGS_1984"]]"#),
            Crs::Geographic
        );
        assert_eq!(
            Crs::from_wkt(r#"PROJCS["WGS_84_NSIDC_Sea_Ice_Polar_Stereographic_North"]"#),
            Crs::Polar
        );
        assert_eq!(Crs::from_wkt(""), Crs::Polar);
        assert_eq!(Crs::Polar.epsg(), 3413);
    }

    #[test]
    fn test_central_meridian_projects_onto_negative_y_axis() {
        let reprojector = Reprojector::new().unwrap();
        // lon_0 = -45: points on that meridian have x == 0 and y < 0
        let (x, y) = reprojector.point_to_polar(-45.0, 70.0).unwrap();
        assert_abs_diff_eq!(x, 0.0, epsilon = 1e-3);
        assert!(y < 0.0);
    }

    #[test]
    fn test_pole_is_origin() {
        let reprojector = Reprojector::new().unwrap();
        let (x, y) = reprojector.point_to_polar(-45.0, 90.0).unwrap();
        assert_abs_diff_eq!(x, 0.0, epsilon = 1e-3);
        assert_abs_diff_eq!(y, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_roundtrip_greenland_point() {
        let reprojector = Reprojector::new().unwrap();
        let (x, y) = reprojector.point_to_polar(-51.1, 69.2).unwrap();
        let (lon, lat) = reprojector.point_to_geographic(x, y).unwrap();
        assert_abs_diff_eq!(lon, -51.1, epsilon = 1e-6);
        assert_abs_diff_eq!(lat, 69.2, epsilon = 1e-6);
    }

    #[test]
    fn test_polar_to_polar_is_identity() {
        let reprojector = Reprojector::new().unwrap();
        let square = MultiPolygon(vec![polygon![
            (x: -0.5, y: -0.5),
            (x: 0.5, y: -0.5),
            (x: 0.5, y: 0.5),
            (x: -0.5, y: 0.5),
        ]]);
        let projected = reprojector.to_polar(&square, Crs::Polar).unwrap();
        assert_eq!(projected, square);
    }
}
