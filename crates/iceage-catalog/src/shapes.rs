//! Iceberg outline shapefiles.
//!
//! Each `.shp` file in a date-range folder holds one delineated iceberg at
//! one acquisition date. Outlines are returned in EPSG:3413 metres.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use geo::{Coord, LineString, MultiPolygon, Polygon};
use shapefile::{PolygonRing, Shape, ShapeReader};

use iceage_core::{Error, Result};
use iceage_geo::{Crs, Reprojector};

/// One iceberg outline.
#[derive(Debug, Clone, PartialEq)]
pub struct IcebergShape {
    /// Shapefile name, e.g. `KOG_20170515_07.shp`
    pub name: String,
    /// Outline in EPSG:3413 metres
    pub geometry: MultiPolygon<f64>,
}

impl IcebergShape {
    /// Whether the file name carries the given `YYYYMMDD` date.
    pub fn is_from(&self, date: &str) -> bool {
        self.name.contains(date)
    }
}

/// Read one shapefile and reproject it to EPSG:3413.
///
/// The CRS comes from the `.prj` sidecar; without one the file is assumed to
/// be in EPSG:3413 already.
pub fn load_shape(path: &Path, reprojector: &Reprojector) -> Result<IcebergShape> {
    let file = File::open(path).map_err(|e| Error::io_with_path(e, path))?;
    let geometry = read_polygons(BufReader::new(file), path)?;

    let crs = source_crs(path)?;
    let geometry = reprojector.to_polar(&geometry, crs)?;

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    log::debug!(
        "Loaded {name}: {} polygon(s) from EPSG:{}",
        geometry.0.len(),
        crs.epsg()
    );
    Ok(IcebergShape { name, geometry })
}

/// Load the named shapefiles from `dir`, dropping those with no geometry.
pub fn load_shapes(dir: &Path, names: &[String], reprojector: &Reprojector) -> Result<Vec<IcebergShape>> {
    let mut shapes = Vec::with_capacity(names.len());
    for name in names {
        let shape = load_shape(&dir.join(name), reprojector)?;
        if shape.geometry.0.is_empty() {
            log::warn!("{name} contains no polygons, skipping");
            continue;
        }
        shapes.push(shape);
    }
    Ok(shapes)
}

/// Decode all polygon records of a `.shp` stream into one multipolygon.
pub(crate) fn read_polygons<R: Read + Seek>(source: R, path: &Path) -> Result<MultiPolygon<f64>> {
    let reader = ShapeReader::new(source).map_err(|e| Error::shapefile(path, e))?;
    let shapes = reader.read().map_err(|e| Error::shapefile(path, e))?;
    Ok(MultiPolygon(
        shapes.iter().flat_map(shape_to_polygons).collect(),
    ))
}

/// Polygons of a single shape record; non-polygon records yield nothing.
pub(crate) fn shape_to_polygons(shape: &Shape) -> Vec<Polygon<f64>> {
    match shape {
        Shape::Polygon(p) => group_rings(p.rings(), |pt| Coord { x: pt.x, y: pt.y }),
        Shape::PolygonM(p) => group_rings(p.rings(), |pt| Coord { x: pt.x, y: pt.y }),
        Shape::PolygonZ(p) => group_rings(p.rings(), |pt| Coord { x: pt.x, y: pt.y }),
        _ => Vec::new(),
    }
}

/// Outer rings start a polygon; inner rings become holes of the most recent
/// one. An inner ring with no preceding outer ring is promoted to an outer.
fn group_rings<P>(rings: &[PolygonRing<P>], coord: impl Fn(&P) -> Coord<f64>) -> Vec<Polygon<f64>> {
    let mut polygons: Vec<(LineString<f64>, Vec<LineString<f64>>)> = Vec::new();
    for ring in rings {
        let line: LineString<f64> = ring.points().iter().map(&coord).collect();
        match ring {
            PolygonRing::Inner(_) if !polygons.is_empty() => {
                if let Some((_, holes)) = polygons.last_mut() {
                    holes.push(line);
                }
            }
            _ => polygons.push((line, Vec::new())),
        }
    }
    polygons
        .into_iter()
        .map(|(exterior, holes)| Polygon::new(exterior, holes))
        .collect()
}

fn source_crs(shp: &Path) -> Result<Crs> {
    let prj = shp.with_extension("prj");
    if !prj.is_file() {
        return Ok(Crs::Polar);
    }
    let wkt = std::fs::read_to_string(&prj).map_err(|e| Error::io_with_path(e, &prj))?;
    Ok(Crs::from_wkt(&wkt))
}
