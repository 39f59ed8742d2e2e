//! Country outline from the zipped Natural Earth admin-0 shapefile.

use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use geo::MultiPolygon;
use shapefile::dbase::{self, FieldValue};
use shapefile::ShapeReader;

use crate::shapes::shape_to_polygons;
use iceage_core::{Error, Result};

/// Attribute holding the country name.
pub const NAME_FIELD: &str = "NAME";

/// Outline (EPSG:4326) of the country whose `NAME` equals `name`.
pub fn load_country_outline(archive_path: &Path, name: &str) -> Result<MultiPolygon<f64>> {
    let file = File::open(archive_path).map_err(|e| Error::io_with_path(e, archive_path))?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| Error::archive(archive_path, e))?;

    let shp = read_member(&mut archive, archive_path, ".shp")?;
    let dbf = read_member(&mut archive, archive_path, ".dbf")?;

    let shapes = ShapeReader::new(Cursor::new(shp))
        .and_then(|reader| reader.read())
        .map_err(|e| Error::shapefile(archive_path, e))?;
    let records = dbase::Reader::new(Cursor::new(dbf))
        .and_then(|mut reader| reader.read())
        .map_err(|e| Error::shapefile(archive_path, e))?;

    let polygons: Vec<_> = shapes
        .iter()
        .zip(records.iter())
        .filter(|(_, record)| match record.get(NAME_FIELD) {
            Some(FieldValue::Character(Some(value))) => value.trim() == name,
            _ => false,
        })
        .flat_map(|(shape, _)| shape_to_polygons(shape))
        .collect();

    if polygons.is_empty() {
        return Err(Error::empty(format!(
            "No '{name}' outline in {}",
            archive_path.display()
        )));
    }
    log::debug!("Loaded {} polygon(s) for {name}", polygons.len());
    Ok(MultiPolygon(polygons))
}

fn read_member<R: Read + std::io::Seek>(
    archive: &mut zip::ZipArchive<R>,
    archive_path: &Path,
    suffix: &str,
) -> Result<Vec<u8>> {
    for i in 0..archive.len() {
        let mut member = archive
            .by_index(i)
            .map_err(|e| Error::archive(archive_path, e))?;
        if member.name().to_ascii_lowercase().ends_with(suffix) {
            let mut bytes = Vec::new();
            member
                .read_to_end(&mut bytes)
                .map_err(|e| Error::io_with_path(e, archive_path))?;
            return Ok(bytes);
        }
    }
    Err(Error::archive(
        archive_path,
        format!("archive has no {suffix} member"),
    ))
}
