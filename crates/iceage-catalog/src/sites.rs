//! Glacier study-site locations.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::table::Table;
use iceage_core::Result;

/// Columns the site-location table must provide.
pub const REQUIRED_COLUMNS: [&str; 5] = ["LAT", "LON", "Official_n", "Glacier_ID", "Region"];

/// One glacier study site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlacierSite {
    /// Short site code, e.g. `KOG`
    pub glacier_id: String,
    /// Official glacier name
    pub official_name: String,
    /// Region code (`SE`, `CE`, `CW`, `NW`, `NE`, `NO`, `SW`)
    pub region: String,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
}

/// Read the site-location table.
pub fn load_sites(path: &Path) -> Result<Vec<GlacierSite>> {
    let table = Table::read(path, &REQUIRED_COLUMNS)?;
    let lat = table.column("LAT")?;
    let lon = table.column("LON")?;
    let name = table.column("Official_n")?;
    let id = table.column("Glacier_ID")?;
    let region = table.column("Region")?;

    table
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| {
            Ok(GlacierSite {
                glacier_id: table.text(row, id).to_string(),
                official_name: table.text(row, name).to_string(),
                region: table.text(row, region).to_string(),
                lat: table.number(i, lat)?,
                lon: table.number(i, lon)?,
            })
        })
        .collect()
}

/// Sorted, de-duplicated site codes.
pub fn site_ids(sites: &[GlacierSite]) -> Vec<String> {
    let mut ids: Vec<String> = sites.iter().map(|s| s.glacier_id.clone()).collect();
    ids.sort();
    ids.dedup();
    ids
}

/// First site with the given code.
pub fn find_site<'a>(sites: &'a [GlacierSite], glacier_id: &str) -> Option<&'a GlacierSite> {
    sites.iter().find(|s| s.glacier_id == glacier_id)
}
