//! Directory layout of the catalog.
//!
//! ```text
//! iceberg-shapefiles/<site>/<early>-<later>/*.shp
//! Melt-rates/<site>/<early>-<later>/<site>_<early>-<later>_iceberg_meltinfo.csv
//! ```

use std::path::{Component, Path, PathBuf};

use iceage_core::{DateRange, Error, Result};

/// Accept `name` only if it is one plain path component.
///
/// Site codes and folder names arrive from URLs and query strings; anything
/// with a separator, `.`, `..` or a root would resolve outside the catalog.
pub fn checked_name(name: &str) -> Result<&str> {
    let mut components = Path::new(name).components();
    let plain = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !plain || name.contains(['/', '\\']) {
        return Err(Error::invalid_name(name));
    }
    Ok(name)
}

/// Directory of one site under a catalog root.
pub fn site_dir(root: &Path, site: &str) -> Result<PathBuf> {
    Ok(root.join(checked_name(site)?))
}

/// Sorted names of the sub-directories of `root` (one per site).
pub fn list_sites(root: &Path) -> Result<Vec<String>> {
    if !root.is_dir() {
        return Err(Error::missing_directory(root));
    }
    let mut names = Vec::new();
    for entry in std::fs::read_dir(root).map_err(|e| Error::io_with_path(e, root))? {
        let entry = entry.map_err(|e| Error::io_with_path(e, root))?;
        if entry.path().is_dir() {
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Date-range folders available for a site, sorted by folder name.
///
/// A missing site directory yields an empty list. Folders whose names do not
/// parse as `<YYYYMMDD>-<YYYYMMDD>` are skipped.
pub fn list_date_ranges(root: &Path, site: &str) -> Result<Vec<DateRange>> {
    let site_dir = site_dir(root, site)?;
    if !site_dir.is_dir() {
        log::debug!("No site directory at {}", site_dir.display());
        return Ok(Vec::new());
    }

    let mut folders = Vec::new();
    for entry in std::fs::read_dir(&site_dir).map_err(|e| Error::io_with_path(e, &site_dir))? {
        let entry = entry.map_err(|e| Error::io_with_path(e, &site_dir))?;
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if !name.contains('-') || !entry.path().is_dir() {
            continue;
        }
        folders.push(name);
    }
    folders.sort();

    Ok(folders
        .into_iter()
        .filter_map(|name| match DateRange::from_folder_name(&name) {
            Ok(range) => Some(range),
            Err(e) => {
                log::warn!("Skipping folder '{name}' under {}: {e}", site_dir.display());
                None
            }
        })
        .collect())
}

/// Directory holding one site's observations for a date range.
pub fn date_range_dir(root: &Path, site: &str, range: &DateRange) -> Result<PathBuf> {
    Ok(site_dir(root, site)?.join(range.folder_name()))
}

/// Sorted `.shp` file names for a site and date range.
///
/// A directory that does not exist yields an empty list rather than an error.
pub fn list_shapefiles(root: &Path, site: &str, range: &DateRange) -> Result<Vec<String>> {
    let dir = date_range_dir(root, site, range)?;
    if !dir.is_dir() {
        log::debug!("No shapefile directory at {}", dir.display());
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(&dir).map_err(|e| Error::io_with_path(e, &dir))? {
        let entry = entry.map_err(|e| Error::io_with_path(e, &dir))?;
        let path = entry.path();
        let is_shp = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("shp"));
        if is_shp && path.is_file() {
            if let Some(name) = entry.file_name().to_str() {
                files.push(name.to_string());
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Path of a melt-rate table.
pub fn melt_table_path(root: &Path, site: &str, range: &DateRange) -> Result<PathBuf> {
    let folder = range.folder_name();
    Ok(date_range_dir(root, site, range)?.join(format!("{site}_{folder}_iceberg_meltinfo.csv")))
}
