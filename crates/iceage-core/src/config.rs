//! Configuration for the dashboard.
//!
//! Resolution order for the config file:
//!
//! 1. An explicit path (`--config`)
//! 2. The `ICEAGE_CONFIG` environment variable
//! 3. `<platform config dir>/iceage/config.toml`
//!
//! When no file exists the built-in defaults are used. Environment overrides
//! (`ICEAGE_CATALOG_ROOT`, `ICEAGE_HOST`, `ICEAGE_PORT`) are applied last.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use crate::{Error, Result};

/// Project name used for config directories and env-var prefixes.
pub const PROJECT_NAME: &str = "iceage";

/// Environment variable pointing at a config file.
pub const CONFIG_ENV: &str = "ICEAGE_CONFIG";

// ============================================================================
// ConfigManager
// ============================================================================

/// Loading, locating and exporting a TOML configuration type.
pub trait ConfigManager: Serialize + DeserializeOwned + Default {
    /// Project name, used for the config directory and messages.
    fn project_name() -> &'static str;

    /// Apply environment-variable overrides after loading.
    fn apply_env_overrides(&mut self) -> Result<()> {
        Ok(())
    }

    /// Flatten the configuration into `KEY=value` pairs.
    fn to_env_vars(&self) -> Result<Vec<(String, String)>>;

    /// Default config file location for this platform.
    fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::project_name()).join("config.toml"))
    }

    /// Resolve which config file would be used.
    fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !path.is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        Self::default_config_path()
    }

    /// Load the configuration, falling back to defaults when no file exists.
    ///
    /// An explicitly named file that does not exist is an error.
    fn load(explicit: Option<&str>) -> Result<Self> {
        let mut config = match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) if explicit.is_some() => {
                return Err(Error::config(format!(
                    "Config file does not exist at {}",
                    path.display()
                )));
            }
            _ => {
                log::debug!("No config file found, using defaults");
                Self::default()
            }
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse a config file.
    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        log::debug!("Loading config from {}", path.display());
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Serialize to pretty TOML.
    fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}

// ============================================================================
// IceageConfig
// ============================================================================

/// Top-level dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IceageConfig {
    /// Where the catalog files live
    pub catalog: CatalogConfig,
    /// HTTP listener
    pub server: ServerConfig,
    /// Map presentation
    pub map: MapConfig,
    /// Initial values for page inputs
    pub defaults: DefaultsConfig,
    /// Image gallery entries
    pub gallery: Vec<GalleryImage>,
}

/// Paths of the catalog files, relative to `root` unless absolute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalog root directory
    pub root: PathBuf,
    /// Site-location table (`LAT, LON, Official_n, Glacier_ID, Region`)
    pub glacier_locations: PathBuf,
    /// Per-site iceberg counts (`Official_n`, `Corresponding icebergs`)
    pub distribution: PathBuf,
    /// Natural Earth country outlines (zipped shapefile)
    pub natural_earth: PathBuf,
    /// `<site>/<early>-<later>/*.shp` tree
    pub shapefiles: PathBuf,
    /// `<site>/<early>-<later>/<site>_<early>-<later>_iceberg_meltinfo.csv` tree
    pub melt_rates: PathBuf,
    /// Gallery and acknowledgement images
    pub images: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("catalog-data"),
            glacier_locations: PathBuf::from("Glacier-Locations.csv"),
            distribution: PathBuf::from("abbreviations-datepairings.csv"),
            natural_earth: PathBuf::from("ne_110m_admin_0_countries.zip"),
            shapefiles: PathBuf::from("iceberg-shapefiles"),
            melt_rates: PathBuf::from("Melt-rates"),
            images: PathBuf::from("images"),
        }
    }
}

impl CatalogConfig {
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Resolved site-location table path.
    pub fn glacier_locations_path(&self) -> PathBuf {
        self.resolve(&self.glacier_locations)
    }

    /// Resolved iceberg-count table path.
    pub fn distribution_path(&self) -> PathBuf {
        self.resolve(&self.distribution)
    }

    /// Resolved Natural Earth archive path.
    pub fn natural_earth_path(&self) -> PathBuf {
        self.resolve(&self.natural_earth)
    }

    /// Resolved shapefile catalog directory.
    pub fn shapefile_dir(&self) -> PathBuf {
        self.resolve(&self.shapefiles)
    }

    /// Resolved melt-rate directory.
    pub fn melt_rate_dir(&self) -> PathBuf {
        self.resolve(&self.melt_rates)
    }

    /// Resolved image directory.
    pub fn image_dir(&self) -> PathBuf {
        self.resolve(&self.images)
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
        }
    }
}

/// Map presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Tile style preselected on the home map
    pub default_style: String,
    /// Initial map centre (lat, lon)
    pub center: (f64, f64),
    /// Initial zoom
    pub zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_style: "CartoDB positron".to_string(),
            center: (72.0, -40.0),
            zoom: 4,
        }
    }
}

/// Initial values for page inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Site preselected on the spatial-distribution page
    pub spatial_site: String,
    /// Early date preselected on date inputs
    pub early_date: String,
    /// Later date preselected on date inputs
    pub later_date: String,
    /// Sites offered on the statistics page when the melt-rate tree cannot be listed
    pub melt_rate_sites: Vec<String>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            spatial_site: "NOG".to_string(),
            early_date: "20170515".to_string(),
            later_date: "20170611".to_string(),
            melt_rate_sites: vec!["KOG".to_string(), "SEK".to_string(), "ASG".to_string()],
        }
    }
}

/// One image shown in the gallery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    /// File name inside the image directory
    pub file: String,
    /// Caption shown under the image
    pub caption: String,
}

impl ConfigManager for IceageConfig {
    fn project_name() -> &'static str {
        PROJECT_NAME
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(root) = std::env::var("ICEAGE_CATALOG_ROOT") {
            self.catalog.root = PathBuf::from(root);
        }
        if let Ok(host) = std::env::var("ICEAGE_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("ICEAGE_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| Error::config(format!("ICEAGE_PORT '{port}': {e}")))?;
        }
        Ok(())
    }

    fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        Ok(vec![
            (
                "ICEAGE_CATALOG_ROOT".to_string(),
                self.catalog.root.display().to_string(),
            ),
            ("ICEAGE_HOST".to_string(), self.server.host.clone()),
            ("ICEAGE_PORT".to_string(), self.server.port.to_string()),
        ])
    }
}

impl IceageConfig {
    /// Gallery entries, falling back to the bundled field photographs.
    pub fn gallery_images(&self) -> Vec<GalleryImage> {
        if !self.gallery.is_empty() {
            return self.gallery.clone();
        }
        default_gallery()
    }
}

fn default_gallery() -> Vec<GalleryImage> {
    let entries: [(&str, &str); 8] = [
        (
            "Ice-bridge.png",
            "Surprising iceberg shapes drift in the coastal waters near Ilulissat, Greenland. Credit: Twila Moon, NSIDC",
        ),
        (
            "Icebergs.png",
            "An iceberg drifts in the sea off the coast of Ilulissat, Greenland. Credit: Twila Moon, NSIDC",
        ),
        (
            "Sunset-icebergs.png",
            "Icebergs crowd the waters along the northwestern Greenland coast. Credit: Twila Moon, NSIDC",
        ),
        (
            "Glacier-iceberg.png",
            "Iceberg in Kongsfjord, Svalbard. Credit: Allen Pope, NSIDC",
        ),
        (
            "Swirly-iceberg.png",
            "A sculpted Iceberg drifts off of Baffin Island, Nunavut. Icebergs form when chunks of ice calve, or break off, from glaciers, ice shelves, or a larger iceberg. The North Atlantic and the cold waters surrounding Antarctica are home to most of the icebergs on Earth. Credit: Shari Fox, NSIDC",
        ),
        ("Beautiful-icebergs.png", "Credit: Twila Moon, NSIDC"),
        (
            "aerial-shot.png",
            "Low-angled sunlight illuminates Antarctica's Matusevich Glacier in this image from September 6, 2010. The image was acquired by the Advanced Land Imager (ALI) on NASA's Earth Observing-1 (EO-1) satellite, and it shows a deeply crevassed glacier breaking apart amid ocean waves. Credit: NASA",
        ),
        (
            "aerial-iceborgs.png",
            "Aerial view of icebergs in the sea ice near Qaanaaq, Greenland. Icebergs form when chunks of ice calve, or break off, from glaciers, ice shelves, or a larger iceberg. The North Atlantic and the cold waters surrounding Antarctica are home to most of the icebergs on Earth. Credit: Shari Fox, NSIDC",
        ),
    ];
    entries
        .into_iter()
        .map(|(file, caption)| GalleryImage {
            file: file.to_string(),
            caption: caption.to_string(),
        })
        .collect()
}
