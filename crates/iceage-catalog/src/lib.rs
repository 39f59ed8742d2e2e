//! Readers for the ICE-AGE catalog.
//!
//! The catalog is a read-only tree of CSV tables and ESRI shapefiles. Every
//! reader opens its files per call and returns owned values; nothing is
//! cached between requests.
//!
//! - [`sites`]: glacier study-site locations
//! - [`distribution`]: iceberg counts per site
//! - [`layout`]: `<site>/<early>-<later>` directory enumeration
//! - [`shapes`]: iceberg outline shapefiles
//! - [`basemap`]: Natural Earth country outline
//! - [`meltrates`]: melt-rate tables

pub mod basemap;
pub mod distribution;
pub mod layout;
pub mod meltrates;
pub mod shapes;
pub mod sites;
mod table;

pub use basemap::load_country_outline;
pub use distribution::{load_distribution, SiteDistribution};
pub use layout::{checked_name, date_range_dir, list_date_ranges, list_shapefiles, list_sites, melt_table_path};
pub use meltrates::{load_melt_table, MeltTable, NumericColumn};
pub use shapes::{load_shape, load_shapes, IcebergShape};
pub use sites::{find_site, load_sites, site_ids, GlacierSite};
pub use table::to_csv_string;
