//! Per-site iceberg counts shown on the home page histogram.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::table::Table;
use iceage_core::Result;

/// Site name column.
pub const NAME_COLUMN: &str = "Official_n";
/// Iceberg count column.
pub const COUNT_COLUMN: &str = "Corresponding icebergs";

/// Number of catalogued icebergs for one site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteDistribution {
    /// Official glacier name
    pub official_name: String,
    /// Iceberg count
    pub icebergs: f64,
}

/// Read the date-pairing table, sorted ascending by iceberg count.
///
/// Rows without a count are skipped.
pub fn load_distribution(path: &Path) -> Result<Vec<SiteDistribution>> {
    let table = Table::read(path, &[NAME_COLUMN, COUNT_COLUMN])?;
    let name = table.column(NAME_COLUMN)?;
    let count = table.column(COUNT_COLUMN)?;

    let mut rows = Vec::with_capacity(table.rows().len());
    for (i, row) in table.rows().iter().enumerate() {
        if table.text(row, count).is_empty() {
            log::warn!(
                "{}: row {} has no '{COUNT_COLUMN}' value, skipping",
                path.display(),
                i + 1
            );
            continue;
        }
        rows.push(SiteDistribution {
            official_name: table.text(row, name).to_string(),
            icebergs: table.number(i, count)?,
        });
    }

    rows.sort_by(|a, b| a.icebergs.total_cmp(&b.icebergs));
    Ok(rows)
}
