//! Per-iceberg melt-rate tables.

use std::path::Path;

use serde::Serialize;

use crate::table::{to_csv_string, Table};
use iceage_core::Result;

/// Bookkeeping columns left out of the correlogram.
pub const EXCLUDED_COLUMNS: [&str; 7] = [
    "X_i",
    "Y_i",
    "TimeSeparation",
    "VerticalAdjustment_i",
    "VerticalAdjustment_f",
    "Density_i",
    "Density_f",
];

/// File name offered for the table download.
pub const DOWNLOAD_NAME: &str = "iceberg_melt_rates.csv";

/// A melt-rate table kept as text; numeric columns are found on demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeltTable {
    /// Column names
    pub headers: Vec<String>,
    /// Cell text, row-major
    pub rows: Vec<Vec<String>>,
}

/// A column whose non-empty cells all parse as numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericColumn {
    /// Column name
    pub name: String,
    /// One value per row; empty cells are `None`
    pub values: Vec<Option<f64>>,
}

/// Message shown when a melt-rate table is absent.
pub const NOT_FOUND_MESSAGE: &str = "CSV file not found. Please check your inputs!";

/// Read a melt-rate table. A missing file is
/// [`iceage_core::Error::MissingFile`].
pub fn load_melt_table(path: &Path) -> Result<MeltTable> {
    let (headers, records) = Table::read(path, &[])?.into_parts();
    let rows = records
        .iter()
        .map(|r| r.iter().map(str::to_string).collect())
        .collect();
    Ok(MeltTable { headers, rows })
}

impl MeltTable {
    /// A copy without the named columns (absent names are ignored).
    pub fn without_columns(&self, drop: &[&str]) -> MeltTable {
        let keep: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !drop.contains(&h.as_str()))
            .map(|(i, _)| i)
            .collect();
        MeltTable {
            headers: keep.iter().map(|&i| self.headers[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| {
                    keep.iter()
                        .map(|&i| row.get(i).cloned().unwrap_or_default())
                        .collect()
                })
                .collect(),
        }
    }

    /// Columns whose non-empty cells all parse as `f64` and that have at
    /// least one value.
    pub fn numeric_columns(&self) -> Vec<NumericColumn> {
        self.headers
            .iter()
            .enumerate()
            .filter_map(|(i, name)| {
                let mut values = Vec::with_capacity(self.rows.len());
                for row in &self.rows {
                    let cell = row.get(i).map(|s| s.trim()).unwrap_or("");
                    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") {
                        values.push(None);
                    } else {
                        values.push(Some(cell.parse::<f64>().ok()?));
                    }
                }
                values.iter().any(Option::is_some).then(|| NumericColumn {
                    name: name.clone(),
                    values,
                })
            })
            .collect()
    }

    /// Serialise back to CSV.
    pub fn to_csv(&self) -> Result<String> {
        to_csv_string(DOWNLOAD_NAME, &self.headers, &self.rows)
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
