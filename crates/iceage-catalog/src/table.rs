//! Header-checked CSV reading shared by the catalog tables.

use std::path::{Path, PathBuf};

use csv::StringRecord;

use iceage_core::{Error, Result};

/// A CSV file read into memory with its header row.
#[derive(Debug, Clone)]
pub struct Table {
    path: PathBuf,
    headers: Vec<String>,
    rows: Vec<StringRecord>,
}

impl Table {
    /// Read a CSV file and check that every `required` column is present.
    ///
    /// Rows may be ragged: short rows are padded with empty cells and cells
    /// past the last header are dropped, so every row has one cell per column.
    pub fn read(path: &Path, required: &[&str]) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::missing_file(path));
        }
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| Error::csv(path, e))?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| Error::csv(path, e))?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();

        let missing: Vec<String> = required
            .iter()
            .filter(|name| !headers.iter().any(|h| h == *name))
            .map(|name| (*name).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingColumns {
                path: path.to_path_buf(),
                missing,
            });
        }

        let width = headers.len();
        let rows = reader
            .records()
            .map(|record| record.map(|r| fit_width(r, width)))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::csv(path, e))?;
        log::debug!("Read {} rows from {}", rows.len(), path.display());

        Ok(Self {
            path: path.to_path_buf(),
            headers,
            rows,
        })
    }

    /// Column names in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows.
    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    /// Consume the table into headers and rows.
    pub fn into_parts(self) -> (Vec<String>, Vec<StringRecord>) {
        (self.headers, self.rows)
    }

    /// Position of a column. Callers pass names checked in [`Table::read`].
    pub fn column(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::MissingColumns {
                path: self.path.clone(),
                missing: vec![name.to_string()],
            })
    }

    /// Text of a cell (empty when the row is short).
    pub fn text<'a>(&self, row: &'a StringRecord, column: usize) -> &'a str {
        row.get(column).unwrap_or("")
    }

    /// Parse a cell as `f64`, reporting the row and column on failure.
    pub fn number(&self, row_index: usize, column: usize) -> Result<f64> {
        let value = self
            .rows
            .get(row_index)
            .and_then(|r| r.get(column))
            .unwrap_or("");
        value.parse::<f64>().map_err(|_| Error::InvalidValue {
            path: self.path.clone(),
            row: row_index + 1,
            column: self.headers.get(column).cloned().unwrap_or_default(),
            value: value.to_string(),
        })
    }
}

fn fit_width(record: StringRecord, width: usize) -> StringRecord {
    if record.len() == width {
        return record;
    }
    let mut fitted: StringRecord = record.iter().take(width).collect();
    while fitted.len() < width {
        fitted.push_field("");
    }
    fitted
}

/// Serialise a header row and string rows as CSV text. `name` labels errors.
pub fn to_csv_string<H: AsRef<[u8]>>(name: &str, headers: &[H], rows: &[Vec<String>]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let to_err = |e: csv::Error| Error::csv(name, e);
    writer.write_record(headers).map_err(to_err)?;
    for row in rows {
        writer.write_record(row).map_err(to_err)?;
    }
    let bytes = writer.into_inner().map_err(|e| Error::csv(name, e.error()))?;
    String::from_utf8(bytes).map_err(|e| Error::csv(name, e))
}
