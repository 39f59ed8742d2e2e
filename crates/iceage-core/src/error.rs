//! Error types for the ICE-AGE catalog.
//!
//! Every failure a page can hit ends up here. None of them are fatal to the
//! server: the HTTP layer turns each one into a message for the user and skips
//! the affected section.

use std::path::{Path, PathBuf};

/// Errors that can occur while reading or rendering catalog data.
///
/// All error variants are marked with `#[non_exhaustive]` to allow
/// adding new error types without breaking changes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An expected input file does not exist.
    #[error("File not found: {}", path.display())]
    MissingFile {
        /// Path that was looked up
        path: PathBuf,
    },

    /// A table is missing one or more required columns.
    #[error("{} must contain the following columns: {}", path.display(), missing.join(", "))]
    MissingColumns {
        /// Table that was read
        path: PathBuf,
        /// Required column names that were absent
        missing: Vec<String>,
    },

    /// A site or date-range directory does not exist.
    #[error("Directory '{}' does not exist. Please check the dates and site name.", path.display())]
    MissingDirectory {
        /// Directory that was looked up
        path: PathBuf,
    },

    /// A lookup produced nothing to show.
    #[error("{what}")]
    EmptyResult {
        /// Description of what was empty
        what: String,
    },

    /// A cell could not be interpreted.
    #[error("Invalid value '{value}' in column '{column}' (row {row}) of {}", path.display())]
    InvalidValue {
        /// Table that was read
        path: PathBuf,
        /// One-based data row number
        row: usize,
        /// Column name
        column: String,
        /// Offending text
        value: String,
    },

    /// A site or folder name is not a single plain path component.
    #[error("Invalid catalog name '{name}'")]
    InvalidName {
        /// Name as received
        name: String,
    },

    /// A date input is not a valid `YYYYMMDD` date or the range is inverted.
    #[error("Invalid date input: {message}")]
    InvalidDate {
        /// What went wrong
        message: String,
    },

    /// I/O error with the path that triggered it.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error.
    #[error("CSV error in {}: {message}", path.display())]
    Csv {
        /// Table being parsed
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Shapefile decoding error.
    #[error("Shapefile error in {}: {message}", path.display())]
    Shapefile {
        /// Shapefile being decoded
        path: PathBuf,
        /// Decoder message
        message: String,
    },

    /// Archive (zip) error.
    #[error("Archive error in {}: {message}", path.display())]
    Archive {
        /// Archive being read
        path: PathBuf,
        /// Archive reader message
        message: String,
    },

    /// Coordinate reprojection error.
    #[error("Projection error: {message}")]
    Projection {
        /// What failed
        message: String,
    },

    /// Figure or map rendering error.
    #[error("Render error: {message}")]
    Render {
        /// What failed
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },
}

/// Convenience `Result` type alias for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns whether this error means "the requested input is not there".
    ///
    /// The HTTP layer maps these to 404 for downloads.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::MissingFile { .. } | Error::MissingDirectory { .. } | Error::EmptyResult { .. }
        )
    }

    /// Creates a missing-file error.
    pub fn missing_file(path: impl AsRef<Path>) -> Self {
        Error::MissingFile {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Creates a missing-directory error.
    pub fn missing_directory(path: impl AsRef<Path>) -> Self {
        Error::MissingDirectory {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Creates an empty-result error.
    pub fn empty<S: Into<String>>(what: S) -> Self {
        Error::EmptyResult { what: what.into() }
    }

    /// Creates an I/O error tagged with the path being accessed.
    ///
    /// `NotFound` is reported as [`Error::MissingFile`].
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::missing_file(path);
        }
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a CSV error.
    pub fn csv(path: impl AsRef<Path>, source: impl std::fmt::Display) -> Self {
        Error::Csv {
            path: path.as_ref().to_path_buf(),
            message: source.to_string(),
        }
    }

    /// Creates a shapefile decoding error.
    pub fn shapefile(path: impl AsRef<Path>, source: impl std::fmt::Display) -> Self {
        Error::Shapefile {
            path: path.as_ref().to_path_buf(),
            message: source.to_string(),
        }
    }

    /// Creates an archive error.
    pub fn archive(path: impl AsRef<Path>, source: impl std::fmt::Display) -> Self {
        Error::Archive {
            path: path.as_ref().to_path_buf(),
            message: source.to_string(),
        }
    }

    /// Creates an invalid-name error.
    pub fn invalid_name<S: Into<String>>(name: S) -> Self {
        Error::InvalidName { name: name.into() }
    }

    /// Creates a date validation error.
    pub fn invalid_date<S: Into<String>>(message: S) -> Self {
        Error::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates a projection error.
    pub fn projection<S: Into<String>>(message: S) -> Self {
        Error::Projection {
            message: message.into(),
        }
    }

    /// Creates a rendering error.
    pub fn render<S: Into<String>>(message: S) -> Self {
        Error::Render {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}
