//! Date-range handling for catalog folders.
//!
//! Catalog folders are named `<early>-<later>` where both halves are
//! `YYYYMMDD` dates, e.g. `20170515-20170611`.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Format of a single catalog date.
pub const DATE_FORMAT: &str = "%Y%m%d";

/// A pair of acquisition dates bracketing one set of iceberg observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// Earlier acquisition date
    pub early: NaiveDate,
    /// Later acquisition date
    pub later: NaiveDate,
}

impl DateRange {
    /// Parse two user-supplied `YYYYMMDD` strings.
    ///
    /// Empty inputs, malformed dates and an early date after the later date
    /// are all rejected with a message suitable for display.
    pub fn parse(early: &str, later: &str) -> Result<Self> {
        let early = early.trim();
        let later = later.trim();
        if early.is_empty() || later.is_empty() {
            return Err(Error::invalid_date(
                "Please provide all inputs: Site Name, Early Date, and Later Date.",
            ));
        }

        let early = parse_date(early)?;
        let later = parse_date(later)?;
        if early > later {
            return Err(Error::invalid_date(format!(
                "early date {} is after later date {}",
                early.format(DATE_FORMAT),
                later.format(DATE_FORMAT)
            )));
        }

        Ok(Self { early, later })
    }

    /// Parse a folder name of the form `<early>-<later>`.
    pub fn from_folder_name(name: &str) -> Result<Self> {
        let (early, later) = name
            .split_once('-')
            .ok_or_else(|| Error::invalid_date(format!("'{name}' is not <early>-<later>")))?;
        Self::parse(early, later)
    }

    /// Early date as `YYYYMMDD`.
    pub fn early_str(&self) -> String {
        self.early.format(DATE_FORMAT).to_string()
    }

    /// Later date as `YYYYMMDD`.
    pub fn later_str(&self) -> String {
        self.later.format(DATE_FORMAT).to_string()
    }

    /// Folder name `<early>-<later>`.
    pub fn folder_name(&self) -> String {
        format!("{}-{}", self.early_str(), self.later_str())
    }

    /// Number of days between the two acquisitions.
    pub fn days(&self) -> i64 {
        (self.later - self.early).num_days()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.early_str(), self.later_str())
    }
}

impl FromStr for DateRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_folder_name(s)
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::invalid_date(format!("'{s}' is not in YYYYMMDD format")));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| Error::invalid_date(format!("'{s}' is not a calendar date ({e})")))
}
