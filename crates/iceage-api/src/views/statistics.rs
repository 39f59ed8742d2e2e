//! Melt-rate statistics: the raw table plus a correlogram of its numeric
//! columns.

use iceage_catalog::meltrates::{EXCLUDED_COLUMNS, NOT_FOUND_MESSAGE};
use iceage_catalog::{list_sites, load_melt_table, melt_table_path, MeltTable};
use iceage_core::{DateRange, Error, Result};
use iceage_render::html::{self, Level, NavItem};
use iceage_render::{render_svg, Correlogram};

use super::{pairings_note, plain_options, section};
use crate::params::Params;
use crate::state::AppState;

const MISSING_INPUTS: &str = "Please provide all inputs: Site Name, Early Date, and Later Date.";

/// Site and dates requested on the statistics page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeltQuery {
    /// Site code
    pub site: String,
    /// Early date as typed
    pub early: String,
    /// Later date as typed
    pub later: String,
}

impl MeltQuery {
    /// Read `site`, `early` and `later`, falling back to the configured
    /// defaults for absent parameters. Cleared fields stay empty.
    pub fn from_params(state: &AppState, params: &Params) -> Self {
        let defaults = &state.config.defaults;
        let site = params
            .raw("site")
            .map(str::to_string)
            .or_else(|| defaults.melt_rate_sites.first().cloned())
            .unwrap_or_default();
        Self {
            site,
            early: params.raw("early").unwrap_or(defaults.early_date.as_str()).to_string(),
            later: params.raw("later").unwrap_or(defaults.later_date.as_str()).to_string(),
        }
    }

    /// Validated date range. Any empty input is [`Error::InvalidDate`].
    pub fn range(&self) -> Result<DateRange> {
        if self.site.is_empty() {
            return Err(Error::invalid_date(MISSING_INPUTS));
        }
        DateRange::parse(&self.early, &self.later)
    }

    /// Site and dates as query pairs for download links.
    pub fn pairs(&self) -> [(&str, &str); 3] {
        [
            ("site", self.site.as_str()),
            ("early", self.early.as_str()),
            ("later", self.later.as_str()),
        ]
    }
}

/// Configured melt-rate sites first, then any other site folder found in
/// the melt-rate directory.
pub fn site_options(state: &AppState) -> Vec<String> {
    let mut sites = state.config.defaults.melt_rate_sites.clone();
    match list_sites(&state.melt_rate_dir()) {
        Ok(found) => {
            for site in found {
                if !sites.contains(&site) {
                    sites.push(site);
                }
            }
        }
        Err(e) => log::debug!("Melt-rate sites not listed: {e}"),
    }
    sites
}

/// Load the melt-rate table for a query.
pub fn load(state: &AppState, query: &MeltQuery) -> Result<MeltTable> {
    let range = query.range()?;
    load_melt_table(&melt_table_path(&state.melt_rate_dir(), &query.site, &range)?)
}

/// Correlogram of the numeric columns left after dropping bookkeeping ones.
pub fn correlogram(table: &MeltTable) -> Result<Correlogram> {
    let columns: Vec<(String, Vec<Option<f64>>)> = table
        .without_columns(&EXCLUDED_COLUMNS)
        .numeric_columns()
        .into_iter()
        .map(|c| (c.name, c.values))
        .collect();
    Correlogram::from_columns(&columns)
}

/// Render the statistics page.
pub fn render(state: &AppState, params: &Params) -> String {
    let query = MeltQuery::from_params(state, params);
    let mut body = String::from("<h1>📊 Iceberg Statistics Dashboard</h1>");
    body.push_str(&pairings_note());
    body.push_str("<h2>Filter</h2>");
    body.push_str(&html::form(
        NavItem::Statistics.path(),
        &[
            html::select("site", "Select Site Name:", &plain_options(&site_options(state)), &query.site),
            html::text_input("early", "Enter Early Date (YYYYMMDD):", &query.early, "YYYYMMDD"),
            html::text_input("later", "Enter Later Date (YYYYMMDD):", &query.later, "YYYYMMDD"),
        ],
    ));
    body.push_str(&results(state, &query));
    html::page("Statistics dashboard", NavItem::Statistics, &body)
}

fn results(state: &AppState, query: &MeltQuery) -> String {
    let table = match load(state, query) {
        Ok(table) => table,
        Err(Error::InvalidDate { message }) => {
            log::debug!("Statistics inputs rejected: {message}");
            let text = if message == MISSING_INPUTS {
                format!("⚠️ {MISSING_INPUTS}")
            } else {
                format!("⚠️ {MISSING_INPUTS} ({message})")
            };
            return html::alert(Level::Warning, &text);
        }
        Err(e) if e.is_not_found() => {
            log::info!("Melt table unavailable: {e}");
            return html::alert(Level::Error, &format!("🚫 {NOT_FOUND_MESSAGE} 🚫"));
        }
        Err(e) => return section(Err(e)),
    };

    let pairs = query.pairs();
    let mut out = String::from("<h3>Iceberg Meltrate Information:</h3>");
    out.push_str(&html::table(&table.headers, &table.rows));
    out.push_str(&html::button_link(&html::href("/statistics/melt.csv", &pairs), "Download .csv file"));

    out.push_str(&format!("<h3>{}</h3>", Correlogram::TITLE));
    out.push_str(&section(
        correlogram(&table).and_then(|c| render_svg(&c)).map(|svg| format!("<figure>{svg}</figure>")),
    ));
    out.push_str(&html::button_link(
        &html::href("/statistics/correlogram.png", &pairs),
        "Download as a .png image",
    ));
    out
}
