//! Server-rendered pages.
//!
//! Each view is a synchronous function from state and query parameters to a
//! complete HTML document. Views run on the blocking pool; a failing section
//! turns into an error box and the rest of the page still renders.

pub mod about;
pub mod home;
pub mod shapes;
pub mod spatial;
pub mod statistics;

use iceage_core::Result;
use iceage_render::html::{self, Level};

/// Link to the shared list of fjord abbreviations and date pairings.
pub(crate) const PAIRINGS_URL: &str =
    "https://docs.google.com/spreadsheets/d/1kCcKqf717kK3_Xx-GDe0f61jhlUpZ5n6BN1qtiw7S4w/edit?gid=0#gid=0";

/// Info box pointing at the abbreviation list.
pub(crate) fn pairings_note() -> String {
    html::alert_html(
        Level::Info,
        &format!(
            "Click here for the <a href=\"{}\" target=\"_blank\">Fjord Abbreviation List &amp; Paired Dates</a>",
            html::escape(PAIRINGS_URL)
        ),
    )
}

/// Markup of a section, or an error box in its place.
pub(crate) fn section(result: Result<String>) -> String {
    result.unwrap_or_else(|e| {
        log::warn!("Section failed: {e}");
        html::alert(Level::Error, &e.to_string())
    })
}

/// `(value, label)` options where both are the value.
pub(crate) fn plain_options<S: AsRef<str>>(values: &[S]) -> Vec<(String, String)> {
    values
        .iter()
        .map(|v| (v.as_ref().to_string(), v.as_ref().to_string()))
        .collect()
}

/// The requested value if it is one of `choices`, else `fallback`, else the
/// first choice.
pub(crate) fn choose(requested: Option<&str>, choices: &[String], fallback: Option<&str>) -> Option<String> {
    requested
        .filter(|r| choices.iter().any(|c| c == r))
        .or_else(|| fallback.filter(|f| choices.iter().any(|c| c == f)))
        .or_else(|| choices.first().map(String::as_str))
        .map(str::to_string)
}
