//! Start page: site map, project overview and data distribution.

use iceage_catalog::{load_country_outline, load_distribution, load_sites};
use iceage_core::{Error, Result};
use iceage_render::html::{self, Level, NavItem};
use iceage_render::{render_svg, DistributionChart, MapView, TileStyle};

use super::{plain_options, section};
use crate::params::Params;
use crate::state::AppState;

/// Country drawn under the site markers.
pub const COUNTRY: &str = "Greenland";

const TITLE_HTML: &str = r#"<h1 style="font-family: 'Bungee Shade', 'Audiowide', sans-serif; font-size: 40px; text-align: center;
background: linear-gradient(90deg, #9c27b0, #e91e63, #ff5722, #ffeb3b); -webkit-background-clip: text; -webkit-text-fill-color: transparent;">
ICE-AGE Innovation: Empowering Iceberg Analysis in Greenland Environments</h1>"#;

/// Render the start page.
pub fn render(state: &AppState, params: &Params) -> String {
    let config = &state.config;
    let style = TileStyle::from_name(params.get("style").unwrap_or(config.map.default_style.as_str()));

    let styles: Vec<&str> = TileStyle::ALL.iter().map(TileStyle::name).collect();
    let mut body = String::from(TITLE_HTML);
    body.push_str(
        "<p>The ICE-AGE catalog is a powerful tool for iceberg research, offering \
         easy access to iceberg identification, metrics, and imagery.</p>",
    );
    body.push_str(&html::form(
        NavItem::Home.path(),
        &[html::select("style", "Select Map Style", &plain_options(&styles), style.name())],
    ));

    body.push_str(&html::expander(
        "🗺️ Map of Greenland with selected study sites",
        &site_map(state, style),
        true,
    ));
    body.push_str("<p>Years represented in study: 2011 - 2023</p>");
    body.push_str(&html::expander(
        "How to access ICE-AGE:",
        "<p>ICE-AGE data will be archived at the Arctic Data Center. Code is available via GitHub, \
         and Zenodo for future growth and automated figure generation.</p>",
        true,
    ));

    body.push_str("<h1>Contents of ICE-AGE application:</h1>");
    body.push_str(&html::expander(
        "📈 Individual Iceberg Metrics",
        "<ul><li>Location, repeat imagery metadata, and identification for iceberg studies.</li>\
         <li>Access code for shapefiles to connect to ICE-AGE metrics.</li>\
         <li>Iceberg size, volume, draft, and submerged area data.</li></ul>",
        true,
    ));
    body.push_str(&html::expander(
        "⏱️ Change Over Time Metrics",
        "<ul><li>Volume change rate and elevation change rate over time.</li></ul>",
        true,
    ));
    body.push_str(&html::expander(
        "🏞️ Regional Iceberg Metrics",
        "<ul><li>Iceberg size distributions across time and location.</li></ul>",
        true,
    ));

    body.push_str(&html::alert(
        Level::Info,
        "ICE-AGE will be under continuous development and growth! Some sites do not have data quite yet, \
         so we appreciate your patience while we work on updating our datasets. The following histogram \
         shows how much data each study site has.",
    ));
    body.push_str(&section(distribution_figure(state)));

    html::page("Home", NavItem::Home, &body)
}

/// Site markers over the country outline. A missing outline only costs the
/// outline; a broken site table costs the whole map.
fn site_map(state: &AppState, style: TileStyle) -> String {
    let catalog = &state.config.catalog;
    let sites = match load_sites(&catalog.glacier_locations_path()) {
        Ok(sites) => sites,
        Err(e) => {
            log::warn!("Site map unavailable: {e}");
            return html::alert(
                Level::Error,
                &format!("An error occurred while loading the CSV file: {e}"),
            );
        }
    };

    let map_config = &state.config.map;
    let mut map = MapView::new(map_config.center, map_config.zoom, style);
    let mut notes = String::new();
    match load_country_outline(&catalog.natural_earth_path(), COUNTRY) {
        Ok(outline) => map.add_country(COUNTRY, &outline),
        Err(e) => {
            log::warn!("Country outline unavailable: {e}");
            notes = html::alert(Level::Warning, &format!("Country outline unavailable: {e}"));
        }
    }
    for site in &sites {
        map.add_site(site.lat, site.lon, &site.official_name, &site.region);
    }
    section(map.to_html("site-map").map(|m| notes + &m))
}

fn distribution_figure(state: &AppState) -> Result<String> {
    let rows = load_distribution(&state.config.catalog.distribution_path()).map_err(|e| match e {
        Error::MissingColumns { .. } => Error::empty(
            "The required columns ('Official_n' and 'Corresponding icebergs') are not in the CSV file.",
        ),
        other => other,
    })?;
    let chart = DistributionChart::new(rows.into_iter().map(|r| (r.official_name, r.icebergs)))?;
    Ok(format!("<figure>{}</figure>", render_svg(&chart)?))
}
