//! Spatial distribution map for one site and date range.

use iceage_catalog::{find_site, list_date_ranges, list_shapefiles, load_country_outline, load_sites, site_ids};
use iceage_core::{DateRange, Error, Result};
use iceage_geo::{dominant_angle_multi, summarize, Reprojector};
use iceage_render::html::{self, Level, NavItem};
use iceage_render::{palette, IcebergPopup, MapView, TileStyle};

use super::home::COUNTRY;
use super::shapes::load_range_shapes;
use super::{choose, pairings_note, plain_options, section};
use crate::params::Params;
use crate::state::AppState;

/// Zoom level of the site view before the iceberg layer is fitted.
pub const SITE_ZOOM: u8 = 11;

/// How icebergs are picked for the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotMode {
    /// Every shapefile of the date range
    All,
    /// Only the shapefiles named by `select`
    Specific,
}

impl PlotMode {
    const OPTIONS: [(&'static str, &'static str); 2] = [
        ("all", "Plot selected date range"),
        ("select", "Select specific icebergs"),
    ];

    fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("select") => PlotMode::Specific,
            _ => PlotMode::All,
        }
    }

    fn value(&self) -> &'static str {
        match self {
            PlotMode::All => "all",
            PlotMode::Specific => "select",
        }
    }
}

/// Date range to preselect: an explicit `range` parameter, then the typed
/// dates, then the first available range.
pub fn preselect(available: &[DateRange], requested: Option<&str>, typed: Option<DateRange>) -> Option<DateRange> {
    requested
        .and_then(|r| DateRange::from_folder_name(r).ok())
        .filter(|r| available.contains(r))
        .or_else(|| typed.filter(|r| available.contains(r)))
        .or_else(|| available.first().copied())
}

/// Shapefiles to draw: all of them, or the requested subset defaulting to
/// the first file.
pub fn selected_icebergs(mode: PlotMode, available: &[String], requested: &[String]) -> Vec<String> {
    match mode {
        PlotMode::All => available.to_vec(),
        PlotMode::Specific => {
            let picked: Vec<String> = requested
                .iter()
                .filter(|r| available.contains(r))
                .cloned()
                .collect();
            if picked.is_empty() {
                available.iter().take(1).cloned().collect()
            } else {
                picked
            }
        }
    }
}

/// Render the spatial distribution page.
pub fn render(state: &AppState, params: &Params) -> String {
    let mut body = String::from("<h1>🗺️ Visualize iceberg spatial distributions</h1>");
    body.push_str(
        "<p>This interactive map allows you to zoom into specific sites and visualize iceberg distributions in Greenland.</p>",
    );
    body.push_str(&pairings_note());
    body.push_str(&section(explorer(state, params)));
    html::page("Iceberg spatial distributions", NavItem::Spatial, &body)
}

fn explorer(state: &AppState, params: &Params) -> Result<String> {
    let config = &state.config;
    let catalog = &config.catalog;
    let sites = load_sites(&catalog.glacier_locations_path())?;
    let ids = site_ids(&sites);
    let site_id = choose(params.get("site"), &ids, Some(config.defaults.spatial_site.as_str()))
        .ok_or_else(|| Error::empty("No glacier sites in the site table"))?;
    let early = params.raw("early").unwrap_or(config.defaults.early_date.as_str());
    let later = params.raw("later").unwrap_or(config.defaults.later_date.as_str());
    let style = TileStyle::from_name(params.get("style").unwrap_or(config.map.default_style.as_str()));

    let root = state.shapefile_dir();
    let ranges = list_date_ranges(&root, &site_id)?;
    let range = preselect(&ranges, params.get("range"), DateRange::parse(early, later).ok());
    let files = match &range {
        Some(r) => list_shapefiles(&root, &site_id, r)?,
        None => Vec::new(),
    };
    let mode = PlotMode::from_param(params.get("mode"));
    let selected = selected_icebergs(mode, &files, &params.all("select"));

    let range_options: Vec<(String, String)> = ranges.iter().map(|r| (r.folder_name(), r.folder_name())).collect();
    let selected_range = range.map(|r| r.folder_name()).unwrap_or_default();
    let styles: Vec<&str> = TileStyle::ALL.iter().map(TileStyle::name).collect();

    let mut controls = vec![
        html::select("site", "Select a Glacier site:", &plain_options(&ids), &site_id),
        html::text_input("early", "Enter Early Date (YYYYMMDD):", early, "YYYYMMDD"),
        html::text_input("later", "Enter Later Date (YYYYMMDD):", later, "YYYYMMDD"),
    ];
    if !ranges.is_empty() {
        controls.push(html::select("range", "Select Date Range", &range_options, &selected_range));
    }
    controls.push(html::radio("mode", "Plot icebergs:", &PlotMode::OPTIONS, mode.value()));
    if mode == PlotMode::Specific {
        controls.push(html::multi_select("select", "Select Icebergs to View", &files, &selected));
    }
    controls.push(html::select("style", "Select Map Style", &plain_options(&styles), style.name()));

    let mut out = String::from("<h2>Filter</h2>");
    out.push_str(&html::form(NavItem::Spatial.path(), &controls));
    out.push_str(
        "<h2>Visualize</h2><p>👆Click the icebergs to view their width, height, and more details!<br>\
         ✋ Pan around the map to see how icebergs drift!<br>🔎 Zoom out to see the full extent!</p>",
    );

    let Some(range) = range else {
        out.push_str(&html::alert(
            Level::Error,
            &format!("No available date ranges found for site: {site_id}"),
        ));
        return Ok(out);
    };
    if selected.is_empty() {
        return Ok(out);
    }

    let center = find_site(&sites, &site_id)
        .map(|s| (s.lat, s.lon))
        .unwrap_or(config.map.center);
    let mut map = MapView::new(center, SITE_ZOOM, style).fit_to_icebergs();
    match load_country_outline(&catalog.natural_earth_path(), COUNTRY) {
        Ok(outline) => map.add_country(COUNTRY, &outline),
        Err(e) => log::warn!("Country outline unavailable: {e}"),
    }
    for site in &sites {
        map.add_site(site.lat, site.lon, &site.official_name, &site.region);
    }

    let shapes = load_range_shapes(state, &site_id, &range)?;
    let reprojector = Reprojector::new()?;
    let early_str = range.early_str();
    for shape in shapes.iter().filter(|s| selected.contains(&s.name)) {
        let Some(summary) = summarize(std::iter::once((shape.name.as_str(), &shape.geometry))).pop() else {
            log::debug!("Skipping degenerate outline {}", shape.name);
            continue;
        };
        let popup = IcebergPopup {
            summary: &summary,
            angle: dominant_angle_multi(&shape.geometry),
        };
        let outline = reprojector.to_geographic(&shape.geometry)?;
        map.add_iceberg(&outline, palette::date_color(&shape.name, &early_str), &popup);
    }
    log::debug!("Spatial map for {site_id}/{range}: {} features", map.feature_count());
    out.push_str(&map.to_html("iceberg-map")?);
    Ok(out)
}
