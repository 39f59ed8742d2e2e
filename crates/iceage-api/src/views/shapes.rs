//! Iceberg shapefile viewer: one panel per outline, an area table with
//! quartile labels and the quartile comparison figure.

use geo::MultiPolygon;

use iceage_catalog::{date_range_dir, list_date_ranges, list_shapefiles, list_sites, load_shapes, IcebergShape};
use iceage_core::{DateRange, Error, Result};
use iceage_geo::{max_extent, quartile_bins, summarize, translate_to_origin, Extent, Reprojector, ShapeSummary};
use iceage_render::html::{self, Level, NavItem};
use iceage_render::{palette, render_svg, QuartileFigure, ShapePanel};

use super::{choose, pairings_note, plain_options, section};
use crate::params::Params;
use crate::state::AppState;

/// Columns of the area table and its download.
pub const AREA_HEADERS: [&str; 3] = ["Shapefile", "Area (m²)", "Quartile"];

/// File name offered for the area-table download.
pub const AREA_DOWNLOAD_NAME: &str = "iceberg_areas.csv";

const PANEL_COLUMNS: usize = 3;

/// Site and date range picked from the shapefile catalog.
#[derive(Debug, Clone)]
pub struct Selection {
    /// Every site directory
    pub sites: Vec<String>,
    /// Selected site
    pub site: String,
    /// Date ranges available for the site
    pub ranges: Vec<DateRange>,
    /// Selected range, if the site has any
    pub range: Option<DateRange>,
}

/// Resolve `site` and `range` parameters against the catalog, defaulting to
/// the first site and its first range.
pub fn select(state: &AppState, params: &Params) -> Result<Selection> {
    let root = state.shapefile_dir();
    let sites = list_sites(&root)?;
    let site = choose(params.get("site"), &sites, None)
        .ok_or_else(|| Error::empty(format!("No site folders in {}", root.display())))?;

    let ranges = list_date_ranges(&root, &site)?;
    let requested = params
        .get("range")
        .and_then(|r| DateRange::from_folder_name(r).ok())
        .filter(|r| ranges.contains(r));
    let range = requested.or_else(|| ranges.first().copied());

    Ok(Selection {
        sites,
        site,
        ranges,
        range,
    })
}

/// Load every outline of a site and date range.
///
/// A missing folder is [`Error::MissingDirectory`]; a folder without `.shp`
/// files is [`Error::EmptyResult`].
pub fn load_range_shapes(state: &AppState, site: &str, range: &DateRange) -> Result<Vec<IcebergShape>> {
    let root = state.shapefile_dir();
    let dir = date_range_dir(&root, site, range)?;
    if !dir.is_dir() {
        return Err(Error::missing_directory(&dir));
    }
    let names = list_shapefiles(&root, site, range)?;
    if names.is_empty() {
        return Err(Error::empty(format!(
            "No shapefiles found in the folder: {}",
            dir.display()
        )));
    }
    let reprojector = Reprojector::new()?;
    load_shapes(&dir, &names, &reprojector)
}

/// Outlines with a finite extent. The area table and the quartile figure
/// both bin this list.
fn measurable(shapes: &[IcebergShape]) -> Vec<&IcebergShape> {
    shapes
        .iter()
        .filter(|s| Extent::of(&s.geometry).is_some_and(|e| e.is_finite()))
        .collect()
}

/// Size summaries with quartile labels, in file-name order.
pub fn area_rows(shapes: &[IcebergShape]) -> Vec<(ShapeSummary, String)> {
    let summaries = summarize(measurable(shapes).into_iter().map(|s| (s.name.as_str(), &s.geometry)));
    let areas: Vec<f64> = summaries.iter().map(|s| s.area).collect();
    summaries
        .into_iter()
        .zip(quartile_bins(&areas))
        .map(|(s, q)| (s, q.to_string()))
        .collect()
}

/// Area table as CSV text.
pub fn area_csv(shapes: &[IcebergShape]) -> Result<String> {
    iceage_catalog::to_csv_string(AREA_DOWNLOAD_NAME, &AREA_HEADERS, &table_rows(&area_rows(shapes)))
}

/// Quartile comparison figure of the outlines.
pub fn quartile_figure(shapes: &[IcebergShape]) -> Result<QuartileFigure> {
    let geometries: Vec<MultiPolygon<f64>> = measurable(shapes).into_iter().map(|s| s.geometry.clone()).collect();
    QuartileFigure::new(&geometries)
}

fn table_rows(rows: &[(ShapeSummary, String)]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|(s, q)| vec![s.name.clone(), format!("{:.2}", s.area), q.clone()])
        .collect()
}

/// Render the viewer page.
pub fn render(state: &AppState, params: &Params) -> String {
    let mut body = String::from("<h1>🔍👀 Iceberg Shapefile Viewer:</h1>");
    body.push_str(
        "<p>❄️This page will allow you to explore iceberg varying iceberg shapes and sizes using shapefiles.</p>\
         <p>The plots will automatically adjust the axis boundaries based on the largest iceberg, which ensures \
         proper scaling for comparative analysis. The icebergs are color-coded by date, with orange representing \
         the earlier date and green representing the later date.</p>\
         <p>The shapefiles are then divided into four groups based on area, simplifying the identification of \
         patterns in shape and size. Each group is displayed in its dedicated subplot, with overlapping shapes \
         displayed in low opacity.</p>",
    );
    body.push_str(&pairings_note());
    body.push_str(&section(viewer(state, params)));
    html::page("Iceberg shapefile viewer", NavItem::Shapes, &body)
}

fn viewer(state: &AppState, params: &Params) -> Result<String> {
    let selection = select(state, params)?;
    let range_options: Vec<(String, String)> = selection
        .ranges
        .iter()
        .map(|r| (r.folder_name(), format!("{} – {}", r.early_str(), r.later_str())))
        .collect();
    let selected_range = selection.range.map(|r| r.folder_name()).unwrap_or_default();

    let mut out = String::from("<h2>Filter</h2>");
    out.push_str(&html::form(
        NavItem::Shapes.path(),
        &[
            html::select("site", "Select Site Name", &plain_options(&selection.sites), &selection.site),
            html::select("range", "Select Date Range", &range_options, &selected_range),
        ],
    ));

    let Some(range) = selection.range else {
        out.push_str(&html::alert(Level::Info, "Please select a date range to proceed!"));
        return Ok(out);
    };

    let shapes = match load_range_shapes(state, &selection.site, &range) {
        Ok(shapes) => shapes,
        Err(e) => {
            log::warn!("No shapes for {}/{range}: {e}", selection.site);
            out.push_str(&html::alert(Level::Error, &e.to_string()));
            return Ok(out);
        }
    };

    let rows = area_rows(&shapes);
    let (max_w, max_h) = max_extent(&rows.iter().map(|(s, _)| s.clone()).collect::<Vec<_>>());
    out.push_str(&format!("<h3>Displaying {} Shapefiles</h3>", shapes.len()));

    let early = range.early_str();
    out.push_str(&format!("<div class=\"grid{PANEL_COLUMNS}\">"));
    for shape in &shapes {
        let panel = ShapePanel::new(
            shape.name.clone(),
            translate_to_origin(&shape.geometry),
            (max_w, max_h),
            palette::date_color(&shape.name, &early),
        );
        out.push_str(&section(render_svg(&panel).map(|svg| format!("<div>{svg}</div>"))));
    }
    out.push_str("</div>");

    let query = [("site", selection.site.as_str()), ("range", selected_range.as_str())];
    out.push_str("<h3>Iceberg Area Information:</h3>");
    out.push_str(&html::table(&AREA_HEADERS, &table_rows(&rows)));
    out.push_str(&html::button_link(&html::href("/shapes/areas.csv", &query), "Download .csv file"));

    out.push_str("<h1>📊 Quartile-Based Iceberg Shape Comparison</h1>");
    out.push_str(&section(
        quartile_figure(&shapes).and_then(|f| render_svg(&f)).map(|svg| format!("<figure>{svg}</figure>")),
    ));
    out.push_str(&html::button_link(&html::href("/shapes/quartiles.png", &query), "💾 Save Image"));
    Ok(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use geo::polygon;

    fn square(name: &str, x0: f64, side: f64) -> IcebergShape {
        IcebergShape {
            name: name.to_string(),
            geometry: MultiPolygon(vec![polygon![
                (x: x0, y: 0.0),
                (x: x0 + side, y: 0.0),
                (x: x0 + side, y: side),
                (x: x0, y: side),
            ]]),
        }
    }

    #[test]
    fn test_table_and_figure_bin_the_same_outlines() {
        let mut shapes: Vec<_> = (1..=4)
            .map(|k| square(&format!("KOG_20170515_{k}.shp"), 0.0, f64::from(k) * 10.0))
            .collect();
        shapes.insert(2, square("KOG_20170515_bad.shp", f64::NAN, 50.0));

        let rows = area_rows(&shapes);
        let labels: Vec<&str> = rows.iter().map(|(_, q)| q.as_str()).collect();
        assert_eq!(labels, ["Q1", "Q2", "Q3", "Q4"]);
        assert!(rows.iter().all(|(s, _)| s.name != "KOG_20170515_bad.shp"));

        let figure = quartile_figure(&shapes).unwrap();
        assert_eq!(figure.counts(), [1, 1, 1, 1]);
    }

    #[test]
    fn test_area_csv_rows() {
        let shapes = vec![square("a.shp", 0.0, 10.0), square("b.shp", 0.0, 20.0)];
        let csv = area_csv(&shapes).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Shapefile,Area (m²),Quartile"));
        assert_eq!(lines.next(), Some("a.shp,100.00,Q1"));
        assert_eq!(lines.next(), Some("b.shp,400.00,Q3"));
    }
}
