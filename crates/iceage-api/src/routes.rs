//! Router and request handlers.
//!
//! Pages always answer 200 and carry their own error boxes. Downloads,
//! images and JSON listings map failures to status codes through
//! [`crate::Error`].

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use iceage_catalog::meltrates::DOWNLOAD_NAME as MELT_DOWNLOAD_NAME;
use iceage_catalog::{checked_name, list_date_ranges, load_sites, GlacierSite};
use iceage_core::DateRange;
use iceage_geo::dominant_angle_multi;
use iceage_render::{render_png, Format, QuartileFigure};

use crate::error::{Error, Result};
use crate::params::Params;
use crate::state::{AppState, SharedState};
use crate::views::{self, about, shapes, statistics};

type Pairs = Query<Vec<(String, String)>>;

/// Build the application router.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/shapes", get(shapes_page))
        .route("/shapes/quartiles.png", get(quartiles_png))
        .route("/shapes/areas.csv", get(areas_csv))
        .route("/spatial", get(spatial_page))
        .route("/statistics", get(statistics_page))
        .route("/statistics/melt.csv", get(melt_csv))
        .route("/statistics/correlogram.png", get(correlogram_png))
        .route("/gallery", get(gallery_page))
        .route("/acknowledgements", get(acknowledgements_page))
        .route("/images/{file}", get(image))
        .route("/api/sites", get(api_sites))
        .route("/api/sites/{site}/ranges", get(api_ranges))
        .route("/api/sites/{site}/ranges/{range}/shapes", get(api_shapes))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Helpers
// ============================================================================

/// Run catalog work on the blocking pool.
async fn blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> iceage_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(work).await??)
}

async fn page<F>(state: SharedState, params: Params, view: F) -> Result<Html<String>>
where
    F: FnOnce(&AppState, &Params) -> String + Send + 'static,
{
    let html = tokio::task::spawn_blocking(move || view(&state, &params)).await?;
    Ok(Html(html))
}

/// A site or folder name taken from the URL path.
fn path_name(name: String) -> Result<String> {
    match checked_name(&name) {
        Ok(_) => Ok(name),
        Err(e) => Err(Error::BadRequest(e.to_string())),
    }
}

fn attachment(content_type: &'static str, file_name: &str, body: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    )
        .into_response()
}

// ============================================================================
// Pages
// ============================================================================

async fn home(State(state): State<SharedState>, query: Pairs) -> Result<Html<String>> {
    page(state, query.into(), views::home::render).await
}

async fn shapes_page(State(state): State<SharedState>, query: Pairs) -> Result<Html<String>> {
    page(state, query.into(), shapes::render).await
}

async fn spatial_page(State(state): State<SharedState>, query: Pairs) -> Result<Html<String>> {
    page(state, query.into(), views::spatial::render).await
}

async fn statistics_page(State(state): State<SharedState>, query: Pairs) -> Result<Html<String>> {
    page(state, query.into(), statistics::render).await
}

async fn gallery_page(State(state): State<SharedState>) -> Result<Html<String>> {
    page(state, Params::default(), |state, _| about::gallery(state)).await
}

async fn acknowledgements_page(State(state): State<SharedState>) -> Result<Html<String>> {
    page(state, Params::default(), |_, _| about::acknowledgements()).await
}

// ============================================================================
// Downloads
// ============================================================================

fn selected_shapes(state: &AppState, params: &Params) -> iceage_core::Result<Vec<iceage_catalog::IcebergShape>> {
    let selection = shapes::select(state, params)?;
    let range = selection.range.ok_or_else(|| {
        iceage_core::Error::empty(format!("No date ranges for site {}", selection.site))
    })?;
    shapes::load_range_shapes(state, &selection.site, &range)
}

async fn quartiles_png(State(state): State<SharedState>, query: Pairs) -> Result<Response> {
    let params = Params::from(query);
    let png = blocking(move || {
        let shapes = selected_shapes(&state, &params)?;
        render_png(&shapes::quartile_figure(&shapes)?)
    })
    .await?;
    Ok(attachment(Format::Png.content_type(), QuartileFigure::DOWNLOAD_NAME, png))
}

async fn areas_csv(State(state): State<SharedState>, query: Pairs) -> Result<Response> {
    let params = Params::from(query);
    let csv = blocking(move || shapes::area_csv(&selected_shapes(&state, &params)?)).await?;
    Ok(attachment("text/csv", shapes::AREA_DOWNLOAD_NAME, csv.into_bytes()))
}

async fn melt_csv(State(state): State<SharedState>, query: Pairs) -> Result<Response> {
    let params = Params::from(query);
    let csv = blocking(move || {
        let query = statistics::MeltQuery::from_params(&state, &params);
        statistics::load(&state, &query)?.to_csv()
    })
    .await?;
    Ok(attachment("text/csv", MELT_DOWNLOAD_NAME, csv.into_bytes()))
}

async fn correlogram_png(State(state): State<SharedState>, query: Pairs) -> Result<Response> {
    let params = Params::from(query);
    let png = blocking(move || {
        let query = statistics::MeltQuery::from_params(&state, &params);
        let table = statistics::load(&state, &query)?;
        render_png(&statistics::correlogram(&table)?)
    })
    .await?;
    Ok(attachment(Format::Png.content_type(), "correlogram.png", png))
}

async fn image(State(state): State<SharedState>, Path(file): Path<String>) -> Result<Response> {
    let content_type = about::image_content_type(&file);
    let bytes = blocking(move || {
        let path = about::resolve_image(&state, &file)?;
        std::fs::read(&path).map_err(|e| iceage_core::Error::io_with_path(e, &path))
    })
    .await?;
    Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}

// ============================================================================
// JSON
// ============================================================================

/// A date-range folder in the shapefile catalog.
#[derive(Debug, Serialize)]
pub struct RangeInfo {
    /// Folder name, `<early>-<later>`
    pub name: String,
    /// Early date, `YYYYMMDD`
    pub early: String,
    /// Later date, `YYYYMMDD`
    pub later: String,
    /// Days between the two acquisitions
    pub days: i64,
}

impl From<DateRange> for RangeInfo {
    fn from(range: DateRange) -> Self {
        Self {
            name: range.folder_name(),
            early: range.early_str(),
            later: range.later_str(),
            days: range.days(),
        }
    }
}

/// Size, quartile and orientation of one iceberg outline.
#[derive(Debug, Serialize)]
pub struct ShapeInfo {
    /// Shapefile name
    pub name: String,
    /// Bounding-box width in metres
    pub width: f64,
    /// Bounding-box height in metres
    pub height: f64,
    /// Area in square metres
    pub area: f64,
    /// Area quartile label
    pub quartile: String,
    /// Dominant-edge angle in degrees
    pub angle: Option<f64>,
}

async fn api_sites(State(state): State<SharedState>) -> Result<Json<Vec<GlacierSite>>> {
    let sites = blocking(move || load_sites(&state.config.catalog.glacier_locations_path())).await?;
    Ok(Json(sites))
}

async fn api_ranges(State(state): State<SharedState>, Path(site): Path<String>) -> Result<Json<Vec<RangeInfo>>> {
    let site = path_name(site)?;
    let ranges = blocking(move || list_date_ranges(&state.shapefile_dir(), &site)).await?;
    Ok(Json(ranges.into_iter().map(RangeInfo::from).collect()))
}

async fn api_shapes(
    State(state): State<SharedState>,
    Path((site, range)): Path<(String, String)>,
) -> Result<Json<Vec<ShapeInfo>>> {
    let site = path_name(site)?;
    let range = DateRange::from_folder_name(&range)?;
    let infos = blocking(move || {
        let shapes = shapes::load_range_shapes(&state, &site, &range)?;
        let rows = shapes::area_rows(&shapes);
        Ok(rows
            .into_iter()
            .map(|(summary, quartile)| {
                let angle = shapes
                    .iter()
                    .find(|s| s.name == summary.name)
                    .and_then(|s| dominant_angle_multi(&s.geometry));
                ShapeInfo {
                    name: summary.name,
                    width: summary.width,
                    height: summary.height,
                    area: summary.area,
                    quartile,
                    angle,
                }
            })
            .collect::<Vec<_>>())
    })
    .await?;
    Ok(Json(infos))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}
