//! File downloads and catalog images.

use axum::http::StatusCode;

use crate::common::{get, TestCatalog, RANGE, SITE};

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

#[tokio::test]
async fn test_area_table_download() {
    let catalog = TestCatalog::new();
    let reply = get(catalog.router(), &format!("/shapes/areas.csv?site={SITE}&range={RANGE}")).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.content_type, "text/csv");
    assert!(reply.disposition.as_deref().unwrap().contains("attachment"));
    let text = reply.text();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Shapefile,Area (m²),Quartile"));
    assert_eq!(lines.count(), 4);
    assert!(text.contains("KOG_20170611_02.shp,22500.00,Q4"));
    assert!(text.contains("KOG_20170515_01.shp,1600.00,Q1"));
}

#[tokio::test]
async fn test_quartile_figure_download() {
    let catalog = TestCatalog::new();
    let reply = get(catalog.router(), "/shapes/quartiles.png").await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.content_type, "image/png");
    assert!(reply.disposition.as_deref().unwrap().contains("quartile_icebergs.png"));
    assert!(reply.body.starts_with(PNG_MAGIC));
}

#[tokio::test]
async fn test_shape_download_without_range_is_not_found() {
    let catalog = TestCatalog::new();
    let reply = get(catalog.router(), "/shapes/areas.csv?site=NOG").await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_melt_table_download() {
    let catalog = TestCatalog::new();
    let reply = get(catalog.router(), "/statistics/melt.csv?site=KOG&early=20170515&later=20170611").await;

    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.disposition.as_deref().unwrap().contains("iceberg_melt_rates.csv"));
    let text = reply.text();
    assert!(text.starts_with("X_i,Y_i,Area,Volume,MeltRate"));
    assert_eq!(text.lines().count(), 5);
}

#[tokio::test]
async fn test_melt_table_download_errors() {
    let catalog = TestCatalog::new();
    let missing = get(catalog.router(), "/statistics/melt.csv?site=ASG").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert!(missing.text().contains("not found"));

    let bad_date = get(catalog.router(), "/statistics/melt.csv?site=KOG&early=2017-05-15").await;
    assert_eq!(bad_date.status, StatusCode::BAD_REQUEST);

    let reversed = get(catalog.router(), "/statistics/melt.csv?site=KOG&early=20170611&later=20170515").await;
    assert_eq!(reversed.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_correlogram_download() {
    let catalog = TestCatalog::new();
    let reply = get(catalog.router(), "/statistics/correlogram.png").await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.content_type, "image/png");
    assert!(reply.disposition.as_deref().unwrap().contains("correlogram.png"));
    assert!(reply.body.starts_with(PNG_MAGIC));
}

#[tokio::test]
async fn test_image_served() {
    let catalog = TestCatalog::new();
    let reply = get(catalog.router(), "/images/NSF.png").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.content_type, "image/png");
    assert!(reply.body.starts_with(PNG_MAGIC));
}

#[tokio::test]
async fn test_image_rejects_traversal_and_missing() {
    let catalog = TestCatalog::new();
    let traversal = get(catalog.router(), "/images/..%2FGlacier-Locations.csv").await;
    assert_eq!(traversal.status, StatusCode::NOT_FOUND);

    let missing = get(catalog.router(), "/images/NSIDC.png").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}
