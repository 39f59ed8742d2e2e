//! Server-rendered pages over a fixture catalog.

use axum::http::StatusCode;

use crate::common::{get, TestCatalog, RANGE, SITE};

#[tokio::test]
async fn test_home_renders_map_and_distribution() {
    let catalog = TestCatalog::new();
    let reply = get(catalog.router(), "/").await;

    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.content_type.starts_with("text/html"));
    let html = reply.text();
    assert!(html.contains("ICE-AGE Innovation"));
    assert!(html.contains("Official Name: Kangerlussuaq Glacier"));
    assert!(html.contains("Data distribution for Greenland Glacier study sites"));
    // No Natural Earth archive in the fixture
    assert!(html.contains("Country outline unavailable"));
}

#[tokio::test]
async fn test_home_dark_style() {
    let catalog = TestCatalog::new();
    let html = get(catalog.router(), "/?style=CartoDB+dark_matter").await.text();
    assert!(html.contains("dark_all"));
}

#[tokio::test]
async fn test_home_missing_site_table_degrades() {
    let catalog = TestCatalog::new();
    std::fs::remove_file(catalog.dir.path().join("Glacier-Locations.csv")).unwrap();
    let reply = get(catalog.router(), "/").await;

    assert_eq!(reply.status, StatusCode::OK);
    let html = reply.text();
    assert!(html.contains("An error occurred while loading the CSV file"));
    assert!(html.contains("Data distribution for Greenland Glacier study sites"));
}

#[tokio::test]
async fn test_home_distribution_missing_columns() {
    let catalog = TestCatalog::new();
    std::fs::write(
        catalog.dir.path().join("abbreviations-datepairings.csv"),
        "Name,Count\nA,1\n",
    )
    .unwrap();
    let html = get(catalog.router(), "/").await.text();
    assert!(html.contains("are not in the CSV file"));
}

#[tokio::test]
async fn test_shapes_defaults_to_first_site_and_range() {
    let catalog = TestCatalog::new();
    let reply = get(catalog.router(), "/shapes").await;

    assert_eq!(reply.status, StatusCode::OK);
    let html = reply.text();
    assert!(html.contains("Displaying 4 Shapefiles"));
    assert!(html.contains("KOG_20170611_02.shp"));
    assert!(html.contains("Quartile-Based Iceberg Shape Comparison"));
    assert!(html.contains(&format!("/shapes/areas.csv?site={SITE}&amp;range={RANGE}")));
    for q in ["Q1", "Q2", "Q3", "Q4"] {
        assert!(html.contains(q), "{q}");
    }
}

#[tokio::test]
async fn test_shapes_site_without_ranges() {
    let catalog = TestCatalog::new();
    let html = get(catalog.router(), "/shapes?site=NOG").await.text();
    assert!(html.contains("Please select a date range to proceed!"));
    assert!(!html.contains("Displaying"));
}

#[tokio::test]
async fn test_shapes_empty_range_folder() {
    let catalog = TestCatalog::new();
    let empty = catalog
        .dir
        .path()
        .join("iceberg-shapefiles/NOG/20180601-20180720");
    std::fs::create_dir_all(&empty).unwrap();
    let html = get(catalog.router(), "/shapes?site=NOG").await.text();
    assert!(html.contains("No shapefiles found in the folder"));
}

#[tokio::test]
async fn test_shapes_missing_catalog_is_in_page_error() {
    let catalog = TestCatalog::new();
    std::fs::remove_dir_all(catalog.dir.path().join("iceberg-shapefiles")).unwrap();
    let reply = get(catalog.router(), "/shapes").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.text().contains("alert-error"));
}

#[tokio::test]
async fn test_spatial_plots_all_icebergs() {
    let catalog = TestCatalog::new();
    let html = get(catalog.router(), "/spatial?site=KOG").await.text();

    assert!(html.contains("Visualize iceberg spatial distributions"));
    assert!(html.contains("iceberg-map"));
    assert_eq!(html.matches("\"kind\":\"iceberg\"").count(), 4);
    assert!(html.contains("Dominant angle"));
}

#[tokio::test]
async fn test_spatial_select_specific_icebergs() {
    let catalog = TestCatalog::new();
    let uri = "/spatial?site=KOG&mode=select&select=KOG_20170611_01.shp&select=KOG_20170515_02.shp";
    let html = get(catalog.router(), uri).await.text();
    assert_eq!(html.matches("\"kind\":\"iceberg\"").count(), 2);
    assert!(html.contains("Select Icebergs to View"));
}

#[tokio::test]
async fn test_spatial_site_without_ranges() {
    let catalog = TestCatalog::new();
    // NOG is the default site and has no date ranges in the fixture
    let html = get(catalog.router(), "/spatial").await.text();
    assert!(html.contains("No available date ranges found for site: NOG"));
    assert!(!html.contains("iceberg-map"));
}

#[tokio::test]
async fn test_statistics_table_and_correlogram() {
    let catalog = TestCatalog::new();
    let html = get(catalog.router(), "/statistics").await.text();

    assert!(html.contains("Iceberg Statistics Dashboard"));
    assert!(html.contains("Iceberg Meltrate Information"));
    assert!(html.contains("150000"));
    assert!(html.contains("Correlogram of Iceberg Features"));
    assert!(html.contains("/statistics/correlogram.png?site=KOG&amp;early=20170515&amp;later=20170611"));
}

#[tokio::test]
async fn test_statistics_missing_file() {
    let catalog = TestCatalog::new();
    let html = get(catalog.router(), "/statistics?site=SEK").await.text();
    assert!(html.contains("CSV file not found. Please check your inputs!"));
}

#[tokio::test]
async fn test_statistics_cleared_date() {
    let catalog = TestCatalog::new();
    let html = get(catalog.router(), "/statistics?site=KOG&early=&later=20170611").await.text();
    assert!(html.contains("alert-warning"));
    assert!(html.contains("Please provide all inputs"));
}

#[tokio::test]
async fn test_static_pages() {
    let catalog = TestCatalog::new();
    let gallery = get(catalog.router(), "/gallery").await;
    assert_eq!(gallery.status, StatusCode::OK);
    assert!(gallery.text().contains("/images/Icebergs.png"));

    let thanks = get(catalog.router(), "/acknowledgements").await.text();
    assert!(thanks.contains("Acknowledgements"));
    assert!(thanks.contains("https://zenodo.org/records/8007035"));
}
