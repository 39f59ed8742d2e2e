//! JSON listings and liveness.

use axum::http::StatusCode;

use crate::common::{get, TestCatalog, RANGE, SITE};

#[tokio::test]
async fn test_sites_listing() {
    let catalog = TestCatalog::new();
    let reply = get(catalog.router(), "/api/sites").await;

    assert_eq!(reply.status, StatusCode::OK);
    let sites = reply.json();
    let sites = sites.as_array().unwrap();
    assert_eq!(sites.len(), 2);
    assert_eq!(sites[0]["glacier_id"], "KOG");
    assert_eq!(sites[1]["region"], "NO");
}

#[tokio::test]
async fn test_ranges_listing() {
    let catalog = TestCatalog::new();
    let ranges = get(catalog.router(), &format!("/api/sites/{SITE}/ranges")).await.json();

    assert_eq!(ranges.as_array().unwrap().len(), 1);
    assert_eq!(ranges[0]["name"], RANGE);
    assert_eq!(ranges[0]["early"], "20170515");
    assert_eq!(ranges[0]["days"], 27);

    let none = get(catalog.router(), "/api/sites/ZZZ/ranges").await.json();
    assert!(none.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_shapes_listing() {
    let catalog = TestCatalog::new();
    let reply = get(catalog.router(), &format!("/api/sites/{SITE}/ranges/{RANGE}/shapes")).await;

    assert_eq!(reply.status, StatusCode::OK);
    let shapes = reply.json();
    let shapes = shapes.as_array().unwrap();
    assert_eq!(shapes.len(), 4);

    let largest = shapes
        .iter()
        .find(|s| s["name"] == "KOG_20170611_02.shp")
        .unwrap();
    assert_eq!(largest["quartile"], "Q4");
    assert!((largest["width"].as_f64().unwrap() - 150.0).abs() < 1e-6);
    assert!((largest["area"].as_f64().unwrap() - 22_500.0).abs() < 1e-3);
    assert!(largest["angle"].is_number());
}

#[tokio::test]
async fn test_shapes_listing_errors() {
    let catalog = TestCatalog::new();
    let bad = get(catalog.router(), "/api/sites/KOG/ranges/not-a-range/shapes").await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);

    let missing = get(catalog.router(), "/api/sites/KOG/ranges/20180101-20180201/shapes").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_names_outside_catalog_rejected() {
    let catalog = TestCatalog::new();
    std::fs::create_dir_all(catalog.dir.path().join("20990101-20990102")).unwrap();

    for uri in [
        "/api/sites/%2E%2E/ranges",
        "/api/sites/.%2E/ranges",
        "/api/sites/KOG%2F..%2F../ranges",
        "/api/sites/%2E%2E/ranges/20990101-20990102/shapes",
        "/statistics/melt.csv?site=..&early=20990101&later=20990102",
        "/statistics/melt.csv?site=..%2FMelt-rates%2FKOG&early=20170515&later=20170611",
    ] {
        let reply = get(catalog.router(), uri).await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn test_health() {
    let catalog = TestCatalog::new();
    let reply = get(catalog.router(), "/health").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json()["status"], "ok");
}
