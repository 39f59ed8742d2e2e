//! Shared fixtures: an on-disk catalog and request helpers.

use std::path::Path;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use tempfile::TempDir;
use tower::ServiceExt;

use iceage_api::{router, AppState};
use iceage_core::IceageConfig;

pub const SITE: &str = "KOG";
pub const RANGE: &str = "20170515-20170611";

/// A catalog tree under a temporary root.
pub struct TestCatalog {
    pub dir: TempDir,
}

impl TestCatalog {
    /// Site table, counts, four KOG outlines, one melt table and one image.
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        std::fs::write(
            root.join("Glacier-Locations.csv"),
            "LAT,LON,Official_n,Glacier_ID,Region\n\
             68.63,-33.05,Kangerlussuaq Glacier,KOG,SE\n\
             81.20,-61.30,Petermann Glacier,NOG,NO\n",
        )
        .unwrap();
        std::fs::write(
            root.join("abbreviations-datepairings.csv"),
            "Official_n,Corresponding icebergs\n\
             Kangerlussuaq Glacier,12\n\
             Petermann Glacier,3\n",
        )
        .unwrap();

        let shapes = root.join("iceberg-shapefiles").join(SITE).join(RANGE);
        std::fs::create_dir_all(&shapes).unwrap();
        let outlines = [
            ("KOG_20170515_01.shp", 40.0),
            ("KOG_20170515_02.shp", 90.0),
            ("KOG_20170611_01.shp", 60.0),
            ("KOG_20170611_02.shp", 150.0),
        ];
        for (i, (name, side)) in outlines.into_iter().enumerate() {
            let x0 = 500_000.0 + 1_000.0 * i as f64;
            write_square_shp(&shapes.join(name), x0, -2_300_000.0, side);
        }
        std::fs::create_dir_all(root.join("iceberg-shapefiles").join("NOG")).unwrap();

        let melt = root.join("Melt-rates").join(SITE).join(RANGE);
        std::fs::create_dir_all(&melt).unwrap();
        std::fs::write(
            melt.join(format!("{SITE}_{RANGE}_iceberg_meltinfo.csv")),
            "X_i,Y_i,Area,Volume,MeltRate\n\
             1,2,1000,52000,0.12\n\
             3,4,2200,98000,0.18\n\
             5,6,3100,150000,0.31\n\
             7,8,4000,,0.29\n",
        )
        .unwrap();

        let images = root.join("images");
        std::fs::create_dir_all(&images).unwrap();
        std::fs::write(images.join("NSF.png"), b"\x89PNG\r\n\x1a\nfake").unwrap();

        Self { dir }
    }

    pub fn config(&self) -> IceageConfig {
        let mut config = IceageConfig::default();
        config.catalog.root = self.dir.path().to_path_buf();
        config
    }

    pub fn router(&self) -> Router {
        router(AppState::new(self.config()))
    }
}

/// Response status, headers and body of a GET request.
pub struct Reply {
    pub status: StatusCode,
    pub content_type: String,
    pub disposition: Option<String>,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

pub async fn get(app: Router, uri: &str) -> Reply {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let header = |name: axum::http::HeaderName| {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let content_type = header(axum::http::header::CONTENT_TYPE).unwrap_or_default();
    let disposition = header(axum::http::header::CONTENT_DISPOSITION);
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();
    Reply {
        status,
        content_type,
        disposition,
        body,
    }
}

/// Write a single-record polygon `.shp` holding one clockwise square.
pub fn write_square_shp(path: &Path, x0: f64, y0: f64, side: f64) {
    let ring = [
        (x0, y0),
        (x0, y0 + side),
        (x0 + side, y0 + side),
        (x0 + side, y0),
        (x0, y0),
    ];
    let bbox = [x0, y0, x0 + side, y0 + side];

    let mut content = Vec::new();
    content.extend_from_slice(&5i32.to_le_bytes());
    for v in bbox {
        content.extend_from_slice(&v.to_le_bytes());
    }
    content.extend_from_slice(&1i32.to_le_bytes());
    content.extend_from_slice(&(ring.len() as i32).to_le_bytes());
    content.extend_from_slice(&0i32.to_le_bytes());
    for (x, y) in ring {
        content.extend_from_slice(&x.to_le_bytes());
        content.extend_from_slice(&y.to_le_bytes());
    }

    let total = 100 + 8 + content.len();
    let mut bytes = Vec::with_capacity(total);
    bytes.extend_from_slice(&9994i32.to_be_bytes());
    bytes.extend_from_slice(&[0u8; 20]);
    bytes.extend_from_slice(&((total / 2) as i32).to_be_bytes());
    bytes.extend_from_slice(&1000i32.to_le_bytes());
    bytes.extend_from_slice(&5i32.to_le_bytes());
    for v in bbox {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes.extend_from_slice(&[0u8; 32]);
    bytes.extend_from_slice(&1i32.to_be_bytes());
    bytes.extend_from_slice(&((content.len() / 2) as i32).to_be_bytes());
    bytes.extend_from_slice(&content);

    std::fs::write(path, bytes).unwrap();
}
