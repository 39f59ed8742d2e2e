//! Interactive Leaflet maps.
//!
//! A [`MapView`] is a tile layer plus a GeoJSON `FeatureCollection`. Each
//! feature carries its Leaflet style and popup text in its properties, so the
//! page script stays generic.

use geo::MultiPolygon;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde::Serialize;
use serde_json::json;

use iceage_core::{Error, Result};
use iceage_geo::ShapeSummary;

use crate::html::escape;
use crate::palette::{self, Rgb};

/// Basemap tile styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TileStyle {
    /// Light grey basemap
    Positron,
    /// Dark basemap
    DarkMatter,
}

impl TileStyle {
    /// All styles in selector order.
    pub const ALL: [TileStyle; 2] = [TileStyle::Positron, TileStyle::DarkMatter];

    /// Display name used in selectors and configuration.
    pub fn name(&self) -> &'static str {
        match self {
            TileStyle::Positron => "CartoDB positron",
            TileStyle::DarkMatter => "CartoDB dark_matter",
        }
    }

    /// Parse a display name; unknown names fall back to positron.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or(TileStyle::Positron)
    }

    /// Tile URL template.
    pub fn url(&self) -> &'static str {
        match self {
            TileStyle::Positron => "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png",
            TileStyle::DarkMatter => "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png",
        }
    }

    /// Attribution HTML.
    pub fn attribution(&self) -> &'static str {
        "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>"
    }
}

/// Measurements shown in an iceberg popup.
#[derive(Debug, Clone, PartialEq)]
pub struct IcebergPopup<'a> {
    /// Size of the outline in EPSG:3413 metres
    pub summary: &'a ShapeSummary,
    /// Dominant-edge angle in degrees, when defined
    pub angle: Option<f64>,
}

/// A Leaflet map: tiles, initial view and overlay features.
#[derive(Debug, Clone)]
pub struct MapView {
    center: (f64, f64),
    zoom: u8,
    tiles: TileStyle,
    features: Vec<Feature>,
    fit_icebergs: bool,
}

impl MapView {
    /// New map centred on `(lat, lon)`.
    pub fn new(center: (f64, f64), zoom: u8, tiles: TileStyle) -> Self {
        Self {
            center,
            zoom,
            tiles,
            features: Vec::new(),
            fit_icebergs: false,
        }
    }

    /// Zoom to the iceberg layer once the map loads.
    pub fn fit_to_icebergs(mut self) -> Self {
        self.fit_icebergs = true;
        self
    }

    /// Country outline (lon/lat) filled in the Greenland colour.
    pub fn add_country(&mut self, name: &str, outline: &MultiPolygon<f64>) {
        let style = json!({
            "fillColor": palette::GREENLAND_FILL.to_hex(),
            "color": "black",
            "weight": 1.0,
            "fillOpacity": 0.5,
        });
        self.push(
            Value::from(outline),
            "country",
            style,
            &escape(name),
        );
    }

    /// Study-site marker coloured by region.
    pub fn add_site(&mut self, lat: f64, lon: f64, official_name: &str, region: &str) {
        let (color_name, color) = palette::region_color(region);
        let style = json!({
            "color": color.to_hex(),
            "fillColor": color.to_hex(),
            "fillOpacity": 0.9,
            "radius": 7,
            "weight": 1,
            "marker": color_name,
        });
        self.push(
            Value::Point(vec![lon, lat]),
            "site",
            style,
            &format!("Official Name: {}", escape(official_name)),
        );
    }

    /// Iceberg outline (lon/lat) coloured by acquisition date.
    pub fn add_iceberg(&mut self, outline: &MultiPolygon<f64>, color: Rgb, popup: &IcebergPopup<'_>) {
        let style = json!({
            "color": "black",
            "weight": 1,
            "fillColor": color.to_hex(),
            "fillOpacity": 0.8,
        });
        let s = popup.summary;
        let mut text = format!(
            "<b>{}</b><br>Width: {:.1} m<br>Height: {:.1} m<br>Area: {:.1} m²",
            escape(&s.name),
            s.width,
            s.height,
            s.area
        );
        if let Some(angle) = popup.angle {
            text.push_str(&format!("<br>Dominant angle: {angle:.1}°"));
        }
        self.push(Value::from(outline), "iceberg", style, &text);
    }

    /// Number of overlay features.
    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    fn push(&mut self, value: Value, kind: &str, style: serde_json::Value, popup: &str) {
        let mut properties = JsonObject::new();
        properties.insert("kind".to_string(), json!(kind));
        properties.insert("style".to_string(), style);
        properties.insert("popup".to_string(), json!(popup));
        self.features.push(Feature {
            bbox: None,
            geometry: Some(Geometry::new(value)),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        });
    }

    /// The overlays as a GeoJSON `FeatureCollection`.
    pub fn feature_collection(&self) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: self.features.clone(),
            foreign_members: None,
        }
    }

    /// `<div>` plus the script that builds the map in it.
    pub fn to_html(&self, element_id: &str) -> Result<String> {
        let data = serde_json::to_string(&self.feature_collection())
            .map_err(|e| Error::render(format!("GeoJSON serialisation failed: {e}")))?
            .replace("</", "<\\/");
        let id = escape(element_id);
        let (lat, lon) = self.center;
        Ok(format!(
            r#"<div id="{id}" class="map"></div>
<script>
(function () {{
  var map = L.map("{id}").setView([{lat}, {lon}], {zoom});
  L.tileLayer("{url}", {{ attribution: '{attribution}', subdomains: "abcd", maxZoom: 20 }}).addTo(map);
  var data = {data};
  var layer = L.geoJSON(data, {{
    style: function (f) {{ return f.properties.style; }},
    pointToLayer: function (f, latlng) {{ return L.circleMarker(latlng, f.properties.style); }},
    onEachFeature: function (f, l) {{ if (f.properties.popup) {{ l.bindPopup(f.properties.popup); }} }}
  }}).addTo(map);
  var bergs = L.geoJSON(data, {{ filter: function (f) {{ return f.properties.kind === "iceberg"; }} }});
  if ({fit} && bergs.getLayers().length > 0) {{ map.fitBounds(bergs.getBounds(), {{ maxZoom: 14 }}); }}
}})();
</script>"#,
            zoom = self.zoom,
            url = self.tiles.url(),
            attribution = self.tiles.attribution(),
            fit = self.fit_icebergs,
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use geo::polygon;

    fn square() -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![
            (x: -50.0, y: 70.0),
            (x: -49.9, y: 70.0),
            (x: -49.9, y: 70.1),
            (x: -50.0, y: 70.1),
            (x: -50.0, y: 70.0),
        ]])
    }

    #[test]
    fn test_tile_style_names() {
        assert_eq!(TileStyle::from_name("CartoDB dark_matter"), TileStyle::DarkMatter);
        assert_eq!(TileStyle::from_name("cartodb positron"), TileStyle::Positron);
        assert_eq!(TileStyle::from_name("OpenStreetMap"), TileStyle::Positron);
        assert!(TileStyle::DarkMatter.url().contains("dark_all"));
    }

    #[test]
    fn test_site_marker_properties() {
        let mut map = MapView::new((72.0, -40.0), 4, TileStyle::Positron);
        map.add_site(68.6, -33.0, "Kangerlussuaq <K>", "CE");
        let fc = map.feature_collection();
        let props = fc.features[0].properties.as_ref().unwrap();
        assert_eq!(props["kind"], "site");
        assert_eq!(props["popup"], "Official Name: Kangerlussuaq &lt;K&gt;");
        assert_eq!(props["style"]["marker"], "orange");
        let Some(Geometry { value: Value::Point(p), .. }) = &fc.features[0].geometry else {
            unreachable!("Expected a point");
        };
        assert_eq!(p, &vec![-33.0, 68.6]);
    }

    #[test]
    fn test_country_and_iceberg_layers() {
        let mut map = MapView::new((72.0, -40.0), 4, TileStyle::DarkMatter).fit_to_icebergs();
        map.add_country("Greenland", &square());
        let summary = ShapeSummary {
            name: "NOG_20170515_3.shp".to_string(),
            width: 120.0,
            height: 80.5,
            area: 7000.0,
        };
        map.add_iceberg(&square(), palette::EARLY_DATE, &IcebergPopup { summary: &summary, angle: Some(12.345) });
        assert_eq!(map.feature_count(), 2);

        let props = map.feature_collection().features[1].properties.clone().unwrap();
        let popup = props["popup"].as_str().unwrap();
        assert!(popup.contains("NOG_20170515_3.shp"));
        assert!(popup.contains("Width: 120.0 m"));
        assert!(popup.contains("Dominant angle: 12.3°"));
        assert_eq!(props["style"]["fillColor"], "#f5a442");

        let html = map.to_html("spatial-map").unwrap();
        assert!(html.contains("L.map(\"spatial-map\")"));
        assert!(html.contains("dark_all"));
        assert!(html.contains("\"FeatureCollection\""));
        assert!(html.contains("if (true &&"));
    }

    #[test]
    fn test_script_breakout_is_escaped() {
        let mut map = MapView::new((0.0, 0.0), 2, TileStyle::Positron);
        map.add_site(0.0, 0.0, "</script><script>alert(1)", "SE");
        let html = map.to_html("m").unwrap();
        assert_eq!(html.matches("</script>").count(), 1);
    }
}
