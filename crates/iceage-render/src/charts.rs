//! Static figures drawn with `plotters`.
//!
//! Every figure implements [`Chart`], which draws onto any plotters backend.
//! [`render_svg`] and [`render_png`] pick the backend. Bitmap text needs a
//! font backend, so PNG figures carry captions and tick labels only when the
//! crate is built with the `fonts` feature; SVG output always does.

use std::path::Path;

use geo::{Area, MultiPolygon};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use iceage_core::{Error, Result};
use iceage_geo::{group_by_quartile, orient_horizontal, stats, Quartile};

use crate::palette::{self, Rgb};

/// Result of drawing onto backend `DB`.
pub type DrawResult<DB> = std::result::Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

const FONT: &str = "sans-serif";
const BITMAP_TEXT: bool = cfg!(feature = "fonts");

/// A figure that can be drawn on any backend.
pub trait Chart {
    /// Pixel size `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Draw onto `root`. `text` is false when the backend cannot draw glyphs.
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>, text: bool) -> DrawResult<DB>;
}

/// Output encodings for figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Scalable vector graphics
    Svg,
    /// Portable network graphics
    Png,
}

impl Format {
    /// Pick the format from a file extension (`.svg` or `.png`).
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("svg") => Ok(Format::Svg),
            Some("png") => Ok(Format::Png),
            _ => Err(Error::render(format!(
                "Cannot tell figure format from '{}'; use .svg or .png",
                path.display()
            ))),
        }
    }

    /// MIME type.
    pub fn content_type(&self) -> &'static str {
        match self {
            Format::Svg => "image/svg+xml",
            Format::Png => "image/png",
        }
    }
}

/// Draw a chart as an SVG document.
pub fn render_svg<C: Chart>(chart: &C) -> Result<String> {
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, chart.size()).into_drawing_area();
        chart.draw(&root, true).map_err(draw_error)?;
        root.present().map_err(draw_error)?;
    }
    Ok(buf)
}

/// Draw a chart as PNG bytes.
pub fn render_png<C: Chart>(chart: &C) -> Result<Vec<u8>> {
    let (width, height) = chart.size();
    let mut pixels = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
        chart.draw(&root, BITMAP_TEXT).map_err(draw_error)?;
        root.present().map_err(draw_error)?;
    }

    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(&pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| Error::render(format!("PNG encoding failed: {e}")))?;
    Ok(out)
}

/// Draw a chart in the given format.
pub fn render<C: Chart>(chart: &C, format: Format) -> Result<Vec<u8>> {
    match format {
        Format::Svg => render_svg(chart).map(String::into_bytes),
        Format::Png => render_png(chart),
    }
}

fn draw_error<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> Error {
    Error::render(e.to_string())
}

fn text_style(size: u32) -> TextStyle<'static> {
    TextStyle::from((FONT, size).into_font()).color(&BLACK)
}

// ============================================================================
// Site distribution
// ============================================================================

/// Bar chart of iceberg counts per study site.
#[derive(Debug, Clone)]
pub struct DistributionChart {
    names: Vec<String>,
    values: Vec<f64>,
}

impl DistributionChart {
    /// Title drawn above the bars.
    pub const TITLE: &'static str = "Data distribution for Greenland Glacier study sites";

    /// Build from `(site name, count)` pairs in display order.
    pub fn new(entries: impl IntoIterator<Item = (String, f64)>) -> Result<Self> {
        let (names, values): (Vec<String>, Vec<f64>) = entries.into_iter().unzip();
        if names.is_empty() {
            return Err(Error::empty("No study sites with iceberg counts to plot"));
        }
        Ok(Self { names, values })
    }
}

impl Chart for DistributionChart {
    fn size(&self) -> (u32, u32) {
        (1000, 600)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>, text: bool) -> DrawResult<DB> {
        root.fill(&WHITE)?;

        let y_max = self.values.iter().copied().fold(0.0_f64, f64::max).max(1.0) * 1.05;
        let n = self.names.len();

        let mut builder = ChartBuilder::on(root);
        builder.margin(15);
        if text {
            builder
                .caption(Self::TITLE, (FONT, 22))
                .x_label_area_size(150)
                .y_label_area_size(60);
        }
        let mut chart = builder.build_cartesian_2d((0..n).into_segmented(), 0.0..y_max)?;

        if text {
            let names = &self.names;
            let label = |v: &SegmentValue<usize>| match v {
                SegmentValue::CenterOf(i) => names.get(*i).cloned().unwrap_or_default(),
                _ => String::new(),
            };
            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(n)
                .x_label_formatter(&label)
                .x_label_style((FONT, 12).into_font().transform(FontTransform::Rotate90))
                .x_desc("Study site")
                .y_desc("Corresponding Icebergs")
                .draw()?;
        } else {
            chart.configure_mesh().disable_x_mesh().draw()?;
        }

        let shades = stats::normalize(&self.values);
        for (i, (value, shade)) in self.values.iter().zip(shades).enumerate() {
            let corners = [
                (SegmentValue::Exact(i), 0.0),
                (SegmentValue::Exact(i + 1), *value),
            ];
            let fill = RGBColor::from(palette::blues(shade));
            let mut bar = Rectangle::new(corners.clone(), fill.filled());
            bar.set_margin(0, 0, 3, 3);
            let mut edge = Rectangle::new(corners, BLACK.stroke_width(1));
            edge.set_margin(0, 0, 3, 3);
            chart.draw_series([bar, edge])?;
        }
        Ok(())
    }
}

// ============================================================================
// Correlogram
// ============================================================================

/// Annotated correlation heatmap.
#[derive(Debug, Clone)]
pub struct Correlogram {
    labels: Vec<String>,
    matrix: Vec<Vec<Option<f64>>>,
}

impl Correlogram {
    /// Title drawn above the grid.
    pub const TITLE: &'static str = "Correlogram of Iceberg Features";

    const LEFT: i32 = 170;
    const TOP: i32 = 50;
    const BOTTOM: i32 = 170;
    const RIGHT: i32 = 110;

    /// Build from column labels and a square correlation matrix.
    pub fn new(labels: Vec<String>, matrix: Vec<Vec<Option<f64>>>) -> Result<Self> {
        if labels.is_empty() {
            return Err(Error::empty("No numeric columns to correlate"));
        }
        if matrix.len() != labels.len() || matrix.iter().any(|row| row.len() != labels.len()) {
            return Err(Error::render(format!(
                "Correlation matrix does not match {} labels",
                labels.len()
            )));
        }
        Ok(Self { labels, matrix })
    }

    /// Correlate every column of `(name, values)`.
    pub fn from_columns(columns: &[(String, Vec<Option<f64>>)]) -> Result<Self> {
        let labels = columns.iter().map(|(name, _)| name.clone()).collect();
        let values: Vec<Vec<Option<f64>>> = columns.iter().map(|(_, v)| v.clone()).collect();
        Self::new(labels, stats::correlation_matrix(&values))
    }

    /// Column labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Correlation matrix, row-major.
    pub fn matrix(&self) -> &[Vec<Option<f64>>] {
        &self.matrix
    }
}

impl Chart for Correlogram {
    fn size(&self) -> (u32, u32) {
        (1000, 800)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>, text: bool) -> DrawResult<DB> {
        root.fill(&WHITE)?;

        let (width, height) = self.size();
        let n = self.labels.len() as i32;
        let grid_w = width as i32 - Self::LEFT - Self::RIGHT;
        let grid_h = height as i32 - Self::TOP - Self::BOTTOM;
        let cell = (grid_w.min(grid_h) / n).max(1);
        let x0 = Self::LEFT;
        let y0 = Self::TOP;

        let annotation = text_style(if n > 12 { 10 } else { 14 }).pos(Pos::new(HPos::Center, VPos::Center));
        for (i, row) in self.matrix.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                let (cx, cy) = (x0 + j as i32 * cell, y0 + i as i32 * cell);
                let fill = match value {
                    Some(r) => RGBColor::from(palette::coolwarm((r + 1.0) / 2.0)),
                    None => RGBColor(0xee, 0xee, 0xee),
                };
                root.draw(&Rectangle::new([(cx, cy), (cx + cell, cy + cell)], fill.filled()))?;
                root.draw(&Rectangle::new([(cx, cy), (cx + cell, cy + cell)], WHITE.stroke_width(1)))?;
                if let (true, Some(r)) = (text, value) {
                    root.draw(&Text::new(
                        format!("{r:.2}"),
                        (cx + cell / 2, cy + cell / 2),
                        annotation.clone(),
                    ))?;
                }
            }
        }

        // Colour bar from -1 (bottom) to 1 (top).
        let bar_x = x0 + n * cell + 30;
        let bar_h = n * cell;
        for step in 0..bar_h {
            let t = 1.0 - f64::from(step) / f64::from(bar_h.max(1));
            let color = RGBColor::from(palette::coolwarm(t));
            root.draw(&Rectangle::new(
                [(bar_x, y0 + step), (bar_x + 20, y0 + step + 1)],
                color.filled(),
            ))?;
        }
        root.draw(&Rectangle::new(
            [(bar_x, y0), (bar_x + 20, y0 + bar_h)],
            BLACK.stroke_width(1),
        ))?;

        if !text {
            return Ok(());
        }

        root.draw(&Text::new(
            Self::TITLE,
            (x0 + n * cell / 2, y0 / 2),
            text_style(20).pos(Pos::new(HPos::Center, VPos::Center)),
        ))?;

        let row_label = text_style(13).pos(Pos::new(HPos::Right, VPos::Center));
        let col_label = TextStyle::from((FONT, 13).into_font().transform(FontTransform::Rotate90))
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Center));
        for (k, label) in self.labels.iter().enumerate() {
            let mid = k as i32 * cell + cell / 2;
            root.draw(&Text::new(label.clone(), (x0 - 8, y0 + mid), row_label.clone()))?;
            root.draw(&Text::new(label.clone(), (x0 + mid, y0 + n * cell + 8), col_label.clone()))?;
        }

        let tick = text_style(12).pos(Pos::new(HPos::Left, VPos::Center));
        for value in [-1.0, -0.5, 0.0, 0.5, 1.0_f64] {
            let y = y0 + ((1.0 - (value + 1.0) / 2.0) * f64::from(bar_h)).round() as i32;
            root.draw(&PathElement::new(vec![(bar_x + 20, y), (bar_x + 25, y)], BLACK.stroke_width(1)))?;
            root.draw(&Text::new(format!("{value:.1}"), (bar_x + 28, y), tick.clone()))?;
        }
        Ok(())
    }
}

// ============================================================================
// Single-shape panel
// ============================================================================

/// One iceberg outline on axes shared with its siblings.
#[derive(Debug, Clone)]
pub struct ShapePanel {
    title: String,
    geometry: MultiPolygon<f64>,
    max_width: f64,
    max_height: f64,
    color: Rgb,
}

impl ShapePanel {
    /// `geometry` should already be translated so its bounding box starts at
    /// the origin; the axes span `[0, max_width] x [0, max_height]`.
    pub fn new(
        title: impl Into<String>,
        geometry: MultiPolygon<f64>,
        (max_width, max_height): (f64, f64),
        color: Rgb,
    ) -> Self {
        Self {
            title: title.into(),
            geometry,
            max_width,
            max_height,
            color,
        }
    }
}

impl Chart for ShapePanel {
    fn size(&self) -> (u32, u32) {
        (420, 420)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>, text: bool) -> DrawResult<DB> {
        root.fill(&WHITE)?;

        let mut builder = ChartBuilder::on(root);
        builder.margin(10);
        if text {
            builder
                .caption(&self.title, (FONT, 14))
                .x_label_area_size(40)
                .y_label_area_size(55);
        }
        let mut chart = builder.build_cartesian_2d(
            0.0..positive_or_one(self.max_width),
            0.0..positive_or_one(self.max_height),
        )?;

        let mut mesh = chart.configure_mesh();
        if text {
            mesh.x_desc("Width (m)").y_desc("Height (m)").x_labels(5).y_labels(5);
        }
        mesh.draw()?;

        let fill = RGBColor::from(self.color).mix(0.8).filled();
        for polygon in &self.geometry {
            chart.draw_series(outline_elements(polygon, fill, 2))?;
        }
        Ok(())
    }
}

fn positive_or_one(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 1.0 }
}

/// Filled exterior, blanked holes, then black outlines.
fn outline_elements<DB: DrawingBackend>(
    polygon: &geo::Polygon<f64>,
    fill: ShapeStyle,
    stroke: u32,
) -> Vec<DynElement<'static, DB, (f64, f64)>> {
    fn ring(line: &geo::LineString<f64>) -> Vec<(f64, f64)> {
        line.coords().map(|c| (c.x, c.y)).collect()
    }
    let mut elements = Vec::new();
    elements.push(Polygon::new(ring(polygon.exterior()), fill).into_dyn());
    for hole in polygon.interiors() {
        elements.push(Polygon::new(ring(hole), WHITE.filled()).into_dyn());
    }
    elements.push(PathElement::new(ring(polygon.exterior()), BLACK.stroke_width(stroke)).into_dyn());
    for hole in polygon.interiors() {
        elements.push(PathElement::new(ring(hole), BLACK.stroke_width(stroke)).into_dyn());
    }
    elements
}

// ============================================================================
// Quartile comparison
// ============================================================================

/// Outlines binned by area into quartiles, oriented horizontally and
/// overlaid in a 2x2 grid on one shared symmetric scale.
#[derive(Debug, Clone)]
pub struct QuartileFigure {
    groups: [Vec<MultiPolygon<f64>>; 4],
    limit: f64,
}

impl QuartileFigure {
    /// File name offered for the download.
    pub const DOWNLOAD_NAME: &'static str = "quartile_icebergs.png";

    /// Bin, orient and scale a set of outlines.
    pub fn new(shapes: &[MultiPolygon<f64>]) -> Result<Self> {
        if shapes.is_empty() {
            return Err(Error::empty("No shapefiles to compare"));
        }
        let areas: Vec<f64> = shapes.iter().map(|g| g.unsigned_area()).collect();
        let bins = group_by_quartile(&areas);

        let oriented = |indices: &Vec<usize>| -> Vec<MultiPolygon<f64>> {
            indices.iter().map(|&i| orient_horizontal(&shapes[i])).collect()
        };
        let groups = [oriented(&bins[0]), oriented(&bins[1]), oriented(&bins[2]), oriented(&bins[3])];

        let limit = groups
            .iter()
            .flatten()
            .flat_map(|g| g.iter())
            .flat_map(|p| p.exterior().coords())
            .map(|c| c.x.abs().max(c.y.abs()))
            .filter(|v| v.is_finite())
            .fold(0.0_f64, f64::max);

        Ok(Self {
            groups,
            limit: positive_or_one(limit * 1.05),
        })
    }

    /// Number of outlines in each quartile.
    pub fn counts(&self) -> [usize; 4] {
        [
            self.groups[0].len(),
            self.groups[1].len(),
            self.groups[2].len(),
            self.groups[3].len(),
        ]
    }

    /// Half-width of the shared axes, in metres.
    pub fn limit(&self) -> f64 {
        self.limit
    }
}

impl Chart for QuartileFigure {
    fn size(&self) -> (u32, u32) {
        (1000, 1000)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>, text: bool) -> DrawResult<DB> {
        root.fill(&WHITE)?;
        let panels = root.split_evenly((2, 2));
        let lim = self.limit;

        for ((panel, quartile), group) in panels.iter().zip(Quartile::ALL).zip(&self.groups) {
            let mut builder = ChartBuilder::on(panel);
            builder.margin(12);
            if text {
                let noun = if group.len() == 1 { "iceberg" } else { "icebergs" };
                builder
                    .caption(format!("{quartile} ({} {noun})", group.len()), (FONT, 18))
                    .x_label_area_size(35)
                    .y_label_area_size(55);
            }
            let mut chart = builder.build_cartesian_2d(-lim..lim, -lim..lim)?;
            let mut mesh = chart.configure_mesh();
            if text {
                mesh.x_desc("Width (m)").y_desc("Height (m)").x_labels(5).y_labels(5);
            }
            mesh.draw()?;

            let shade = RGBColor::from(palette::blues(0.35 + 0.2 * quartile.index() as f64));
            for geometry in group {
                for polygon in geometry {
                    let points: Vec<(f64, f64)> =
                        polygon.exterior().coords().map(|c| (c.x, c.y)).collect();
                    chart.draw_series([
                        Polygon::new(points.clone(), shade.mix(0.3).filled()).into_dyn(),
                        PathElement::new(points, BLACK.mix(0.5).stroke_width(1)).into_dyn(),
                    ])?;
                }
            }
        }
        Ok(())
    }
}
