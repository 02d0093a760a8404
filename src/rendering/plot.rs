use resvg::usvg::{self, fontdb, Transform};
use std::path::Path;
use std::sync::Arc;
use tiny_skia::Pixmap;

use crate::error::RenderError;
use crate::models::PlotConfig;
use crate::processing::{Histogram, LEVELS};

/// Bar colors a histogram can be drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotColor {
    Red,
    Green,
    Blue,
    Gray,
    Black,
}

impl PlotColor {
    /// Parse a color name, case-insensitively. Unknown names draw black.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "red" => PlotColor::Red,
            "green" => PlotColor::Green,
            "blue" => PlotColor::Blue,
            "gray" | "grey" => PlotColor::Gray,
            _ => PlotColor::Black,
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            PlotColor::Red => (255, 0, 0),
            PlotColor::Green => (0, 255, 0),
            PlotColor::Blue => (0, 0, 255),
            PlotColor::Gray => (128, 128, 128),
            PlotColor::Black => (0, 0, 0),
        }
    }
}

// Chart layout in canvas units
const MARGIN_X: f32 = 8.0;
const TITLE_BAND: f32 = 22.0;
const AXIS_BAND: f32 = 14.0;
const TITLE_FONT_SIZE: f32 = 12.0;
const TICK_FONT_SIZE: f32 = 9.0;
const LEGEND_ROW: f32 = 12.0;
const SWATCH: f32 = 8.0;

/// Fill opacity of each layer when several histograms share one chart.
const OVERLAY_OPACITY: f32 = 0.3;

/// One histogram layer of a chart.
#[derive(Debug, Clone, Copy)]
pub struct PlotSeries<'a> {
    pub histogram: &'a Histogram,
    pub color: PlotColor,
    /// Legend text, shown only on overlay charts
    pub label: &'a str,
}

/// Renders 256-bucket histograms as bar-chart PNGs.
///
/// The chart is described as SVG and rasterized with resvg, so title text
/// goes through the same font machinery as any other SVG text.
pub struct HistogramPlotter {
    /// Font database for the title and axis labels
    fontdb: Arc<fontdb::Database>,
    width: u32,
    height: u32,
}

impl HistogramPlotter {
    /// Create a plotter using system fonts plus any fonts found in `fonts_dir`.
    pub fn new(plot: PlotConfig, fonts_dir: Option<&Path>) -> Self {
        let mut fontdb = fontdb::Database::new();
        fontdb.load_system_fonts();

        if let Some(dir) = fonts_dir {
            fontdb.load_fonts_dir(dir);
            tracing::debug!(dir = %dir.display(), "Loaded fonts from directory");
        }

        tracing::info!(
            font_count = fontdb.len(),
            width = plot.width,
            height = plot.height,
            "Histogram plotter ready"
        );

        Self {
            fontdb: Arc::new(fontdb),
            width: plot.width,
            height: plot.height,
        }
    }

    /// Render `hist` as a PNG bar chart with one bar per intensity level.
    pub fn render(
        &self,
        hist: &Histogram,
        color: PlotColor,
        title: &str,
    ) -> Result<Vec<u8>, RenderError> {
        let series = PlotSeries {
            histogram: hist,
            color,
            label: title,
        };
        self.render_chart(&[series], title)
    }

    /// Render several histograms on one chart as translucent layers.
    ///
    /// All layers share the vertical scale of the tallest bucket, and a
    /// legend names each layer.
    pub fn render_overlay(
        &self,
        series: &[PlotSeries<'_>],
        title: &str,
    ) -> Result<Vec<u8>, RenderError> {
        self.render_chart(series, title)
    }

    fn render_chart(&self, series: &[PlotSeries<'_>], title: &str) -> Result<Vec<u8>, RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidCanvas {
                width: self.width,
                height: self.height,
            });
        }

        let svg = self.chart_svg(series, title);
        let pixmap = self.rasterize_svg(&svg)?;
        super::encode_png(self.width, self.height, png::ColorType::Rgba, pixmap.data())
    }

    /// Describe the chart as an SVG document.
    ///
    /// A single series is drawn opaque without a legend.
    fn chart_svg(&self, series: &[PlotSeries<'_>], title: &str) -> String {
        let (w, h) = (self.width as f32, self.height as f32);
        let plot_left = MARGIN_X;
        let plot_width = (w - 2.0 * MARGIN_X).max(1.0);
        let plot_right = plot_left + plot_width;
        let plot_bottom = (h - AXIS_BAND).max(TITLE_BAND + 1.0);
        let plot_height = plot_bottom - TITLE_BAND;
        let bar_width = plot_width / LEVELS as f32;

        let overlay = series.len() > 1;
        let opacity = if overlay { OVERLAY_OPACITY } else { 1.0 };
        let max = series
            .iter()
            .map(|s| s.histogram.max_count())
            .max()
            .unwrap_or(0);

        let mut svg = String::with_capacity(16 * 1024 * series.len().max(1));
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">
  <rect width="{w}" height="{h}" fill="white"/>
  <text x="{cx}" y="{ty}" text-anchor="middle" fill="black" font-family="sans-serif" font-size="{TITLE_FONT_SIZE}">{title}</text>
"#,
            cx = w / 2.0,
            ty = TITLE_BAND - 6.0,
            title = xml_escape(title),
        ));

        for s in series {
            let (r, g, b) = s.color.rgb();
            svg.push_str(&format!(
                "  <g class=\"layer\" fill=\"rgb({r},{g},{b})\" fill-opacity=\"{opacity}\" shape-rendering=\"crispEdges\">\n"
            ));
            if max > 0 {
                for (level, &count) in s.histogram.counts().iter().enumerate() {
                    if count == 0 {
                        continue;
                    }
                    let bar_height = count as f32 / max as f32 * plot_height;
                    svg.push_str(&format!(
                        "    <rect class=\"bar\" x=\"{:.3}\" y=\"{:.3}\" width=\"{:.3}\" height=\"{:.3}\"/>\n",
                        plot_left + level as f32 * bar_width,
                        plot_bottom - bar_height,
                        bar_width,
                        bar_height,
                    ));
                }
            }
            svg.push_str("  </g>\n");
        }

        if overlay {
            for (row, s) in series.iter().enumerate() {
                let (r, g, b) = s.color.rgb();
                let y = TITLE_BAND + 2.0 + row as f32 * LEGEND_ROW;
                svg.push_str(&format!(
                    r#"  <rect class="legend" x="{sx}" y="{y}" width="{SWATCH}" height="{SWATCH}" fill="rgb({r},{g},{b})"/>
  <text x="{tx}" y="{ly}" text-anchor="end" fill="black" font-family="sans-serif" font-size="{TICK_FONT_SIZE}">{label}</text>
"#,
                    sx = plot_right - SWATCH,
                    tx = plot_right - SWATCH - 3.0,
                    ly = y + SWATCH,
                    label = xml_escape(s.label),
                ));
            }
        }

        svg.push_str(&format!(
            r#"  <line x1="{plot_left}" y1="{plot_bottom}" x2="{plot_right}" y2="{plot_bottom}" stroke="black" stroke-width="1"/>
  <text x="{plot_left}" y="{ly}" fill="black" font-family="sans-serif" font-size="{TICK_FONT_SIZE}">0</text>
  <text x="{plot_right}" y="{ly}" text-anchor="end" fill="black" font-family="sans-serif" font-size="{TICK_FONT_SIZE}">255</text>
</svg>"#,
            ly = plot_bottom + TICK_FONT_SIZE + 2.0,
        ));

        svg
    }

    /// Parse and rasterize SVG to an RGBA pixmap
    fn rasterize_svg(&self, svg: &str) -> Result<Pixmap, RenderError> {
        let options = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree =
            usvg::Tree::from_str(svg, &options).map_err(|e| RenderError::SvgParse(e.to_string()))?;

        let mut pixmap =
            Pixmap::new(self.width, self.height).ok_or(RenderError::PixmapAllocation)?;
        pixmap.fill(tiny_skia::Color::WHITE);

        resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());

        Ok(pixmap)
    }
}

/// Escape text for use inside SVG markup
fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
