use image::{DynamicImage, GrayImage};
use std::sync::Arc;

use crate::error::{LoadError, ProcessingError, RenderError};
use crate::models::{AppConfig, Channel};
use crate::processing::{
    equalize_histogram, load_image, split_channels, to_grayscale, Equalized, Histogram,
    IntensityPlane, Kernel,
};
use crate::rendering::{encode_dynamic, encode_gray, HistogramPlotter, PlotColor, PlotSeries};

/// Error from the report pipeline
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Processing error: {0}")]
    Processing(#[from] ProcessingError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Template error: {0}")]
    Template(#[from] super::TemplateError),

    #[error("Report task failed: {0}")]
    Task(String),
}

/// Derived images and histograms of one source image.
pub struct Analysis {
    pub grayscale: GrayImage,
    pub equalized: Equalized,
    /// Histograms in page order: red, green, blue, grayscale, equalized
    pub histograms: [(Channel, Histogram); 5],
}

/// One rendered histogram plot
pub struct PlotImage {
    pub title: String,
    pub png_bytes: Vec<u8>,
}

/// A convolution of the grayscale image with its histogram plots
pub struct FilteredImage {
    pub kernel: Kernel,
    pub png_bytes: Vec<u8>,
    pub plot: PlotImage,
    /// Grayscale and filtered histograms on one chart
    pub comparison: PlotImage,
}

/// Everything the page shows, PNG-encoded
pub struct Report {
    pub width: u32,
    pub height: u32,
    pub original: Vec<u8>,
    pub grayscale: Vec<u8>,
    pub equalized: Vec<u8>,
    pub plots: Vec<PlotImage>,
    /// Combined charts: all color channels, then grayscale vs equalized
    pub overlays: Vec<PlotImage>,
    pub filtered: Vec<FilteredImage>,
}

const ALL_CHANNELS_TITLE: &str = "All Channels";
const GRAYSCALE_VS_EQUALIZED_TITLE: &str = "Grayscale vs Equalized";

/// Runs load → split → grayscale → equalize → histograms → plots.
///
/// Every call starts from the file on disk; nothing is kept between runs.
pub struct ReportPipeline {
    config: Arc<AppConfig>,
    plotter: Arc<HistogramPlotter>,
}

impl ReportPipeline {
    pub fn new(config: Arc<AppConfig>, plotter: Arc<HistogramPlotter>) -> Self {
        Self { config, plotter }
    }

    /// Derive the grayscale and equalized images and all five histograms.
    pub fn analyze(img: &DynamicImage) -> Result<Analysis, ProcessingError> {
        let grayscale = to_grayscale(img);
        let equalized = equalize_histogram(&grayscale)?;
        let planes = split_channels(img);

        let histograms = [
            (Channel::Red, Histogram::from_plane(&planes.red)),
            (Channel::Green, Histogram::from_plane(&planes.green)),
            (Channel::Blue, Histogram::from_plane(&planes.blue)),
            (
                Channel::Grayscale,
                Histogram::from_plane(&IntensityPlane::from(&grayscale)),
            ),
            (
                Channel::Equalized,
                Histogram::from_plane(&IntensityPlane::from(&equalized.image)),
            ),
        ];

        Ok(Analysis {
            grayscale,
            equalized,
            histograms,
        })
    }

    /// Load the configured image and build the full report.
    pub fn run(&self) -> Result<Report, ReportError> {
        let img = load_image(&self.config.image_path)?;
        self.build(&img)
    }

    /// Build the report for an already decoded image.
    pub fn build(&self, img: &DynamicImage) -> Result<Report, ReportError> {
        let analysis = Self::analyze(img)?;

        let plots = analysis
            .histograms
            .iter()
            .map(|(channel, hist)| self.plot(*channel, channel.title(), hist))
            .collect::<Result<Vec<_>, _>>()?;

        let [red, green, blue, gray, equalized] = &analysis.histograms;
        let overlays = vec![
            self.overlay(ALL_CHANNELS_TITLE, &[red, green, blue])?,
            self.overlay(GRAYSCALE_VS_EQUALIZED_TITLE, &[gray, equalized])?,
        ];
        let gray_series = self.series(gray);

        let mut filtered = Vec::with_capacity(self.config.filters.len());
        for &kernel in &self.config.filters {
            let out = kernel.apply(&analysis.grayscale);
            let hist = Histogram::from_plane(&IntensityPlane::from(&out));
            let title = format!("{} Histogram", kernel.label());
            let filtered_series = PlotSeries {
                histogram: &hist,
                color: self.color(Channel::Filtered),
                label: kernel.label(),
            };
            let comparison_title = format!("Grayscale vs {}", kernel.label());
            let comparison_bytes = self
                .plotter
                .render_overlay(&[gray_series, filtered_series], &comparison_title)?;
            filtered.push(FilteredImage {
                kernel,
                png_bytes: encode_gray(&out)?,
                plot: self.plot(Channel::Filtered, &title, &hist)?,
                comparison: PlotImage {
                    title: comparison_title,
                    png_bytes: comparison_bytes,
                },
            });
            tracing::debug!(kernel = %kernel, "Applied filter");
        }

        let report = Report {
            width: img.width(),
            height: img.height(),
            original: encode_dynamic(img)?,
            grayscale: encode_gray(&analysis.grayscale)?,
            equalized: encode_gray(&analysis.equalized.image)?,
            plots,
            overlays,
            filtered,
        };

        tracing::debug!(
            width = report.width,
            height = report.height,
            plots = report.plots.len() + report.overlays.len(),
            filtered = report.filtered.len(),
            "Report built"
        );

        Ok(report)
    }

    fn color(&self, channel: Channel) -> PlotColor {
        PlotColor::from_name(self.config.color_for(channel))
    }

    fn series<'a>(&self, (channel, hist): &'a (Channel, Histogram)) -> PlotSeries<'a> {
        PlotSeries {
            histogram: hist,
            color: self.color(*channel),
            label: channel.label(),
        }
    }

    fn plot(&self, channel: Channel, title: &str, hist: &Histogram) -> Result<PlotImage, RenderError> {
        let png_bytes = self.plotter.render(hist, self.color(channel), title)?;
        Ok(PlotImage {
            title: title.to_string(),
            png_bytes,
        })
    }

    fn overlay(
        &self,
        title: &str,
        layers: &[&(Channel, Histogram)],
    ) -> Result<PlotImage, RenderError> {
        let series: Vec<PlotSeries<'_>> = layers.iter().map(|layer| self.series(layer)).collect();
        let png_bytes = self.plotter.render_overlay(&series, title)?;
        Ok(PlotImage {
            title: title.to_string(),
            png_bytes,
        })
    }

    /// Get the config
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
