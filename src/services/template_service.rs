use serde::Serialize;
use std::sync::Arc;
use tera::{Context, Tera};

use crate::assets::{AssetLoader, REPORT_TEMPLATE};
use crate::rendering::data_uri;
use crate::services::{PlotImage, Report};

/// Error type for template rendering
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Template error: {0}")]
    Tera(#[from] tera::Error),

    #[error("Failed to read template: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Serialize)]
struct PlotView {
    title: String,
    src: String,
}

impl From<&PlotImage> for PlotView {
    fn from(plot: &PlotImage) -> Self {
        Self {
            title: plot.title.clone(),
            src: data_uri(&plot.png_bytes),
        }
    }
}

#[derive(Serialize)]
struct FilteredView {
    label: &'static str,
    image: String,
    plot: PlotView,
    comparison: PlotView,
}

/// Service for rendering the HTML page with Tera
pub struct TemplateService {
    assets: Arc<AssetLoader>,
}

impl TemplateService {
    pub fn new(assets: Arc<AssetLoader>) -> Self {
        Self { assets }
    }

    /// Render the page for a report, inlining every image as a data URI.
    ///
    /// The template is read fresh on each call.
    pub fn render_report(&self, report: &Report, generated_at: &str) -> Result<String, TemplateError> {
        let template_content = self.assets.read_template_string()?;

        let mut tera = Tera::default();
        tera.add_raw_template(REPORT_TEMPLATE, &template_content)?;

        let plots: Vec<PlotView> = report.plots.iter().map(PlotView::from).collect();
        let overlays: Vec<PlotView> = report.overlays.iter().map(PlotView::from).collect();
        let filtered: Vec<FilteredView> = report
            .filtered
            .iter()
            .map(|f| FilteredView {
                label: f.kernel.label(),
                image: data_uri(&f.png_bytes),
                plot: PlotView::from(&f.plot),
                comparison: PlotView::from(&f.comparison),
            })
            .collect();

        let mut context = Context::new();
        context.insert("original", &data_uri(&report.original));
        context.insert("grayscale", &data_uri(&report.grayscale));
        context.insert("equalized", &data_uri(&report.equalized));
        context.insert("plots", &plots);
        context.insert("overlays", &overlays);
        context.insert("filtered", &filtered);
        context.insert("generated_at", generated_at);

        let html = tera.render(REPORT_TEMPLATE, &context)?;
        Ok(html)
    }
}
