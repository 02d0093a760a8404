use std::sync::Arc;

use crate::services::{ReportError, ReportPipeline, TemplateService};

/// High-level service that turns the configured image into the HTML page
pub struct ReportService {
    pipeline: Arc<ReportPipeline>,
    templates: Arc<TemplateService>,
}

impl ReportService {
    pub fn new(pipeline: Arc<ReportPipeline>, templates: Arc<TemplateService>) -> Self {
        Self {
            pipeline,
            templates,
        }
    }

    /// Run the whole pipeline and render the page on the current thread.
    pub fn render_page_blocking(&self) -> Result<String, ReportError> {
        let started = std::time::Instant::now();
        let report = self.pipeline.run()?;
        let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let html = self.templates.render_report(&report, &generated_at)?;

        tracing::info!(
            width = report.width,
            height = report.height,
            html_bytes = html.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Report rendered"
        );

        Ok(html)
    }

    /// Render the page
    ///
    /// Uses spawn_blocking to avoid blocking the async runtime during
    /// decoding, pixel processing and plot rasterization.
    pub async fn render_page(self: &Arc<Self>) -> Result<String, ReportError> {
        let service = Arc::clone(self);

        tokio::task::spawn_blocking(move || service.render_page_blocking())
            .await
            .map_err(|e| ReportError::Task(e.to_string()))?
    }

    pub fn pipeline(&self) -> &ReportPipeline {
        &self.pipeline
    }
}
