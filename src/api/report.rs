use axum::{extract::State, http::Method, response::Html};
use std::sync::Arc;

use crate::error::ApiError;
use crate::services::ReportService;

/// Serve the report page
///
/// Runs the whole pipeline against the configured image on every request
/// and answers with one HTML document carrying all images inline.
/// Any method is accepted.
pub async fn handle_report(
    State(service): State<Arc<ReportService>>,
    method: Method,
) -> Result<Html<String>, ApiError> {
    tracing::info!(
        %method,
        image = %service.pipeline().config().image_path.display(),
        "Report requested"
    );

    let html = service.render_page().await?;
    Ok(Html(html))
}
