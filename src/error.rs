use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::path::PathBuf;
use thiserror::Error;

use crate::services::ReportError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Error loading image")]
    Load(#[from] LoadError),

    #[error("Invalid input: {0}")]
    Processing(#[from] ProcessingError),

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ReportError> for ApiError {
    fn from(e: ReportError) -> Self {
        match e {
            ReportError::Load(e) => ApiError::Load(e),
            ReportError::Processing(e) => ApiError::Processing(e),
            ReportError::Render(e) => ApiError::Render(e),
            ReportError::Template(e) => ApiError::Template(e.to_string()),
            ReportError::Task(e) => ApiError::Internal(e),
        }
    }
}

/// Failure to read or decode the source image.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Zero-area image: {width}x{height}")]
    InvalidInput { width: u32, height: u32 },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("SVG parse error: {0}")]
    SvgParse(String),

    #[error("Invalid canvas: {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },

    #[error("Failed to allocate pixmap")]
    PixmapAllocation,

    #[error("PNG encode error: {0}")]
    PngEncode(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Details go to the log; the body stays short and path-free.
        match &self {
            ApiError::Load(e) => tracing::error!(error = %e, "Image load failed"),
            _ => tracing::error!(error = %self, "Report generation failed"),
        }

        let message = match &self {
            ApiError::Load(_) => self.to_string(),
            ApiError::Processing(_) => self.to_string(),
            ApiError::Render(_) => "Error rendering histogram".to_string(),
            ApiError::Template(_) | ApiError::Internal(_) => "Internal server error".to_string(),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
    }
}
