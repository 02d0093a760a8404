//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{routing::any, Router};
use std::path::Path;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::assets::AssetLoader;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::rendering::HistogramPlotter;
use crate::services::{ReportPipeline, ReportService, TemplateService};

/// Application state shared across all handlers.
///
/// Everything in here is immutable; requests share no mutable state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub report_service: Arc<ReportService>,
}

/// Create application state with config loaded from the asset loader.
pub fn create_app_state(asset_loader: Arc<AssetLoader>) -> anyhow::Result<AppState> {
    let config = AppConfig::load_from_assets(&asset_loader);
    create_app_state_with_config(asset_loader, config, None)
}

/// Create application state from an explicit config.
pub fn create_app_state_with_config(
    asset_loader: Arc<AssetLoader>,
    config: AppConfig,
    fonts_dir: Option<&Path>,
) -> anyhow::Result<AppState> {
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    let config = Arc::new(config);
    let plotter = Arc::new(HistogramPlotter::new(config.plot, fonts_dir));
    let pipeline = Arc::new(ReportPipeline::new(config.clone(), plotter));
    let templates = Arc::new(TemplateService::new(asset_loader));
    let report_service = Arc::new(ReportService::new(pipeline, templates));

    Ok(AppState {
        config,
        report_service,
    })
}

/// Build the router: a single route at the root, any method.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", any(handle_report))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

// Wrapper handler to extract the state component for the underlying API handler

async fn handle_report(
    axum::extract::State(state): axum::extract::State<AppState>,
    method: axum::http::Method,
) -> Result<axum::response::Html<String>, ApiError> {
    api::handle_report(axum::extract::State(state.report_service), method).await
}
