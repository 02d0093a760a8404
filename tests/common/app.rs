//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use image::RgbImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use histoscope::assets::AssetLoader;
use histoscope::models::{AppConfig, PlotConfig};
use histoscope::processing::Kernel;
use histoscope::rendering::HistogramPlotter;
use histoscope::server::{build_router, create_app_state_with_config, AppState};
use histoscope::services::{ReportPipeline, ReportService, TemplateService};

use super::fixtures;

/// Test application with router and a private image directory
pub struct TestApp {
    router: axum::Router,
    dir: TempDir,
    image_path: PathBuf,
}

impl TestApp {
    /// Create a test app serving the 2x2 primaries image
    pub fn new() -> Self {
        Self::with_image(&fixtures::primaries())
    }

    /// Create a test app serving `img`
    pub fn with_image(img: &RgbImage) -> Self {
        Self::build(Some(img), |_| {}, Self::create_state)
    }

    /// Create a test app that also renders the given filters
    pub fn with_filters(img: &RgbImage, filters: Vec<Kernel>) -> Self {
        Self::build(Some(img), |config| config.filters = filters, Self::create_state)
    }

    /// Create a test app whose configured image does not exist
    pub fn without_image() -> Self {
        Self::build(None, |_| {}, Self::create_state)
    }

    /// Create a test app drawing plots on the given canvas
    ///
    /// Skips config validation, so an unusable canvas reaches the plotter.
    pub fn with_unchecked_plot(img: &RgbImage, plot: PlotConfig) -> Self {
        Self::build(Some(img), |config| config.plot = plot, Self::create_state_unchecked)
    }

    fn build(
        img: Option<&RgbImage>,
        configure: impl FnOnce(&mut AppConfig),
        create_state: fn(AppConfig) -> AppState,
    ) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let image_path = match img {
            Some(img) => fixtures::write_png(dir.path(), img),
            None => dir.path().join(fixtures::IMAGE_NAME),
        };

        let mut config = AppConfig {
            image_path: image_path.clone(),
            ..AppConfig::default()
        };
        configure(&mut config);
        let router = build_router(create_state(config));

        Self {
            router,
            dir,
            image_path,
        }
    }

    /// Create state from an explicit config using embedded assets
    pub fn create_state(config: AppConfig) -> AppState {
        let asset_loader = Arc::new(AssetLoader::new(None, None));
        create_app_state_with_config(asset_loader, config, None)
            .expect("Failed to create app state")
    }

    /// Wire up the services by hand, without validating `config`
    pub fn create_state_unchecked(config: AppConfig) -> AppState {
        let config = Arc::new(config);
        let plotter = Arc::new(HistogramPlotter::new(config.plot, None));
        let pipeline = Arc::new(ReportPipeline::new(config.clone(), plotter));
        let templates = Arc::new(TemplateService::new(Arc::new(AssetLoader::new(None, None))));

        AppState {
            config,
            report_service: Arc::new(ReportService::new(pipeline, templates)),
        }
    }

    /// Directory holding the source image
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Path the server reads on every request
    pub fn image_path(&self) -> &Path {
        &self.image_path
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.send(Method::GET, path).await
    }

    /// Make a request with an arbitrary method and empty body
    pub async fn send(&self, method: Method, path: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.request(request).await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Content-Type header value, empty if absent
    pub fn content_type(&self) -> &str {
        self.headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    /// Check if response is an HTML page
    pub fn is_html(&self) -> bool {
        self.content_type().starts_with("text/html")
    }

    /// Number of embedded PNG data URIs in the body
    pub fn data_uri_count(&self) -> usize {
        self.text().matches("data:image/png;base64,").count()
    }
}
