use crate::assets::AssetLoader;
use crate::models::Channel;
use crate::processing::Kernel;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Source image, read on every request
    #[serde(default = "default_image_path")]
    pub image_path: PathBuf,

    /// Listen address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Histogram plot canvas
    #[serde(default)]
    pub plot: PlotConfig,

    /// Channel name to display color name
    #[serde(default)]
    pub channel_colors: HashMap<String, String>,

    /// Convolution kernels applied to the grayscale image
    #[serde(default)]
    pub filters: Vec<Kernel>,
}

fn default_image_path() -> PathBuf {
    PathBuf::from("images/cats.jpg")
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

/// Canvas size of each histogram plot
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct PlotConfig {
    #[serde(default = "default_plot_width")]
    pub width: u32,

    #[serde(default = "default_plot_height")]
    pub height: u32,
}

fn default_plot_width() -> u32 {
    300
}

fn default_plot_height() -> u32 {
    200
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: default_plot_width(),
            height: default_plot_height(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid plot size: {width}x{height}")]
    InvalidPlotSize { width: u32, height: u32 },
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::info!(
                        image = %config.image_path.display(),
                        filters = config.filters.len(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Replace the image path and bind address when given (env overrides)
    pub fn with_overrides(mut self, image_path: Option<PathBuf>, bind_addr: Option<String>) -> Self {
        if let Some(path) = image_path {
            self.image_path = path;
        }
        if let Some(addr) = bind_addr {
            self.bind_addr = addr;
        }
        self
    }

    /// Reject settings that would make every request fail
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.plot.width == 0 || self.plot.height == 0 {
            return Err(ConfigError::InvalidPlotSize {
                width: self.plot.width,
                height: self.plot.height,
            });
        }
        Ok(())
    }

    /// Display color name for a channel's histogram
    pub fn color_for(&self, channel: Channel) -> &str {
        self.channel_colors
            .get(channel.key())
            .map(String::as_str)
            .unwrap_or_else(|| channel.default_color())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            image_path: default_image_path(),
            bind_addr: default_bind_addr(),
            plot: PlotConfig::default(),
            channel_colors: HashMap::new(),
            filters: Vec::new(),
        }
    }
}
