//! Asset loading with embedded fallbacks
//!
//! The default `config.yaml` and the HTML page template are compiled into
//! the binary. Either can be overridden from the filesystem:
//!
//! - If a path is NOT configured: use the embedded asset
//! - If a path IS configured and the file exists: use the file
//! - If a path IS configured but the file is missing: fall back to embedded

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Embedded HTML templates
#[derive(RustEmbed)]
#[folder = "templates/"]
#[include = "*.html"]
struct EmbeddedTemplates;

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

/// Name of the page template inside the embedded templates folder
pub const REPORT_TEMPLATE: &str = "report.html";

/// Report of init (extraction) operations
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Asset loader with optional filesystem override
pub struct AssetLoader {
    /// External config file path (from CONFIG_FILE env var)
    config_file: Option<PathBuf>,
    /// External page template path (from TEMPLATE_FILE env var)
    template_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// Paths should be `Some` only if the corresponding env var was set.
    pub fn new(config_file: Option<PathBuf>, template_file: Option<PathBuf>) -> Self {
        Self {
            config_file,
            template_file,
        }
    }

    /// Read the config file
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        if let Some(data) = Self::read_external(self.config_file.as_deref())? {
            return Ok(Cow::Owned(data));
        }

        EmbeddedConfig::get("config.yaml")
            .map(|f| {
                tracing::trace!("Loading config from embedded assets");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found")
            })
    }

    /// Read config as a UTF-8 string
    pub fn read_config_string(&self) -> io::Result<String> {
        let bytes = self.read_config()?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Read the page template as a UTF-8 string
    ///
    /// Called on every render so edits to an external template show up
    /// without a restart.
    pub fn read_template_string(&self) -> io::Result<String> {
        let bytes = match Self::read_external(self.template_file.as_deref())? {
            Some(data) => Cow::Owned(data),
            None => EmbeddedTemplates::get(REPORT_TEMPLATE)
                .map(|f| f.data)
                .ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("Embedded {REPORT_TEMPLATE} not found"),
                    )
                })?,
        };
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn read_external(path: Option<&Path>) -> io::Result<Option<Vec<u8>>> {
        match path {
            Some(path) if path.exists() => {
                tracing::trace!(path = %path.display(), "Loading asset from filesystem");
                fs::read(path).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Extract embedded assets to filesystem (init command)
    ///
    /// Uses the configured paths, or `./config.yaml` and
    /// `./templates/report.html` when not set.
    pub fn init(&self, force: bool) -> io::Result<InitReport> {
        let mut report = InitReport::default();

        let config_path = self
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("./config.yaml"));
        let template_path = self
            .template_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("./templates").join(REPORT_TEMPLATE));

        let targets = [
            (config_path, EmbeddedConfig::get("config.yaml").map(|f| f.data)),
            (template_path, EmbeddedTemplates::get(REPORT_TEMPLATE).map(|f| f.data)),
        ];

        for (path, data) in targets {
            if !force && path.exists() {
                report.skipped.push(path.display().to_string());
                continue;
            }
            if let Some(data) = data {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&path, &*data)?;
                report.written.push(path.display().to_string());
            }
        }

        Ok(report)
    }

    /// List embedded assets (for display)
    pub fn list_embedded() -> Vec<String> {
        let mut files: Vec<String> = EmbeddedConfig::iter().map(|s| s.to_string()).collect();
        files.extend(EmbeddedTemplates::iter().map(|s| format!("templates/{s}")));
        files
    }
}
