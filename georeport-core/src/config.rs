//! Configuration types for report generation

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::{ReportError, Result};

/// Top-level configuration for a report run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoreportConfig {
    /// Catalog connection configuration
    pub catalog: CatalogConfig,

    /// Report output configuration
    pub report: ReportConfig,
}

impl GeoreportConfig {
    /// Load configuration from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }
}

/// Catalog connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Base URL of the catalog REST endpoint
    pub base_url: String,

    /// Username for basic authentication
    pub username: String,

    /// Password for basic authentication
    pub password: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,

    /// User agent string
    pub user_agent: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/geoserver/rest".to_string(),
            username: "admin".to_string(),
            password: String::new(),
            timeout_seconds: 30,
            user_agent: concat!("georeport/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl CatalogConfig {
    /// Validate and parse the configured base URL
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the base URL is not an absolute
    /// http(s) URL.
    pub fn parsed_base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.base_url)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ReportError::config(format!(
                "unsupported catalog URL scheme '{other}' in {url}"
            ))),
        }
    }

    /// Base URL with any trailing slash removed, for joining REST paths
    #[must_use]
    pub fn base_url_trimmed(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Report output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory the artifact is written to
    pub output_dir: PathBuf,

    /// Filename stem; the generation timestamp and extension are appended
    pub filename_stem: String,

    /// Worksheet zoom level
    pub zoom: u16,

    /// Column width cap in characters
    pub max_column_width: usize,

    /// Maximum group-name length carried into a sub-sheet title
    pub sheet_title_limit: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            filename_stem: "geoserver_report".to_string(),
            zoom: 125,
            max_column_width: 50,
            sheet_title_limit: 25,
        }
    }
}

impl ReportConfig {
    /// Artifact path for a run started at `now`
    #[must_use]
    pub fn artifact_path(&self, now: DateTime<Local>) -> PathBuf {
        let stamp = now.format("%Y%m%d_%H-%M-%S");
        self.output_dir
            .join(format!("{}_{stamp}.xlsx", self.filename_stem))
    }
}
