//! Error types for report generation

use thiserror::Error;

/// Main error type for report generation
#[derive(Error, Debug)]
pub enum ReportError {
    /// Catalog request or decode failures
    #[error("Catalog request failed: {message}")]
    Catalog {
        /// Error message
        message: String,
        /// Endpoint that failed, if known
        endpoint: Option<String>,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Sheet rendering errors
    #[error("Failed to render sheet '{sheet}': {message}")]
    Render {
        /// Sheet being rendered
        sheet: String,
        /// Error message
        message: String,
    },

    /// Workbook-level sink errors
    #[error("Workbook error: {0}")]
    Workbook(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

impl ReportError {
    /// Create a new catalog error
    #[must_use]
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog {
            message: message.into(),
            endpoint: None,
        }
    }

    /// Create a new catalog error tagged with the failing endpoint
    #[must_use]
    pub fn catalog_at(message: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::Catalog {
            message: message.into(),
            endpoint: Some(endpoint.into()),
        }
    }

    /// Create a new configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a new render error for a named sheet
    #[must_use]
    pub fn render(sheet: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Render {
            sheet: sheet.into(),
            message: message.into(),
        }
    }

    /// Create a new workbook error
    #[must_use]
    pub fn workbook(message: impl Into<String>) -> Self {
        Self::Workbook(message.into())
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for ReportError {
    fn from(err: url::ParseError) -> Self {
        Self::Config(err.to_string())
    }
}
