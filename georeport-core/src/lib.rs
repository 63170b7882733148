//! # georeport Core
//!
//! Core types and traits for turning a geospatial catalog into a
//! cross-referenced spreadsheet audit report.
//!
//! This crate provides the building blocks shared by the report engine and
//! its adapters: raw catalog record shapes, canonical entity rows, the
//! sentinel convention for absent data, error handling, configuration, and
//! the [`traits::CatalogSource`] seam the engine consumes.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Core error types for report operations
pub mod error;

/// Configuration types for catalog access and report output
pub mod config;

/// Core trait definitions for catalog access
pub mod traits;

/// Record and entity types for the report model
pub mod types;

// Re-export commonly used types
pub use config::{CatalogConfig, GeoreportConfig, ReportConfig};
pub use error::{ReportError, Result};
pub use traits::CatalogSource;
pub use types::{
    GroupMemberRow, Layer, LayerGroup, LayerStyleInfo, MemberKind, RawLayer, RawLayerGroup,
    RawStore, RawStyleRef, RawWorkspace, SENTINEL, Store, Style, Workspace, extract_crs,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{CatalogConfig, GeoreportConfig, ReportConfig};
    pub use crate::error::{ReportError, Result};
    pub use crate::traits::CatalogSource;
    pub use crate::types::{
        GroupMemberRow, Layer, LayerGroup, LayerStyleInfo, MemberKind, RawLayer, RawLayerGroup,
        RawStore, RawStyleRef, RawWorkspace, SENTINEL, Store, Style, Workspace, extract_crs,
        join_or_sentinel, or_sentinel,
    };
}
