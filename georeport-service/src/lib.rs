//! # georeport Service
//!
//! Report-assembly engine for geospatial catalog audits.
//!
//! The engine builds an in-memory relational model from heterogeneous
//! catalog records, resolves the many-to-many associations between layer
//! groups and their members, and renders the model into a multi-sheet
//! spreadsheet with deterministic ordering, derived columns and inter-sheet
//! cross-reference links.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use georeport_core::config::GeoreportConfig;
//! use georeport_service::catalog::RestCatalog;
//! use georeport_service::run::generate_report;
//!
//! #[tokio::main]
//! async fn main() -> georeport_core::error::Result<()> {
//!     let config = GeoreportConfig::default();
//!     let catalog = RestCatalog::new(&config.catalog)?;
//!     let path = generate_report(&catalog, &config).await?;
//!     println!("report written to {}", path.display());
//!     Ok(())
//! }
//! ```
//!
//! The pipeline is a single pass: every catalog call is awaited to
//! completion before the next begins, the model is immutable once built, and
//! cross-reference annotation is a separate read-only pass over the finished
//! model.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Catalog adapter: REST access and response decoding
pub mod catalog;

/// Command-line interface
pub mod cli;

/// Artifact rendering
pub mod generator;

/// Report model assembly
pub mod report;

/// Single-pass generation pipeline
pub mod run;

// Re-export the pipeline entry points
pub use run::{assemble_model, fetch_catalog, generate_report};
