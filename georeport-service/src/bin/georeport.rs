//! `georeport` command-line tool
//!
//! Generates a timestamped, cross-referenced spreadsheet audit of a
//! GeoServer catalog.

use georeport_core::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    georeport_service::cli::run().await
}
