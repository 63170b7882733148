//! Command-line interface for the report generator

use clap::Parser;
use georeport_core::config::GeoreportConfig;
use georeport_core::error::Result;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::catalog::RestCatalog;
use crate::run::generate_report;

/// Generate a cross-referenced spreadsheet audit of a GeoServer catalog
#[derive(Debug, Parser)]
#[command(name = "georeport", version, about)]
pub struct Cli {
    /// Catalog REST base URL
    #[arg(long)]
    pub url: Option<String>,

    /// Username for basic authentication
    #[arg(long)]
    pub user: Option<String>,

    /// Password for basic authentication
    #[arg(long, env = "GEOREPORT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Directory the artifact is written to
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Optional JSON configuration file; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Resolve the effective configuration from the optional config file and
    /// the flag overrides
    ///
    /// # Errors
    ///
    /// Returns an error when the config file cannot be read or parsed.
    pub fn into_config(self) -> Result<GeoreportConfig> {
        let mut config = match &self.config {
            Some(path) => GeoreportConfig::from_file(path)?,
            None => GeoreportConfig::default(),
        };
        if let Some(url) = self.url {
            config.catalog.base_url = url;
        }
        if let Some(user) = self.user {
            config.catalog.username = user;
        }
        if let Some(password) = self.password {
            config.catalog.password = password;
        }
        if let Some(output_dir) = self.output_dir {
            config.report.output_dir = output_dir;
        }
        Ok(config)
    }

    fn log_directive(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }
}

/// Main entry point for the CLI
///
/// # Errors
///
/// Returns an error when configuration is invalid, the catalog is
/// unreachable, or the artifact cannot be written.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_directive()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = cli.into_config()?;
    let catalog = RestCatalog::new(&config.catalog)?;
    let path = generate_report(&catalog, &config).await?;
    info!(path = %path.display(), "report complete");
    Ok(())
}
