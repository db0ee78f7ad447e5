mod file_config;

pub use file_config::FileConfig;

use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub catalog_db: Option<PathBuf>,
    pub port: u16,
    pub base_url: Option<String>,
    pub logging_level: RequestsLoggingLevel,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog_db: PathBuf,
    pub port: u16,
    pub base_url: String,
    pub logging_level: RequestsLoggingLevel,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        // TOML overrides CLI for each field
        let catalog_db = file
            .db_path
            .map(PathBuf::from)
            .or_else(|| cli.catalog_db.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("catalog db path must be given as an argument or in config file")
            })?;

        if catalog_db.is_dir() {
            bail!("Catalog db path is a directory: {:?}", catalog_db);
        }
        if let Some(parent) = catalog_db.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                bail!("Catalog db parent directory does not exist: {:?}", parent);
            }
        }

        let port = file.port.unwrap_or(cli.port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        // Links baked into created rows point at this prefix. Without an
        // explicit value the server assumes it is addressed via loopback.
        let base_url = file
            .base_url
            .or_else(|| cli.base_url.clone())
            .unwrap_or_else(|| format!("http://127.0.0.1:{}", port));

        Ok(Self {
            catalog_db,
            port,
            base_url,
            logging_level,
        })
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
