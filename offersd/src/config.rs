//! Application configuration management.
//!
//! This module handles loading and merging configuration from multiple sources
//! with a clear precedence order. Configuration can come from default values,
//! configuration files, and environment variables.

use crate::Cli;
use anyhow::{Context as _, bail};
use serde::{Deserialize, Serialize};

/// The main application configuration that composes all component configs
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Web server configuration (bind address, pagination, public URL)
    #[serde(default)]
    pub server: offers_axum::config::AxumConfig,

    /// Database configuration (file location, pool size)
    #[serde(default)]
    pub database: offers_sqlite::config::SqliteConfig,
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file given by the CLI
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern:
    /// `APP_<SECTION>__<KEY>` maps to `<section>.<key>`
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Keep offers in a file rather than in memory
    /// export APP_DATABASE__DATABASE_PATH="/data/offers.db"
    ///
    /// # Set server bind address
    /// export APP_SERVER__BIND_ADDRESS="0.0.0.0:3000"
    /// ```
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Start with default values
        config = config.add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = &cli.config {
            if !path.exists() {
                bail!("Config file {} does not exist", path.display());
            }
            config = config.add_source(config::File::from(path.as_path()));
        }

        // This maps APP_SERVER__BIND_ADDRESS to server.bind_address
        config = config.add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        config
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{io::Write as _, path::PathBuf};

    #[test]
    fn defaults_without_a_file() {
        let config = AppConfig::load(&Cli::default()).unwrap();
        assert_eq!(config.server.default_page_size, 20);
        assert_eq!(config.server.max_page_size, 100);
        assert_eq!(config.server.public_url, None);
        assert_eq!(config.database.database_path, None);
        assert!(config.database.create_if_missing);
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
            [server]
            bind_address = "127.0.0.1:9000"
            max_page_size = 50
            public_url = "http://localhost:9000"

            [database]
            database_path = "offers.db"
            "#
        )
        .unwrap();

        let cli = Cli {
            config: Some(file.path().to_path_buf()),
            schema: None,
        };
        let config = AppConfig::load(&cli).unwrap();

        assert_eq!(config.server.bind_address.port(), 9000);
        assert_eq!(config.server.max_page_size, 50);
        assert_eq!(config.server.default_page_size, 20);
        assert_eq!(
            config.server.public_url.as_deref(),
            Some("http://localhost:9000")
        );
        assert_eq!(
            config.database.database_path,
            Some(PathBuf::from("offers.db"))
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let cli = Cli {
            config: Some(PathBuf::from("/definitely/not/here/offersd.toml")),
            schema: None,
        };
        assert!(AppConfig::load(&cli).is_err());
    }
}
