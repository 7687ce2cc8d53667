//! Configuration loading and management

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration for the content service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// The only origin allowed to make cross-origin requests (the presentation client)
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,

    /// File name of the dataset document, relative to the config directory
    #[serde(default = "default_database_file")]
    pub database_file: String,
}

fn default_allowed_origin() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_database_file() -> String {
    "database.json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allowed_origin: default_allowed_origin(),
            database_file: default_database_file(),
        }
    }
}

impl Config {
    /// Load configuration from the config directory
    pub fn load(config_path: &Path) -> Result<Self> {
        let config_file = config_path.join("config.json");

        if config_file.exists() {
            let content = std::fs::read_to_string(&config_file)
                .with_context(|| format!("Failed to read config file: {:?}", config_file))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", config_file))?;
            tracing::info!("Loaded configuration from {:?}", config_file);
            Ok(config)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_file);
            let config = Config::default();

            // Create config directory if it doesn't exist
            std::fs::create_dir_all(config_path)
                .with_context(|| format!("Failed to create config directory: {:?}", config_path))?;

            // Write default config for reference
            let content = serde_json::to_string_pretty(&config)?;
            std::fs::write(&config_file, content)
                .with_context(|| format!("Failed to write default config: {:?}", config_file))?;
            tracing::info!("Created default config at {:?}", config_file);

            Ok(config)
        }
    }

    /// Full path of the dataset document
    pub fn database_path(&self, config_path: &Path) -> PathBuf {
        config_path.join(&self.database_file)
    }
}
