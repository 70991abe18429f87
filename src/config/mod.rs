#[cfg(feature = "cli")]
pub mod cli;
pub mod settings;
pub mod toml_config;

pub use settings::{DatabaseSettings, ImportConfig, SeedConfig};
pub use toml_config::FileConfig;

use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::path::Path;

/// Loads and validates the config file when one is given.
pub fn load_file_config(path: Option<&Path>) -> Result<FileConfig> {
    match path {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            let config = FileConfig::from_file(path)?;
            config.validate()?;
            Ok(config)
        }
        None => Ok(FileConfig::default()),
    }
}
