//! Engine configuration file loading.
//!
//! The file is TOML and every key is optional:
//!
//! ```toml
//! parallel_threshold = 32
//!
//! [symbol_aliases]
//! FB = "META"
//!
//! [xirr]
//! tolerance = 1e-9
//! day_count = "Act365Fixed"
//! ```

use std::path::Path;

use folio_returns::config::ReturnsConfig;

use crate::error::{CliError, CliResult};

/// Loads engine configuration from a TOML file.
pub fn from_file(path: &Path) -> CliResult<ReturnsConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ReturnsConfig = toml::from_str(&content)
        .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))?;
    config
        .validate()
        .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))?;
    Ok(config)
}

/// Loads the configuration file if one was given, defaults otherwise.
pub fn load(path: Option<&Path>) -> CliResult<ReturnsConfig> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path.display());
            from_file(path)
        }
        None => {
            tracing::debug!("Using default configuration");
            Ok(ReturnsConfig::default())
        }
    }
}
