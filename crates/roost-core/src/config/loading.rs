//! Configuration loading logic.
//!
//! # Configuration Lookup
//!
//! Configuration is read from the nearest of (first match wins):
//! 1. An explicit path (`--config` flag)
//! 2. **Project config** - `./.roost/config.toml`
//! 3. **User config** - `~/.roost/config.toml`
//! 4. **Hardcoded defaults** - Built-in fallback values
//!
//! Missing files are not errors; unreadable or invalid files are.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::types::RoostConfig;
use crate::config::validation::validate_config;
use crate::errors::ConfigError;

/// Load configuration from the nearest config file, or defaults.
pub fn load() -> Result<RoostConfig, ConfigError> {
    for candidate in [project_config_path(), user_config_path()]
        .into_iter()
        .flatten()
    {
        if candidate.exists() {
            debug!(
                event = "core.config.file_selected",
                path = %candidate.display()
            );
            return load_file(&candidate);
        }
    }

    debug!(event = "core.config.defaults_used");
    let config = RoostConfig::default();
    validate_config(&config)?;
    Ok(config)
}

/// Load configuration from an explicit file path.
///
/// Unlike [`load`], a missing file is an error here: the caller asked for
/// this file specifically.
pub fn load_file(path: &Path) -> Result<RoostConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::ConfigNotFound {
            path: path.display().to_string(),
        });
    }

    let content = fs::read_to_string(path)?;
    let config: RoostConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
            message: format!("'{}': {}", path.display(), e),
        })?;

    validate_config(&config)?;
    Ok(config)
}

fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".roost").join("config.toml"))
}

fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".roost").join("config.toml"))
}
