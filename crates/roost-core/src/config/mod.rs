//! # Configuration System
//!
//! TOML configuration for the Roost shell.
//!
//! Configuration is read from the nearest of (first match wins):
//! 1. An explicit path (`--config` flag)
//! 2. **Project config** - `./.roost/config.toml`
//! 3. **User config** - `~/.roost/config.toml`
//! 4. **Hardcoded defaults** - Built-in fallback values
//!
//! The development/packaged run mode comes from the `ROOST_MODE` environment
//! variable, never from a file; it only changes where a relative backend
//! entrypoint is resolved from.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use roost_core::config::RoostConfig;
//!
//! // Handle config errors explicitly - don't silently fall back to defaults
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RoostConfig::load()?;
//!     let probe_url = config.probe_url();
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

// Public API exports
pub use types::{BackendConfig, IngestConfig, ProbeConfig, RoostConfig, RunMode, WindowConfig};
pub use validation::validate_config;

impl RoostConfig {
    /// Load configuration from the nearest config file, or defaults.
    ///
    /// See [`loading::load`] for details.
    pub fn load() -> Result<Self, crate::errors::ConfigError> {
        loading::load()
    }

    /// Load configuration from an explicit file path.
    ///
    /// See [`loading::load_file`] for details.
    pub fn load_file(path: &std::path::Path) -> Result<Self, crate::errors::ConfigError> {
        loading::load_file(path)
    }

    /// Validate the configuration.
    ///
    /// See [`validation::validate_config`] for details.
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }
}
