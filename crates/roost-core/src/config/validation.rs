//! Configuration validation.

use crate::config::types::RoostConfig;
use crate::errors::ConfigError;

/// Validate a loaded configuration.
///
/// Rejects values that would make the shell misbehave in confusing ways
/// later (a zero-size window, a probe that can never complete, a backend URL
/// the HTTP client cannot speak to).
pub fn validate_config(config: &RoostConfig) -> Result<(), ConfigError> {
    if config.backend.executable.trim().is_empty() {
        return Err(invalid("backend.executable must not be empty"));
    }

    if config.backend.entrypoint.as_os_str().is_empty() {
        return Err(invalid("backend.entrypoint must not be empty"));
    }

    if !config.backend.url.starts_with("http://") && !config.backend.url.starts_with("https://") {
        return Err(invalid(&format!(
            "backend.url must be an http(s) URL, got '{}'",
            config.backend.url
        )));
    }

    if config.window.width <= 0.0 || config.window.height <= 0.0 {
        return Err(invalid("window dimensions must be positive"));
    }

    if config.probe.timeout_ms == 0 {
        return Err(invalid("probe.timeout_ms must be non-zero"));
    }

    if config.ingest.timeout_ms == 0 {
        return Err(invalid("ingest.timeout_ms must be non-zero"));
    }

    Ok(())
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::InvalidConfiguration {
        message: message.to_string(),
    }
}
