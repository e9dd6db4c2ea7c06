//! Default implementations for configuration types.
//!
//! This module contains all `Default` implementations and helper functions
//! for providing default values in serde deserialization.

use std::path::PathBuf;

use crate::config::types::{BackendConfig, IngestConfig, ProbeConfig, WindowConfig};

/// Returns the default backend interpreter.
///
/// Used by serde `#[serde(default = "...")]` attribute.
pub fn default_backend_executable() -> String {
    "python".to_string()
}

/// Returns the default backend entry path, relative to the run-mode root.
///
/// Used by serde `#[serde(default = "...")]` attribute.
pub fn default_backend_entrypoint() -> PathBuf {
    PathBuf::from("backend/server.py")
}

/// Returns the default backend base URL.
///
/// Used by serde `#[serde(default = "...")]` attribute.
pub fn default_backend_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

pub fn default_window_width() -> f32 {
    400.0
}

pub fn default_window_height() -> f32 {
    600.0
}

pub fn default_probe_path() -> String {
    "/test".to_string()
}

/// Probe timeout (2s). The probe is a user-triggered connectivity check from
/// the UI thread's helper, so it must give up quickly.
pub fn default_probe_timeout_ms() -> u64 {
    2000
}

pub fn default_ingest_path() -> String {
    "/ingest-browser".to_string()
}

/// Ingestion timeout (5s). Page content is unbounded, so delivery gets more
/// slack than the probe before being counted lost.
pub fn default_ingest_timeout_ms() -> u64 {
    5000
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            executable: default_backend_executable(),
            entrypoint: default_backend_entrypoint(),
            url: default_backend_url(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_window_width(),
            height: default_window_height(),
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            path: default_probe_path(),
            timeout_ms: default_probe_timeout_ms(),
        }
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            path: default_ingest_path(),
            timeout_ms: default_ingest_timeout_ms(),
        }
    }
}
