//! Configuration type definitions for the Roost shell.
//!
//! These types are serialized/deserialized from TOML config files.
//!
//! # Example Configuration
//!
//! ```toml
//! [backend]
//! executable = "python"
//! entrypoint = "backend/server.py"
//! url = "http://127.0.0.1:8000"
//!
//! [window]
//! width = 400.0
//! height = 600.0
//!
//! [probe]
//! path = "/test"
//! timeout_ms = 2000
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::backend::LaunchPlan;
use crate::config::defaults;

/// Run mode for the shell, selected by the `ROOST_MODE` environment variable.
///
/// The mode only changes where the backend entrypoint is resolved from:
/// relative to the working directory in development, relative to the installed
/// application in a packaged build. Nothing else is persisted or mode-driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Development,
    Packaged,
}

impl RunMode {
    /// Read the run mode from the `ROOST_MODE` environment variable.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var("ROOST_MODE").ok().as_deref())
    }

    /// Resolve a mode from an environment value. Anything other than
    /// `packaged` means development.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some("packaged") => RunMode::Packaged,
            _ => RunMode::Development,
        }
    }
}

/// Main configuration loaded from TOML config files.
///
/// Loaded from `./.roost/config.toml` if present, otherwise
/// `~/.roost/config.toml`, otherwise built-in defaults (nearest wins).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RoostConfig {
    /// Backend process configuration
    #[serde(default)]
    pub backend: BackendConfig,

    /// Window dimensions
    #[serde(default)]
    pub window: WindowConfig,

    /// Connectivity probe configuration
    #[serde(default)]
    pub probe: ProbeConfig,

    /// Page-capture ingestion configuration
    #[serde(default)]
    pub ingest: IngestConfig,
}

/// Backend process configuration.
///
/// The backend is launched as `<executable> <entrypoint>` with no further
/// arguments and no startup handshake.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Interpreter or binary to launch, resolved via PATH at spawn time.
    #[serde(default = "defaults::default_backend_executable")]
    pub executable: String,

    /// Entry path handed to the executable as its single argument.
    #[serde(default = "defaults::default_backend_entrypoint")]
    pub entrypoint: PathBuf,

    /// Base URL the backend serves on once it is up.
    #[serde(default = "defaults::default_backend_url")]
    pub url: String,
}

impl BackendConfig {
    /// Build the spawn plan for this backend under the given run mode.
    pub fn launch_plan(&self, mode: RunMode) -> LaunchPlan {
        let entrypoint = self.resolve_entrypoint(mode);
        LaunchPlan::new(
            self.executable.clone(),
            vec![entrypoint.display().to_string()],
        )
    }

    /// Resolve the entrypoint path for the given run mode.
    ///
    /// Absolute entrypoints are used as-is. Relative entrypoints resolve
    /// against the working directory in development, and against the
    /// directory of the shell executable in a packaged build.
    pub fn resolve_entrypoint(&self, mode: RunMode) -> PathBuf {
        if self.entrypoint.is_absolute() {
            return self.entrypoint.clone();
        }
        match mode {
            RunMode::Development => self.entrypoint.clone(),
            RunMode::Packaged => packaged_root().join(&self.entrypoint),
        }
    }
}

fn packaged_root() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Window dimensions. The window itself is always frameless and starts
/// without always-on-top; those are fixed by the shell, not configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "defaults::default_window_width")]
    pub width: f32,

    #[serde(default = "defaults::default_window_height")]
    pub height: f32,
}

/// Connectivity probe configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Route appended to the backend base URL.
    #[serde(default = "defaults::default_probe_path")]
    pub path: String,

    /// Whole-request timeout in milliseconds.
    #[serde(default = "defaults::default_probe_timeout_ms")]
    pub timeout_ms: u64,
}

/// Page-capture ingestion configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Route appended to the backend base URL.
    #[serde(default = "defaults::default_ingest_path")]
    pub path: String,

    /// Whole-request timeout in milliseconds.
    #[serde(default = "defaults::default_ingest_timeout_ms")]
    pub timeout_ms: u64,
}

impl RoostConfig {
    /// Full URL of the probe route.
    pub fn probe_url(&self) -> String {
        join_route(&self.backend.url, &self.probe.path)
    }

    /// Full URL of the ingestion route.
    pub fn ingest_url(&self) -> String {
        join_route(&self.backend.url, &self.ingest.path)
    }
}

fn join_route(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
