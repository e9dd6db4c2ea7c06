//! roost-core: Core library for the Roost assistant shell
//!
//! This library holds everything about the shell that is not pixels: the
//! backend process handle, the application supervisor, the UI command bridge,
//! the window controller, and the boundary contracts for the liveness probe
//! and browser-page ingestion. It is used by both the shell and the relay
//! binaries.
//!
//! # Main Entry Points
//!
//! - [`supervisor`] - Application lifecycle state machine and event loop
//! - [`backend`] - Spawn, monitor, and terminate the backend process
//! - [`bridge`] - UI -> host command protocol
//! - [`window`] - Window state and the surface seam to the UI toolkit
//! - [`probe`] - Best-effort backend connectivity probe
//! - [`ingest`] - Page-capture delivery contract
//! - [`config`] - Configuration management

pub mod backend;
pub mod bridge;
pub mod config;
pub mod errors;
pub mod events;
pub mod ingest;
pub mod logging;
pub mod probe;
pub mod supervisor;
pub mod window;

// Re-export commonly used types at crate root for convenience
pub use backend::{BackendError, BackendEvent, BackendHandle, LaunchPlan};
pub use bridge::{Command, Event, Store};
pub use config::{RoostConfig, RunMode};
pub use ingest::{DeliveryOutcome, PageCapture};
pub use probe::ProbeStatus;
pub use supervisor::{DispatchError, Phase, ShellEvent, Supervisor, SurfaceFactory};
pub use window::{WindowController, WindowState, WindowSurface};

// Re-export logging initialization
pub use logging::init_logging;
