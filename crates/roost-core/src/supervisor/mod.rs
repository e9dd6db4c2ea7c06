//! The application supervisor.
//!
//! Owns startup and shutdown ordering for the window and the backend
//! process: backend first, window immediately after (no readiness wait),
//! and on any shutdown trigger the backend is killed exactly once before
//! the host exits.

pub mod errors;
pub mod lifecycle;
pub mod types;

pub use errors::DispatchError;
pub use lifecycle::{Supervisor, SurfaceFactory, quit_on_last_window_close_default, run};
pub use types::{Phase, ShellEvent};
