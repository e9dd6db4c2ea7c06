//! Best-effort backend connectivity probe.
//!
//! The shell opens its window without waiting for the backend, so the UI
//! needs a way to ask "is it up yet?". This is that query: pull-based,
//! bounded, and degraded-not-fatal on every failure path. There is
//! deliberately no blocking readiness handshake anywhere else.

pub mod client;
pub mod types;

pub use client::probe;
pub use types::ProbeStatus;
