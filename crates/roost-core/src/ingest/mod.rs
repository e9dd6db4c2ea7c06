//! Page-capture ingestion contract.
//!
//! The relay runs outside the host (browser side); the host never sees these
//! events. This module holds the shared wire shape and the single-attempt
//! delivery client the relay binary uses.

pub mod client;
pub mod types;

pub use client::deliver;
pub use types::{DeliveryOutcome, PageCapture, is_capturable_url};
