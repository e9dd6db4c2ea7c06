//! The UI -> host command bridge.
//!
//! A fixed, closed protocol of named commands sent from the untrusted UI
//! surface to the privileged host. One direction, no responses: the UI fires
//! a command and moves on. Commands arriving after the window is gone are
//! dropped silently.

pub mod events;
pub mod store;
pub mod types;

pub use events::Event;
pub use store::Store;
pub use types::Command;
