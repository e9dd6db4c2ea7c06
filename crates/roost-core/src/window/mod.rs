pub mod controller;
pub mod errors;
pub mod types;

pub use controller::{WindowController, WindowSurface};
pub use errors::WindowError;
pub use types::WindowState;
