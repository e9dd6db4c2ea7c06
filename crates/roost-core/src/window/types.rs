use serde::{Deserialize, Serialize};

/// Observable state of the single application window.
///
/// Owned exclusively by the [`WindowController`](super::WindowController);
/// nothing else mutates it. `frameless` is fixed at creation - the shell
/// draws its own title bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowState {
    pub always_on_top: bool,
    pub visible: bool,
    pub frameless: bool,
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            always_on_top: false,
            visible: false,
            frameless: true,
        }
    }
}
