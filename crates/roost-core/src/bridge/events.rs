use serde::{Deserialize, Serialize};

/// Window state changes that resulted from a dispatched command.
///
/// Each variant describes _what happened_, not what should happen. A command
/// that found no window to act on produces no events at all - dropped
/// commands are silent by design, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// The always-on-top flag was applied to the window.
    AlwaysOnTopSet { flag: bool },
    /// The window was minimized.
    WindowMinimized,
    /// The window was closed.
    WindowClosed,
}
