use serde::{Deserialize, Serialize};

/// Privileged window operations the UI may request from the host.
///
/// This is the whole protocol: a closed set of one-way, fire-and-forget
/// messages with at most a single primitive payload. There are no responses
/// and no acknowledgements - it is a command channel, not an RPC channel.
///
/// Commands use the wire tags of the original IPC channels so a UI speaking
/// the old names keeps working: `{"type":"toggle-always-on-top","flag":true}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    /// Pin or unpin the window above other windows.
    #[serde(rename = "toggle-always-on-top")]
    ToggleAlwaysOnTop { flag: bool },

    /// Minimize the window.
    #[serde(rename = "minimize-window")]
    MinimizeWindow,

    /// Close the window. On platforms where the last window closing means
    /// quit, this also begins application shutdown.
    #[serde(rename = "close-window")]
    CloseWindow,
}

impl Command {
    /// Wire tag for log output.
    pub fn name(&self) -> &'static str {
        match self {
            Command::ToggleAlwaysOnTop { .. } => "toggle-always-on-top",
            Command::MinimizeWindow => "minimize-window",
            Command::CloseWindow => "close-window",
        }
    }
}
