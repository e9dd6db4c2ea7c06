use crate::backend::BackendEvent;
use crate::bridge::Command;

/// Application lifecycle phases.
///
/// `Starting -> Running -> ShuttingDown -> Stopped`, one direction only.
/// Shutdown entry kills the backend exactly once no matter how many triggers
/// fire; `Stopped` is terminal and accepts nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Starting,
    Running,
    ShuttingDown,
    Stopped,
}

/// Everything the supervisor's event loop consumes, from every source, in one
/// ordered inbox.
///
/// Modeling the callbacks of the underlying toolkits as messages keeps the
/// original at-most-once, ordered-per-source delivery semantics without
/// inversion of control: bridge commands from the UI, stream and exit events
/// from the backend, and lifecycle notifications from the platform all drain
/// through a single consumer.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellEvent {
    /// A bridge command issued by the UI.
    Command(Command),
    /// Output or exit from the backend process.
    Backend(BackendEvent),
    /// The platform closed the window (user action outside the bridge).
    WindowClosed,
    /// The application was re-activated (desktop "activate" convention).
    Activated,
    /// Explicit application-quit signal.
    QuitRequested,
}
