use tracing::{debug, info};

use crate::window::errors::WindowError;
use crate::window::types::WindowState;

/// The seam between the controller and the real UI toolkit.
///
/// Every operation is fire-and-forget into the toolkit's own event loop;
/// none of them report completion. Implementations must be callable from the
/// supervisor's thread.
pub trait WindowSurface: Send {
    /// Bring the window on screen (first open or re-open on activate).
    fn show(&self);
    fn set_always_on_top(&self, flag: bool);
    fn minimize(&self);
    fn close(&self);
}

/// Owns the single window's state and its surface.
///
/// All mutation goes through here, and every mutator is a safe no-op once
/// the window is gone: a command racing window teardown is expected traffic,
/// not a fault. Each mutator returns whether it actually applied, so the
/// dispatcher can report dropped commands as empty event sets.
pub struct WindowController {
    state: WindowState,
    surface: Option<Box<dyn WindowSurface>>,
}

impl WindowController {
    pub fn new() -> Self {
        Self {
            state: WindowState::default(),
            surface: None,
        }
    }

    /// Attach a surface, marking the window open.
    ///
    /// Attaching while a window is already open is refused - the supervisor
    /// is responsible for never creating a second window. A previously set
    /// always-on-top flag is re-applied so the state survives re-open.
    pub fn attach(&mut self, surface: Box<dyn WindowSurface>) -> Result<(), WindowError> {
        if self.surface.is_some() {
            return Err(WindowError::AlreadyOpen);
        }

        surface.show();
        if self.state.always_on_top {
            surface.set_always_on_top(true);
        }
        self.surface = Some(surface);
        self.state.visible = true;

        info!(event = "core.window.opened", pinned = self.state.always_on_top);
        Ok(())
    }

    /// Whether a window is currently open.
    pub fn is_open(&self) -> bool {
        self.surface.is_some()
    }

    pub fn state(&self) -> &WindowState {
        &self.state
    }

    /// Apply the always-on-top flag. Returns false (dropped) without a window.
    pub fn set_always_on_top(&mut self, flag: bool) -> bool {
        let Some(surface) = &self.surface else {
            self.log_dropped("toggle-always-on-top");
            return false;
        };
        self.state.always_on_top = flag;
        surface.set_always_on_top(flag);
        debug!(event = "core.window.always_on_top_set", flag = flag);
        true
    }

    /// Minimize the window. Returns false (dropped) without a window.
    pub fn minimize(&mut self) -> bool {
        let Some(surface) = &self.surface else {
            self.log_dropped("minimize-window");
            return false;
        };
        surface.minimize();
        debug!(event = "core.window.minimized");
        true
    }

    /// Close the window and detach the surface. Returns false (dropped) when
    /// there is no window left to close.
    pub fn close(&mut self) -> bool {
        let Some(surface) = self.surface.take() else {
            self.log_dropped("close-window");
            return false;
        };
        surface.close();
        self.state.visible = false;
        info!(event = "core.window.closed");
        true
    }

    /// Record a platform-initiated close (the window is already gone, so the
    /// surface is dropped without a close call). Idempotent.
    pub fn mark_closed(&mut self) {
        if self.surface.take().is_some() {
            self.state.visible = false;
            info!(event = "core.window.closed_by_platform");
        }
    }

    fn log_dropped(&self, command: &str) {
        debug!(
            event = "core.window.command_dropped",
            command = command,
            "No window open - command is a no-op"
        );
    }
}

impl Default for WindowController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum SurfaceOp {
        Show,
        AlwaysOnTop(bool),
        Minimize,
        Close,
    }

    #[derive(Clone, Default)]
    struct RecordingSurface {
        ops: Arc<Mutex<Vec<SurfaceOp>>>,
    }

    impl RecordingSurface {
        fn ops(&self) -> Vec<SurfaceOp> {
            self.ops.lock().unwrap().clone()
        }
    }

    impl WindowSurface for RecordingSurface {
        fn show(&self) {
            self.ops.lock().unwrap().push(SurfaceOp::Show);
        }
        fn set_always_on_top(&self, flag: bool) {
            self.ops.lock().unwrap().push(SurfaceOp::AlwaysOnTop(flag));
        }
        fn minimize(&self) {
            self.ops.lock().unwrap().push(SurfaceOp::Minimize);
        }
        fn close(&self) {
            self.ops.lock().unwrap().push(SurfaceOp::Close);
        }
    }

    #[test]
    fn test_attach_shows_window() {
        let surface = RecordingSurface::default();
        let mut controller = WindowController::new();

        controller.attach(Box::new(surface.clone())).unwrap();
        assert!(controller.is_open());
        assert!(controller.state().visible);
        assert_eq!(surface.ops(), vec![SurfaceOp::Show]);
    }

    #[test]
    fn test_attach_twice_is_refused() {
        let mut controller = WindowController::new();
        controller
            .attach(Box::new(RecordingSurface::default()))
            .unwrap();
        let result = controller.attach(Box::new(RecordingSurface::default()));
        assert!(matches!(result, Err(WindowError::AlreadyOpen)));
    }

    #[test]
    fn test_mutators_without_window_are_noops() {
        let mut controller = WindowController::new();
        assert!(!controller.set_always_on_top(true));
        assert!(!controller.minimize());
        assert!(!controller.close());
        // State untouched by dropped commands
        assert!(!controller.state().always_on_top);
    }

    #[test]
    fn test_always_on_top_toggles_in_order() {
        let surface = RecordingSurface::default();
        let mut controller = WindowController::new();
        controller.attach(Box::new(surface.clone())).unwrap();

        assert!(controller.set_always_on_top(true));
        assert!(controller.state().always_on_top);
        assert!(controller.set_always_on_top(false));
        assert!(!controller.state().always_on_top);

        assert_eq!(
            surface.ops(),
            vec![
                SurfaceOp::Show,
                SurfaceOp::AlwaysOnTop(true),
                SurfaceOp::AlwaysOnTop(false),
            ]
        );
    }

    #[test]
    fn test_close_detaches_and_further_commands_drop() {
        let surface = RecordingSurface::default();
        let mut controller = WindowController::new();
        controller.attach(Box::new(surface.clone())).unwrap();

        assert!(controller.close());
        assert!(!controller.is_open());
        assert!(!controller.state().visible);
        assert_eq!(surface.ops(), vec![SurfaceOp::Show, SurfaceOp::Close]);

        // Second close and any mutation after close are no-ops, not faults
        assert!(!controller.close());
        assert!(!controller.minimize());
        assert!(!controller.set_always_on_top(true));
    }

    #[test]
    fn test_mark_closed_is_idempotent_and_skips_close_call() {
        let surface = RecordingSurface::default();
        let mut controller = WindowController::new();
        controller.attach(Box::new(surface.clone())).unwrap();

        controller.mark_closed();
        controller.mark_closed();

        assert!(!controller.is_open());
        // No Close op: the platform already destroyed the window
        assert_eq!(surface.ops(), vec![SurfaceOp::Show]);
    }

    #[test]
    fn test_pin_survives_reopen() {
        let first = RecordingSurface::default();
        let mut controller = WindowController::new();
        controller.attach(Box::new(first)).unwrap();
        controller.set_always_on_top(true);
        controller.mark_closed();

        let second = RecordingSurface::default();
        controller.attach(Box::new(second.clone())).unwrap();
        assert_eq!(
            second.ops(),
            vec![SurfaceOp::Show, SurfaceOp::AlwaysOnTop(true)]
        );
    }
}
