use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

use crate::backend::{BackendEvent, BackendHandle, LaunchPlan};
use crate::bridge::{Command, Event, Store};
use crate::errors::RoostError;
use crate::supervisor::errors::DispatchError;
use crate::supervisor::types::{Phase, ShellEvent};
use crate::window::{WindowController, WindowSurface};

/// Produces a surface for the window controller. Called once at startup and
/// again if the platform re-activates the application with no open window.
pub type SurfaceFactory = Box<dyn FnMut() -> Box<dyn WindowSurface> + Send>;

/// Whether closing the last window quits the application on this platform.
/// macOS keeps applications resident; everywhere else close means quit.
pub fn quit_on_last_window_close_default() -> bool {
    !cfg!(target_os = "macos")
}

/// Orchestrates the application lifecycle.
///
/// Owns the backend handle and the window controller outright - absence of
/// either is an `Option`, not a nullable global. All state transitions happen
/// on the single event-loop task consuming [`ShellEvent`]s; nothing here is
/// called concurrently.
pub struct Supervisor {
    phase: Phase,
    plan: LaunchPlan,
    backend: Option<BackendHandle>,
    window: WindowController,
    surface_factory: SurfaceFactory,
    inbox_tx: UnboundedSender<ShellEvent>,
    quit_on_last_window_close: bool,
}

impl Supervisor {
    pub fn new(
        plan: LaunchPlan,
        surface_factory: SurfaceFactory,
        inbox_tx: UnboundedSender<ShellEvent>,
        quit_on_last_window_close: bool,
    ) -> Self {
        Self {
            phase: Phase::Starting,
            plan,
            backend: None,
            window: WindowController::new(),
            surface_factory,
            inbox_tx,
            quit_on_last_window_close,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn window(&self) -> &WindowController {
        &self.window
    }

    pub fn backend_pid(&self) -> Option<u32> {
        self.backend.as_ref().and_then(|b| b.pid())
    }

    /// Launch the backend, open the window, enter `Running`.
    ///
    /// The backend launch is fire-and-forget and the window does not wait for
    /// backend readiness; if the spawn fails the window still opens and the
    /// UI's connectivity probe surfaces the degraded state. Must be called
    /// from within a tokio runtime.
    pub fn start(&mut self) {
        info!(
            event = "core.supervisor.start_begun",
            command = %self.plan.display(),
        );

        let (backend_tx, backend_rx) = mpsc::unbounded_channel();
        match BackendHandle::spawn(&self.plan, backend_tx) {
            Ok(handle) => self.backend = Some(handle),
            Err(e) => {
                error!(
                    event = "core.supervisor.backend_spawn_failed",
                    error = %e,
                    error_code = e.error_code(),
                    "Continuing without backend - probe will report degraded status"
                );
            }
        }
        forward_backend_events(backend_rx, self.inbox_tx.clone());

        self.open_window();
        self.phase = Phase::Running;

        info!(
            event = "core.supervisor.running",
            backend_pid = ?self.backend_pid(),
        );
    }

    /// Process one inbox event to completion.
    pub fn handle_event(&mut self, event: ShellEvent) {
        if self.phase == Phase::Stopped {
            debug!(event = "core.supervisor.event_after_stop", shell_event = ?event);
            return;
        }

        match event {
            ShellEvent::Command(cmd) => {
                if let Err(e) = self.dispatch(cmd) {
                    debug!(
                        event = "core.supervisor.command_rejected",
                        command = cmd.name(),
                        error = %e,
                    );
                }
            }
            ShellEvent::Backend(backend_event) => self.handle_backend_event(backend_event),
            ShellEvent::WindowClosed => {
                self.window.mark_closed();
                if self.quit_on_last_window_close {
                    self.begin_shutdown();
                }
            }
            ShellEvent::Activated => {
                if self.phase == Phase::Running && !self.window.is_open() {
                    info!(event = "core.supervisor.reactivated");
                    self.open_window();
                }
            }
            ShellEvent::QuitRequested => self.begin_shutdown(),
        }
    }

    /// Enter `ShuttingDown`: terminate the backend exactly once and close the
    /// window. Idempotent - concurrent triggers (last-window-closed and an
    /// explicit quit both firing) result in a single termination request.
    pub fn begin_shutdown(&mut self) {
        if matches!(self.phase, Phase::ShuttingDown | Phase::Stopped) {
            debug!(event = "core.supervisor.shutdown_already_started");
            return;
        }
        self.phase = Phase::ShuttingDown;
        info!(event = "core.supervisor.shutdown_started");

        if let Some(backend) = &self.backend {
            // Termination is requested, not confirmed: the Exited event may
            // arrive after the host has begun exiting, or never.
            backend.kill();
        }
        if self.window.is_open() {
            self.window.close();
        }
    }

    /// Enter the terminal `Stopped` phase.
    pub fn finish(&mut self) {
        if self.phase == Phase::Stopped {
            return;
        }
        if self.phase != Phase::ShuttingDown {
            self.begin_shutdown();
        }
        self.phase = Phase::Stopped;
        info!(event = "core.supervisor.stopped");
    }

    fn open_window(&mut self) {
        if self.window.is_open() {
            return;
        }
        let surface = (self.surface_factory)();
        if let Err(e) = self.window.attach(surface) {
            warn!(event = "core.supervisor.window_attach_failed", error = %e);
        }
    }

    fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::Stdout(line) => {
                info!(event = "core.supervisor.backend_stdout", line = %line);
            }
            BackendEvent::Stderr(line) => {
                warn!(event = "core.supervisor.backend_stderr", line = %line);
            }
            BackendEvent::Exited(code) => {
                // No auto-restart: a dead backend stays dead until the
                // operator restarts the whole application.
                if code == Some(0) {
                    info!(event = "core.supervisor.backend_exited", code = 0);
                } else {
                    error!(
                        event = "core.supervisor.backend_exited",
                        code = ?code,
                        "Backend exited unexpectedly"
                    );
                }
                self.backend = None;
            }
        }
    }
}

impl Store for Supervisor {
    type Error = DispatchError;

    /// Apply one bridge command.
    ///
    /// Commands that find no window are dropped silently (`Ok(vec![])`) -
    /// a race between window teardown and a queued command is expected.
    fn dispatch(&mut self, cmd: Command) -> Result<Vec<Event>, DispatchError> {
        if self.phase == Phase::Stopped {
            return Err(DispatchError::Stopped);
        }

        debug!(
            event = "core.supervisor.dispatch_started",
            command = cmd.name()
        );

        let events = match cmd {
            Command::ToggleAlwaysOnTop { flag } => {
                if self.window.set_always_on_top(flag) {
                    vec![Event::AlwaysOnTopSet { flag }]
                } else {
                    vec![]
                }
            }
            Command::MinimizeWindow => {
                if self.window.minimize() {
                    vec![Event::WindowMinimized]
                } else {
                    vec![]
                }
            }
            Command::CloseWindow => {
                if self.window.close() {
                    if self.quit_on_last_window_close {
                        self.begin_shutdown();
                    }
                    vec![Event::WindowClosed]
                } else {
                    vec![]
                }
            }
        };

        if events.is_empty() {
            debug!(
                event = "core.supervisor.dispatch_dropped",
                command = cmd.name()
            );
        } else {
            info!(
                event = "core.supervisor.dispatch_completed",
                command = cmd.name(),
                event_count = events.len()
            );
        }

        Ok(events)
    }
}

/// Bridge the backend's private event channel into the supervisor inbox,
/// preserving per-source ordering.
fn forward_backend_events(
    mut backend_rx: UnboundedReceiver<BackendEvent>,
    inbox_tx: UnboundedSender<ShellEvent>,
) {
    tokio::spawn(async move {
        while let Some(event) = backend_rx.recv().await {
            if inbox_tx.send(ShellEvent::Backend(event)).is_err() {
                break;
            }
        }
    });
}

/// Drive a supervisor until it stops: start, then consume the inbox.
///
/// Returns once the supervisor reaches `ShuttingDown` (which it then
/// finishes) or every inbox sender is gone. Shutdown never waits on the
/// backend's exit confirmation.
pub async fn run(mut supervisor: Supervisor, mut inbox: UnboundedReceiver<ShellEvent>) {
    supervisor.start();

    while matches!(supervisor.phase(), Phase::Starting | Phase::Running) {
        match inbox.recv().await {
            Some(event) => supervisor.handle_event(event),
            None => break,
        }
    }

    supervisor.finish();
}
