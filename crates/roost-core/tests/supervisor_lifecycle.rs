//! End-to-end supervisor tests with real throwaway child processes and a
//! recording window surface.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time::timeout;

use roost_core::backend::{BackendEvent, LaunchPlan};
use roost_core::bridge::{Command, Event, Store};
use roost_core::supervisor::{DispatchError, Phase, ShellEvent, Supervisor};
use roost_core::window::WindowSurface;

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
    created: Arc<Mutex<usize>>,
}

impl RecordingSurface {
    fn ops(&self) -> Vec<SurfaceOp> {
        self.ops.lock().unwrap().clone()
    }

    fn surfaces_created(&self) -> usize {
        *self.created.lock().unwrap()
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

fn sleeping_plan() -> LaunchPlan {
    LaunchPlan::new("sleep", vec!["30".to_string()])
}

fn missing_plan() -> LaunchPlan {
    LaunchPlan::new("roost-test-missing-binary-xyz", vec![])
}

/// Build a supervisor whose surface factory hands out clones of one
/// recording surface, so tests can watch every window operation.
fn test_supervisor(
    plan: LaunchPlan,
    quit_on_close: bool,
) -> (
    Supervisor,
    RecordingSurface,
    UnboundedReceiver<ShellEvent>,
) {
    let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
    let surface = RecordingSurface::default();
    let factory_surface = surface.clone();
    let supervisor = Supervisor::new(
        plan,
        Box::new(move || {
            *factory_surface.created.lock().unwrap() += 1;
            Box::new(factory_surface.clone())
        }),
        inbox_tx,
        quit_on_close,
    );
    (supervisor, surface, inbox_rx)
}

async fn next_backend_event(inbox: &mut UnboundedReceiver<ShellEvent>) -> BackendEvent {
    loop {
        let event = timeout(Duration::from_secs(5), inbox.recv())
            .await
            .expect("timed out waiting for inbox event")
            .expect("inbox closed");
        if let ShellEvent::Backend(backend_event) = event {
            return backend_event;
        }
    }
}

#[tokio::test]
async fn test_startup_reaches_running_with_backend_and_window() {
    let (mut supervisor, surface, _inbox) = test_supervisor(sleeping_plan(), true);
    assert_eq!(supervisor.phase(), Phase::Starting);

    supervisor.start();

    assert_eq!(supervisor.phase(), Phase::Running);
    assert!(supervisor.backend_pid().is_some());
    assert!(supervisor.window().is_open());
    assert_eq!(surface.ops(), vec![SurfaceOp::Show]);

    supervisor.begin_shutdown();
}

#[tokio::test]
async fn test_spawn_failure_still_opens_window() {
    let (mut supervisor, surface, _inbox) = test_supervisor(missing_plan(), true);

    supervisor.start();

    // The host continues degraded: no backend, but a live window
    assert_eq!(supervisor.phase(), Phase::Running);
    assert!(supervisor.backend_pid().is_none());
    assert!(supervisor.window().is_open());
    assert_eq!(surface.ops(), vec![SurfaceOp::Show]);
}

#[tokio::test]
async fn test_toggle_always_on_top_applies_in_order() {
    let (mut supervisor, surface, _inbox) = test_supervisor(missing_plan(), true);
    supervisor.start();

    let events = supervisor
        .dispatch(Command::ToggleAlwaysOnTop { flag: true })
        .unwrap();
    assert_eq!(events, vec![Event::AlwaysOnTopSet { flag: true }]);
    assert!(supervisor.window().state().always_on_top);

    let events = supervisor
        .dispatch(Command::ToggleAlwaysOnTop { flag: false })
        .unwrap();
    assert_eq!(events, vec![Event::AlwaysOnTopSet { flag: false }]);
    assert!(!supervisor.window().state().always_on_top);

    assert_eq!(
        surface.ops(),
        vec![
            SurfaceOp::Show,
            SurfaceOp::AlwaysOnTop(true),
            SurfaceOp::AlwaysOnTop(false),
        ]
    );
}

#[tokio::test]
async fn test_close_window_twice_second_is_noop() {
    let (mut supervisor, surface, _inbox) = test_supervisor(sleeping_plan(), true);
    supervisor.start();

    let events = supervisor.dispatch(Command::CloseWindow).unwrap();
    assert_eq!(events, vec![Event::WindowClosed]);
    assert_eq!(supervisor.phase(), Phase::ShuttingDown);

    let events = supervisor.dispatch(Command::CloseWindow).unwrap();
    assert!(events.is_empty(), "second close must be a silent no-op");
    assert_eq!(supervisor.phase(), Phase::ShuttingDown);

    assert_eq!(surface.ops(), vec![SurfaceOp::Show, SurfaceOp::Close]);
}

#[tokio::test]
async fn test_commands_after_window_closed_are_noops() {
    let (mut supervisor, _surface, _inbox) = test_supervisor(missing_plan(), false);
    supervisor.start();

    supervisor.handle_event(ShellEvent::WindowClosed);
    assert!(!supervisor.window().is_open());

    // Arbitrary command sequences after closure must not fault
    for cmd in [
        Command::ToggleAlwaysOnTop { flag: true },
        Command::MinimizeWindow,
        Command::CloseWindow,
        Command::ToggleAlwaysOnTop { flag: false },
        Command::MinimizeWindow,
    ] {
        let events = supervisor.dispatch(cmd).unwrap();
        assert!(events.is_empty(), "{:?} should drop silently", cmd);
    }
}

#[tokio::test]
async fn test_concurrent_shutdown_triggers_kill_backend_once() {
    let (mut supervisor, _surface, mut inbox) = test_supervisor(sleeping_plan(), true);
    supervisor.start();

    // Last-window-closed and explicit quit both fire
    supervisor.handle_event(ShellEvent::WindowClosed);
    supervisor.handle_event(ShellEvent::QuitRequested);
    supervisor.begin_shutdown();

    assert_eq!(supervisor.phase(), Phase::ShuttingDown);

    // Exactly one termination: one Exited arrives, then silence
    assert_eq!(next_backend_event(&mut inbox).await, BackendEvent::Exited(None));
    let extra = timeout(Duration::from_millis(300), inbox.recv()).await;
    assert!(extra.is_err(), "no further backend events expected");
}

#[tokio::test]
async fn test_backend_exit_is_observed_and_not_restarted() {
    let plan = LaunchPlan::new("sh", vec!["-c".to_string(), "exit 7".to_string()]);
    let (mut supervisor, _surface, mut inbox) = test_supervisor(plan, true);
    supervisor.start();

    assert_eq!(
        next_backend_event(&mut inbox).await,
        BackendEvent::Exited(Some(7))
    );

    supervisor.handle_event(ShellEvent::Backend(BackendEvent::Exited(Some(7))));

    // Crash is logged, never recovered: still Running, no new process
    assert_eq!(supervisor.phase(), Phase::Running);
    assert!(supervisor.backend_pid().is_none());
}

#[tokio::test]
async fn test_backend_output_forwarded_in_order() {
    let plan = LaunchPlan::new(
        "sh",
        vec!["-c".to_string(), "echo first; echo second".to_string()],
    );
    let (mut supervisor, _surface, mut inbox) = test_supervisor(plan, true);
    supervisor.start();

    assert_eq!(
        next_backend_event(&mut inbox).await,
        BackendEvent::Stdout("first".to_string())
    );
    assert_eq!(
        next_backend_event(&mut inbox).await,
        BackendEvent::Stdout("second".to_string())
    );
    assert_eq!(
        next_backend_event(&mut inbox).await,
        BackendEvent::Exited(Some(0))
    );
}

#[tokio::test]
async fn test_resident_platform_keeps_running_and_reopens_on_activate() {
    let (mut supervisor, surface, _inbox) = test_supervisor(missing_plan(), false);
    supervisor.start();
    assert_eq!(surface.surfaces_created(), 1);

    supervisor.handle_event(ShellEvent::WindowClosed);
    assert_eq!(supervisor.phase(), Phase::Running);
    assert!(!supervisor.window().is_open());

    supervisor.handle_event(ShellEvent::Activated);
    assert!(supervisor.window().is_open());
    assert_eq!(surface.surfaces_created(), 2);

    // Activate with a window already open must not create another
    supervisor.handle_event(ShellEvent::Activated);
    assert_eq!(surface.surfaces_created(), 2);
}

#[tokio::test]
async fn test_no_reopen_once_shutdown_began() {
    let (mut supervisor, surface, _inbox) = test_supervisor(missing_plan(), true);
    supervisor.start();

    supervisor.handle_event(ShellEvent::QuitRequested);
    assert_eq!(supervisor.phase(), Phase::ShuttingDown);

    supervisor.handle_event(ShellEvent::Activated);
    assert!(!supervisor.window().is_open());
    assert_eq!(surface.surfaces_created(), 1);
}

#[tokio::test]
async fn test_stopped_rejects_dispatch() {
    let (mut supervisor, _surface, _inbox) = test_supervisor(missing_plan(), true);
    supervisor.start();
    supervisor.begin_shutdown();
    supervisor.finish();
    assert_eq!(supervisor.phase(), Phase::Stopped);

    let result = supervisor.dispatch(Command::MinimizeWindow);
    assert!(matches!(result, Err(DispatchError::Stopped)));

    // Events after stop are swallowed without effect
    supervisor.handle_event(ShellEvent::Activated);
    assert!(!supervisor.window().is_open());
}

#[tokio::test]
async fn test_run_loop_drives_full_lifecycle() {
    let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
    let surface = RecordingSurface::default();
    let factory_surface = surface.clone();
    let supervisor = Supervisor::new(
        sleeping_plan(),
        Box::new(move || {
            *factory_surface.created.lock().unwrap() += 1;
            Box::new(factory_surface.clone())
        }),
        inbox_tx.clone(),
        true,
    );

    let loop_task = tokio::spawn(roost_core::supervisor::run(supervisor, inbox_rx));

    inbox_tx
        .send(ShellEvent::Command(Command::ToggleAlwaysOnTop { flag: true }))
        .unwrap();
    inbox_tx
        .send(ShellEvent::Command(Command::CloseWindow))
        .unwrap();

    timeout(Duration::from_secs(5), loop_task)
        .await
        .expect("run loop should stop after close-window")
        .unwrap();

    assert_eq!(
        surface.ops(),
        vec![
            SurfaceOp::Show,
            SurfaceOp::AlwaysOnTop(true),
            SurfaceOp::Close,
        ]
    );
}
