use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::backend::errors::BackendError;
use crate::backend::types::{BackendEvent, LaunchPlan};

/// Handle to the single supervised backend process.
///
/// Spawning is fire-and-forget: the call returns as soon as the OS process
/// exists, with no readiness handshake. Output and exit are delivered as
/// [`BackendEvent`]s on the channel given to [`BackendHandle::spawn`], in
/// emission order per stream. `Exited` is sent exactly once for any terminal
/// outcome; it is the only confirmation of termination, and it may never be
/// observed if the host is already exiting - callers must not wait on it.
///
/// The handle is not recreated after exit: on backend failure the operator
/// restarts the whole application.
#[derive(Debug)]
pub struct BackendHandle {
    pid: Option<u32>,
    kill_token: CancellationToken,
    exited: Arc<AtomicBool>,
}

#[derive(Debug, Clone, Copy)]
enum StreamKind {
    Stdout,
    Stderr,
}

impl BackendHandle {
    /// Launch the backend process described by `plan`.
    ///
    /// Standard output and error are piped and forwarded line-by-line to
    /// `event_tx`; stdin is closed. Must be called from within a tokio
    /// runtime (reader and monitor tasks are spawned onto it).
    pub fn spawn(
        plan: &LaunchPlan,
        event_tx: UnboundedSender<BackendEvent>,
    ) -> Result<Self, BackendError> {
        let executable = resolve_executable(&plan.executable)?;

        info!(
            event = "core.backend.spawn_started",
            command = %plan.display(),
            resolved = %executable.display(),
        );

        let mut child = Command::new(&executable)
            .args(&plan.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Backstop for abrupt host teardown: if the monitor task is
            // dropped with the child still alive, the runtime kills it
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| BackendError::SpawnFailed {
                command: plan.display(),
                source,
            })?;

        let pid = child.id();

        if let Some(stdout) = child.stdout.take() {
            spawn_line_reader(stdout, event_tx.clone(), StreamKind::Stdout);
        }
        if let Some(stderr) = child.stderr.take() {
            spawn_line_reader(stderr, event_tx.clone(), StreamKind::Stderr);
        }

        let kill_token = CancellationToken::new();
        let exited = Arc::new(AtomicBool::new(false));
        spawn_monitor(child, pid, kill_token.clone(), exited.clone(), event_tx);

        info!(event = "core.backend.spawn_completed", pid = ?pid);

        Ok(Self {
            pid,
            kill_token,
            exited,
        })
    }

    /// PID of the backend process, present only while it is alive.
    pub fn pid(&self) -> Option<u32> {
        if self.is_alive() { self.pid } else { None }
    }

    /// Whether the process has not yet been observed to exit.
    pub fn is_alive(&self) -> bool {
        !self.exited.load(Ordering::SeqCst)
    }

    /// Request termination of the backend process.
    ///
    /// Idempotent and safe on an already-dead handle. There is no completion
    /// acknowledgement: termination is requested, not confirmed - the
    /// `Exited` event is the only confirmation signal.
    pub fn kill(&self) {
        if self.exited.load(Ordering::SeqCst) {
            debug!(
                event = "core.backend.kill_after_exit",
                pid = ?self.pid,
                "Handle already dead - kill is a no-op"
            );
            return;
        }
        if self.kill_token.is_cancelled() {
            debug!(event = "core.backend.kill_repeated", pid = ?self.pid);
            return;
        }
        info!(event = "core.backend.kill_requested", pid = ?self.pid);
        self.kill_token.cancel();
    }
}

/// Resolve a bare executable name via PATH; explicit paths are taken as-is
/// (spawn surfaces errors for those).
fn resolve_executable(executable: &str) -> Result<PathBuf, BackendError> {
    let path = Path::new(executable);
    if path.components().count() > 1 {
        return Ok(path.to_path_buf());
    }
    which::which(executable).map_err(|_| BackendError::ExecutableNotFound {
        executable: executable.to_string(),
    })
}

/// Forward lines from one backend stream to the event channel until EOF or
/// read error. Lines are opaque diagnostics; no parsing happens here.
fn spawn_line_reader<R>(reader: R, tx: UnboundedSender<BackendEvent>, kind: StreamKind)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let event = match kind {
                        StreamKind::Stdout => BackendEvent::Stdout(line),
                        StreamKind::Stderr => BackendEvent::Stderr(line),
                    };
                    if tx.send(event).is_err() {
                        debug!(
                            event = "core.backend.stream_receiver_gone",
                            stream = ?kind,
                        );
                        break;
                    }
                }
                Ok(None) => {
                    debug!(event = "core.backend.stream_eof", stream = ?kind);
                    break;
                }
                Err(e) => {
                    warn!(
                        event = "core.backend.stream_read_error",
                        stream = ?kind,
                        error = %e,
                    );
                    break;
                }
            }
        }
    });
}

/// Own the child until it terminates. Sends `Exited` exactly once, whether
/// the process ended on its own or a kill was requested through the token.
fn spawn_monitor(
    mut child: Child,
    pid: Option<u32>,
    token: CancellationToken,
    exited: Arc<AtomicBool>,
    tx: UnboundedSender<BackendEvent>,
) {
    tokio::spawn(async move {
        let status = tokio::select! {
            status = child.wait() => status,
            _ = token.cancelled() => {
                if let Err(e) = child.start_kill() {
                    // Process already reaped between the signal and here
                    debug!(
                        event = "core.backend.kill_signal_failed",
                        pid = ?pid,
                        error = %e,
                    );
                }
                child.wait().await
            }
        };

        exited.store(true, Ordering::SeqCst);

        let code = match status {
            Ok(status) => status.code(),
            Err(e) => {
                warn!(event = "core.backend.wait_failed", pid = ?pid, error = %e);
                None
            }
        };

        debug!(event = "core.backend.exit_observed", pid = ?pid, code = ?code);

        // Send failure here means the supervisor inbox is gone, which only
        // happens when the host itself is exiting. Shutdown never waits for
        // this event, so dropping it is fine.
        if tx.send(BackendEvent::Exited(code)).is_err() {
            debug!(event = "core.backend.exit_receiver_gone", pid = ?pid);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    async fn next_event(rx: &mut mpsc::UnboundedReceiver<BackendEvent>) -> BackendEvent {
        timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for backend event")
            .expect("event channel closed")
    }

    fn shell_plan(script: &str) -> LaunchPlan {
        LaunchPlan::new("sh", vec!["-c".to_string(), script.to_string()])
    }

    #[tokio::test]
    async fn test_spawn_missing_executable_fails() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let plan = LaunchPlan::new("roost-test-missing-binary-xyz", vec![]);
        let result = BackendHandle::spawn(&plan, tx);
        assert!(matches!(
            result,
            Err(BackendError::ExecutableNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_spawn_bad_path_fails() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let plan = LaunchPlan::new("/nonexistent/dir/backend-daemon", vec![]);
        let result = BackendHandle::spawn(&plan, tx);
        assert!(matches!(result, Err(BackendError::SpawnFailed { .. })));
    }

    #[tokio::test]
    async fn test_normal_exit_delivers_stdout_then_exit() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = BackendHandle::spawn(&shell_plan("echo hello"), tx).unwrap();
        assert!(handle.pid().is_some());

        assert_eq!(
            next_event(&mut rx).await,
            BackendEvent::Stdout("hello".to_string())
        );
        assert_eq!(next_event(&mut rx).await, BackendEvent::Exited(Some(0)));
        assert!(!handle.is_alive());
        assert!(handle.pid().is_none());
    }

    #[tokio::test]
    async fn test_nonzero_exit_delivers_stderr_and_code() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _handle = BackendHandle::spawn(&shell_plan("echo oops >&2; exit 3"), tx).unwrap();

        assert_eq!(
            next_event(&mut rx).await,
            BackendEvent::Stderr("oops".to_string())
        );
        assert_eq!(next_event(&mut rx).await, BackendEvent::Exited(Some(3)));
    }

    #[tokio::test]
    async fn test_stdout_lines_arrive_in_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _handle =
            BackendHandle::spawn(&shell_plan("printf 'one\\ntwo\\nthree\\n'"), tx).unwrap();

        assert_eq!(
            next_event(&mut rx).await,
            BackendEvent::Stdout("one".to_string())
        );
        assert_eq!(
            next_event(&mut rx).await,
            BackendEvent::Stdout("two".to_string())
        );
        assert_eq!(
            next_event(&mut rx).await,
            BackendEvent::Stdout("three".to_string())
        );
        assert_eq!(next_event(&mut rx).await, BackendEvent::Exited(Some(0)));
    }

    #[tokio::test]
    async fn test_kill_is_idempotent_and_exit_fires_once() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = BackendHandle::spawn(&shell_plan("sleep 30"), tx).unwrap();

        handle.kill();
        handle.kill();
        handle.kill();

        // Killed by signal: no exit code on unix
        assert_eq!(next_event(&mut rx).await, BackendEvent::Exited(None));
        assert!(!handle.is_alive());

        // Safe on a dead handle, and no second Exited arrives
        handle.kill();
        let extra = timeout(Duration::from_millis(200), rx.recv()).await;
        assert!(extra.is_err(), "no further events expected after Exited");
    }

    #[tokio::test]
    async fn test_pid_absent_after_exit() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = BackendHandle::spawn(&shell_plan("true"), tx).unwrap();

        assert_eq!(next_event(&mut rx).await, BackendEvent::Exited(Some(0)));
        assert!(handle.pid().is_none());
    }
}
