use serde::{Deserialize, Serialize};

/// How to launch the backend: an executable name (resolved via PATH) or path,
/// plus its arguments. The shell always passes exactly one argument (the
/// entry path); the plan keeps a full argument vector so tests can spawn
/// arbitrary throwaway processes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchPlan {
    pub executable: String,
    pub args: Vec<String>,
}

impl LaunchPlan {
    pub fn new(executable: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            executable: executable.into(),
            args,
        }
    }

    /// The command line for log output.
    pub fn display(&self) -> String {
        let mut parts = vec![self.executable.clone()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Messages emitted by a running backend process, delivered in emission order
/// per stream through the handle's event channel.
///
/// Output lines are opaque diagnostic text: the host logs them and never
/// parses them. `Exited` arrives exactly once per spawn, for any terminal
/// outcome; the code is `None` when the process was killed by a signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendEvent {
    Stdout(String),
    Stderr(String),
    Exited(Option<i32>),
}
