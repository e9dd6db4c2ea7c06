use serde::{Deserialize, Serialize};

/// Outcome of a backend connectivity probe.
///
/// The probe never fails hard: anything short of a well-formed reply is a
/// degraded status for the UI to display, not an error to handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbeStatus {
    /// The backend answered; `message` is its greeting.
    Connected { message: String },
    /// The backend is unreachable or answered garbage.
    Degraded { reason: String },
}

impl ProbeStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, ProbeStatus::Connected { .. })
    }
}
