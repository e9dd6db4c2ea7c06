use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};
use ureq::Agent;

use crate::probe::types::ProbeStatus;

/// Shape of the backend's liveness reply.
#[derive(Debug, Deserialize)]
struct ProbeReply {
    message: String,
}

/// Ask the backend whether it is up.
///
/// Blocking, bounded by `timeout`, and infallible by construction: network
/// errors, bad statuses, and malformed replies all come back as
/// [`ProbeStatus::Degraded`]. Callers run this off the UI thread and render
/// whatever comes back.
pub fn probe(url: &str, timeout: Duration) -> ProbeStatus {
    let agent: Agent = Agent::config_builder()
        .timeout_global(Some(timeout))
        .build()
        .into();

    match agent.get(url).call() {
        Ok(mut response) => match response.body_mut().read_json::<ProbeReply>() {
            Ok(reply) => {
                info!(event = "core.probe.connected", url = url);
                ProbeStatus::Connected {
                    message: reply.message,
                }
            }
            Err(e) => {
                warn!(event = "core.probe.bad_reply", url = url, error = %e);
                ProbeStatus::Degraded {
                    reason: format!("unexpected probe reply: {e}"),
                }
            }
        },
        Err(e) => {
            warn!(event = "core.probe.unreachable", url = url, error = %e);
            ProbeStatus::Degraded {
                reason: e.to_string(),
            }
        }
    }
}
