use std::time::Duration;

use tracing::{info, warn};
use ureq::Agent;

use crate::ingest::types::{DeliveryOutcome, PageCapture};

/// Post one capture to the ingestion endpoint, fire-and-forget.
///
/// The sender consumes nothing from the response beyond the status code,
/// which is logged. A network failure is logged and the capture is lost -
/// this is best-effort telemetry, not a durable pipeline, so there is no
/// retry and the outcome never escalates past the caller.
pub fn deliver(endpoint: &str, capture: &PageCapture, timeout: Duration) -> DeliveryOutcome {
    let agent: Agent = Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into();

    match agent.post(endpoint).send_json(capture) {
        Ok(response) => {
            let status = response.status().as_u16();
            info!(
                event = "core.ingest.delivered",
                endpoint = endpoint,
                url = %capture.url,
                status = status,
            );
            DeliveryOutcome::Delivered { status }
        }
        Err(e) => {
            warn!(
                event = "core.ingest.delivery_failed",
                endpoint = endpoint,
                url = %capture.url,
                error = %e,
            );
            DeliveryOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}
