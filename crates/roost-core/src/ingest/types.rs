use serde::{Deserialize, Serialize};

/// URL schemes the relay must never capture from.
const PRIVILEGED_SCHEMES: [&str; 6] = [
    "chrome://",
    "chrome-extension://",
    "edge://",
    "about:",
    "devtools://",
    "view-source:",
];

/// One captured page, as posted to the backend's ingestion route.
///
/// `content` is the page's visible text, unbounded. Events carry no ordering
/// or deduplication guarantees - the backend takes them as they come.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCapture {
    pub url: String,
    pub title: String,
    pub content: String,
}

impl PageCapture {
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Whether a page at this URL may be captured at all.
///
/// Internal and privileged browser surfaces are off limits; everything else
/// is fair game.
pub fn is_capturable_url(url: &str) -> bool {
    !url.is_empty()
        && !PRIVILEGED_SCHEMES
            .iter()
            .any(|scheme| url.starts_with(scheme))
}

/// What became of one delivery attempt. There is exactly one attempt per
/// capture: no retry, no queue, no backpressure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The endpoint answered; any status counts as delivered and is logged.
    Delivered { status: u16 },
    /// The request never completed. The capture is lost, by design.
    Failed { reason: String },
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered { .. })
    }
}
