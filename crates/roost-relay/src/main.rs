//! roost-relay: best-effort page-capture delivery.
//!
//! The browser-side collector hands this binary one captured page (URL,
//! title, and visible text); the relay makes exactly one delivery attempt
//! against the backend's ingestion route and logs the outcome. A failed
//! delivery is lost on purpose - this is telemetry capture, not a durable
//! pipeline - so delivery failure never changes the exit code.

use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use roost_core::config::RoostConfig;
use roost_core::events;
use roost_core::ingest::{self, PageCapture};

#[derive(Parser, Debug)]
#[command(name = "roost-relay", about = "Roost ingestion relay", version)]
struct Args {
    /// URL of the captured page
    #[arg(long)]
    url: String,

    /// Title of the captured page
    #[arg(long, default_value = "")]
    title: String,

    /// File holding the page's visible text; stdin when omitted
    #[arg(long)]
    content_file: Option<PathBuf>,

    /// Ingestion endpoint; defaults to the configured backend route
    #[arg(long)]
    endpoint: Option<String>,

    /// Only log errors
    #[arg(long)]
    quiet: bool,
}

fn main() {
    let args = Args::parse();
    roost_core::init_logging(args.quiet);

    if !ingest::is_capturable_url(&args.url) {
        info!(
            event = "relay.capture.skipped",
            url = %args.url,
            "Privileged or empty URL - nothing captured"
        );
        return;
    }

    let content = match read_content(args.content_file.as_ref()) {
        Ok(content) => content,
        Err(e) => {
            events::log_app_error(&e);
            std::process::exit(1);
        }
    };

    let config = match RoostConfig::load() {
        Ok(config) => config,
        Err(e) => {
            events::log_app_error(&e);
            std::process::exit(1);
        }
    };
    let endpoint = args.endpoint.unwrap_or_else(|| config.ingest_url());
    let timeout = Duration::from_millis(config.ingest.timeout_ms);

    let capture = PageCapture::new(args.url, args.title, content);
    // Outcome is logged by the client; delivery failure is not an error here
    let _ = ingest::deliver(&endpoint, &capture, timeout);
}

fn read_content(path: Option<&PathBuf>) -> Result<String, std::io::Error> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut content = String::new();
            std::io::stdin().read_to_string(&mut content)?;
            Ok(content)
        }
    }
}
