//! roost-shell: the Roost host binary.
//!
//! Owns the single frameless window and the background runtime on which the
//! supervisor launches and tears down the backend process. The UI talks to
//! the supervisor exclusively through bridge commands; the supervisor talks
//! to the window exclusively through the surface seam.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use eframe::egui;
use tokio::sync::{mpsc, oneshot};
use tracing::error;

use roost_core::config::{RoostConfig, RunMode};
use roost_core::errors::ConfigError;
use roost_core::events;
use roost_core::supervisor::{self, ShellEvent, Supervisor, quit_on_last_window_close_default};

mod app;
mod surface;

use app::ShellApp;
use surface::EguiSurface;

#[derive(Parser, Debug)]
#[command(name = "roost-shell", about = "Roost assistant shell", version)]
struct Args {
    /// Explicit config file path (defaults to the nearest .roost/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only log errors
    #[arg(long)]
    quiet: bool,
}

fn main() {
    let args = Args::parse();
    roost_core::init_logging(args.quiet);

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            events::log_app_error(&e);
            std::process::exit(1);
        }
    };
    let mode = RunMode::from_env();
    events::log_app_startup();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to build tokio runtime");

    let (inbox_tx, inbox_rx) = mpsc::unbounded_channel::<ShellEvent>();
    let (surface_tx, surface_rx) = oneshot::channel::<EguiSurface>();

    // The supervisor starts once the UI thread hands over a window context;
    // from then on it owns backend and window lifecycles.
    let plan = config.backend.launch_plan(mode);
    let supervisor_inbox_tx = inbox_tx.clone();
    let worker = runtime.spawn(async move {
        let Ok(surface) = surface_rx.await else {
            return;
        };
        let supervisor = Supervisor::new(
            plan,
            Box::new(move || Box::new(surface.clone())),
            supervisor_inbox_tx,
            quit_on_last_window_close_default(),
        );
        supervisor::run(supervisor, inbox_rx).await;
    });

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_decorations(false)
            .with_resizable(false),
        ..Default::default()
    };

    let ui_inbox_tx = inbox_tx.clone();
    let ui_config = config.clone();
    let result = eframe::run_native(
        "Roost",
        native_options,
        Box::new(move |cc| {
            let _ = surface_tx.send(EguiSurface::new(cc.egui_ctx.clone()));
            Box::new(ShellApp::new(&ui_config, ui_inbox_tx))
        }),
    );
    if let Err(e) = result {
        error!(event = "shell.ui.run_failed", error = %e);
    }

    // The UI loop has ended. Signal quit for exit paths that never went
    // through the bridge, then give the supervisor a moment to kill the
    // backend - without ever waiting on its exit confirmation.
    events::log_app_shutdown();
    let _ = inbox_tx.send(ShellEvent::QuitRequested);
    drop(inbox_tx);
    runtime.block_on(async {
        let _ = tokio::time::timeout(Duration::from_secs(5), worker).await;
    });
}

fn load_config(path: Option<&Path>) -> Result<RoostConfig, ConfigError> {
    match path {
        Some(path) => RoostConfig::load_file(path),
        None => RoostConfig::load(),
    }
}
