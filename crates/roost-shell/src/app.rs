use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use eframe::egui;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use roost_core::bridge::Command;
use roost_core::config::RoostConfig;
use roost_core::probe::{ProbeStatus, probe};
use roost_core::supervisor::ShellEvent;

/// The untrusted UI surface.
///
/// Renders the frameless shell: a drag-region title bar with pin / minimize /
/// close controls, a connectivity status area, and a message log. All window
/// mutation goes through the bridge as commands into the supervisor inbox;
/// the UI only mirrors what it asked for.
pub struct ShellApp {
    events: UnboundedSender<ShellEvent>,
    probe_url: String,
    probe_timeout: Duration,
    pinned: bool,
    status: String,
    messages: Vec<ChatLine>,
    probe_rx: Option<Receiver<ProbeStatus>>,
    close_forwarded: bool,
}

struct ChatLine {
    role: Role,
    text: String,
}

#[derive(PartialEq, Eq)]
enum Role {
    Bot,
    System,
}

impl ShellApp {
    pub fn new(config: &RoostConfig, events: UnboundedSender<ShellEvent>) -> Self {
        Self {
            events,
            probe_url: config.probe_url(),
            probe_timeout: Duration::from_millis(config.probe.timeout_ms),
            pinned: false,
            status: "Idle".to_string(),
            messages: Vec::new(),
            probe_rx: None,
            close_forwarded: false,
        }
    }

    fn send_command(&self, cmd: Command) {
        // Fire-and-forget: no acknowledgement comes back, ever
        if self.events.send(ShellEvent::Command(cmd)).is_err() {
            debug!(event = "shell.ui.command_send_failed", command = cmd.name());
        }
    }

    /// Kick off a connectivity probe on a helper thread. One at a time.
    fn start_probe(&mut self, ctx: egui::Context) {
        if self.probe_rx.is_some() {
            return;
        }
        let (tx, rx) = std::sync::mpsc::channel();
        self.probe_rx = Some(rx);
        self.status = "Checking...".to_string();

        let url = self.probe_url.clone();
        let timeout = self.probe_timeout;
        std::thread::spawn(move || {
            let result = probe(&url, timeout);
            let _ = tx.send(result);
            ctx.request_repaint();
        });
    }

    fn drain_probe(&mut self) {
        let Some(rx) = &self.probe_rx else {
            return;
        };
        match rx.try_recv() {
            Ok(ProbeStatus::Connected { message }) => {
                self.status = "Connected".to_string();
                self.messages.push(ChatLine {
                    role: Role::Bot,
                    text: message,
                });
                self.probe_rx = None;
            }
            Ok(ProbeStatus::Degraded { reason }) => {
                // Degraded, not fatal: the backend may still be starting
                self.status = "Degraded".to_string();
                self.messages.push(ChatLine {
                    role: Role::System,
                    text: format!("Backend unavailable: {reason}"),
                });
                self.probe_rx = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.probe_rx = None;
            }
        }
    }

    fn title_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("title_bar")
            .exact_height(34.0)
            .show(ctx, |ui| {
                // Register the drag region first so the buttons drawn on top
                // of it keep their own interaction
                let response = ui.interact(
                    ui.max_rect(),
                    egui::Id::new("title_bar_drag"),
                    egui::Sense::drag(),
                );
                if response.drag_started() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::StartDrag);
                }

                ui.horizontal_centered(|ui| {
                    ui.label(egui::RichText::new("Roost").strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("❌").clicked() {
                            self.send_command(Command::CloseWindow);
                        }
                        if ui.button("🗕").clicked() {
                            self.send_command(Command::MinimizeWindow);
                        }
                        if ui.selectable_label(self.pinned, "📌").clicked() {
                            self.pinned = !self.pinned;
                            self.send_command(Command::ToggleAlwaysOnTop { flag: self.pinned });
                        }
                    });
                });
            });
    }

    fn content(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(&self.status).monospace());
            });
            ui.separator();

            let log_height = (ui.available_height() - 48.0).max(0.0);
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .max_height(log_height)
                .show(ui, |ui| {
                    if self.messages.is_empty() {
                        ui.vertical_centered(|ui| {
                            ui.add_space(24.0);
                            ui.weak("No messages yet.");
                        });
                    }
                    for line in &self.messages {
                        let text = egui::RichText::new(&line.text);
                        match line.role {
                            Role::Bot => ui.label(text),
                            Role::System => ui.label(text.color(egui::Color32::LIGHT_RED)),
                        };
                    }
                });

            ui.add_space(8.0);
            let button = egui::Button::new("Test Connection");
            if ui.add_sized([ui.available_width(), 32.0], button).clicked() {
                self.start_probe(ctx.clone());
            }
        });
    }
}

impl eframe::App for ShellApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Platform-initiated close (including our own Close command landing)
        // is forwarded once; the supervisor treats repeats as no-ops anyway
        if ctx.input(|i| i.viewport().close_requested()) && !self.close_forwarded {
            self.close_forwarded = true;
            if self.events.send(ShellEvent::WindowClosed).is_err() {
                debug!(event = "shell.ui.close_send_failed");
            }
        }

        self.drain_probe();
        self.title_bar(ctx);
        self.content(ctx);
    }
}
