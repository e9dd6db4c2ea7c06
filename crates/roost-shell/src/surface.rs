use eframe::egui;

use roost_core::window::WindowSurface;

/// [`WindowSurface`] implementation over an egui viewport.
///
/// Every operation enqueues a viewport command and wakes the UI loop; the
/// supervisor thread never touches the window directly. Cloning is cheap -
/// `egui::Context` is a shared handle.
#[derive(Clone)]
pub struct EguiSurface {
    ctx: egui::Context,
}

impl EguiSurface {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }

    fn send(&self, cmd: egui::ViewportCommand) {
        self.ctx.send_viewport_cmd(cmd);
        // The UI loop may be idle; wake it so the command is processed
        self.ctx.request_repaint();
    }
}

impl WindowSurface for EguiSurface {
    fn show(&self) {
        self.send(egui::ViewportCommand::Visible(true));
        self.send(egui::ViewportCommand::Focus);
    }

    fn set_always_on_top(&self, flag: bool) {
        let level = if flag {
            egui::viewport::WindowLevel::AlwaysOnTop
        } else {
            egui::viewport::WindowLevel::Normal
        };
        self.send(egui::ViewportCommand::WindowLevel(level));
    }

    fn minimize(&self) {
        self.send(egui::ViewportCommand::Minimized(true));
    }

    fn close(&self) {
        self.send(egui::ViewportCommand::Close);
    }
}
