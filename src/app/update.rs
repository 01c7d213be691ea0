//! Main update loop

use eframe::egui;
use std::time::Duration;

use super::ChatApp;

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Settle replies that arrived since the last frame
        self.widget.process_events();

        // Keep polling for events and animating the typing dots
        ctx.request_repaint_after(Duration::from_millis(100));

        self.render_header(ctx);

        // Bottom panel must be laid out before the central panel
        self.render_input_panel(ctx);
        self.render_central_panel(ctx);
    }
}
