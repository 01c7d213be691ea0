//! Message input panel

use eframe::egui;

use crate::app::ChatApp;
use crate::input_state::SendIntent;

impl ChatApp {
    /// Render the input panel at the bottom of the window.
    pub(in crate::app) fn render_input_panel(&mut self, ctx: &egui::Context) {
        let theme = self.theme();
        let can_send = self.widget.can_send();

        egui::TopBottomPanel::bottom("input_panel")
            .frame(
                egui::Frame::new()
                    .fill(theme.surface[1])
                    .inner_margin(egui::Margin::symmetric(12, 10))
                    .stroke(egui::Stroke::new(1.0, theme.border_medium)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let mut intent = None;

                    let button_width = 70.0;
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.widget.input.message_input)
                            .desired_width(ui.available_width() - button_width)
                            .hint_text("Ask a question..."),
                    );

                    // Singleline edits drop focus on Enter
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        intent = Some(SendIntent::Enter);
                        response.request_focus();
                    }

                    let send = ui.add_enabled(
                        can_send,
                        egui::Button::new("Send").fill(theme.accent),
                    );
                    if send.clicked() {
                        intent = Some(SendIntent::Click);
                    }

                    if let Some(intent) = intent {
                        self.widget.on_send_intent(intent);
                    }

                    if std::mem::take(&mut self.widget.input.refocus) {
                        response.request_focus();
                    }
                });
            });
    }
}
