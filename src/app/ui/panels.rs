//! Header and central panel rendering

use eframe::egui;

use crate::app::ChatApp;
use crate::config::ThemeChoice;
use crate::ui;

impl ChatApp {
    /// Title bar with the theme toggle and transcript export.
    pub(in crate::app) fn render_header(&mut self, ctx: &egui::Context) {
        let theme = self.theme();

        egui::TopBottomPanel::top("header")
            .frame(
                egui::Frame::new()
                    .fill(theme.surface[0])
                    .inner_margin(egui::Margin::symmetric(12, 8))
                    .stroke(egui::Stroke::new(1.0, theme.border_medium)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new("📊 Customer Insights Chatbot")
                            .heading()
                            .color(theme.text_primary),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let label = match self.settings.theme {
                            ThemeChoice::Dark => "☀ Light",
                            ThemeChoice::Light => "🌙 Dark",
                        };
                        if ui.button(label).clicked() {
                            self.toggle_theme(ctx);
                        }
                        if ui
                            .button("📋 Copy HTML")
                            .on_hover_text("Copy the conversation as HTML")
                            .clicked()
                        {
                            ctx.copy_text(self.widget.view.to_html());
                        }
                    });
                });
            });
    }

    /// Central panel: the message list.
    pub(in crate::app) fn render_central_panel(&mut self, ctx: &egui::Context) {
        let theme = self.theme();
        let scroll_to_latest = self.widget.view.take_scroll_request();

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme.surface[2]))
            .show(ctx, |ui| {
                ui::render_conversation(ui, &self.widget.view, scroll_to_latest, &theme);
            });
    }
}
