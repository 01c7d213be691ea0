//! Native rendering of parsed message text.

use eframe::egui::{self, Color32};

use crate::markup::Line;
use crate::ui::theme::ChatTheme;

const MESSAGE_SIZE: f32 = 14.0;

/// Render parsed lines, one wrapped row per line.
pub(crate) fn render_lines(ui: &mut egui::Ui, lines: &[Line], color: Color32) {
    for line in lines {
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;

            if line.is_empty() {
                ui.label(egui::RichText::new(" ").size(MESSAGE_SIZE));
                return;
            }
            for span in &line.spans {
                // Split into words so long lines wrap at whitespace
                for word in span.text.split_inclusive(char::is_whitespace) {
                    let mut rich = egui::RichText::new(word).size(MESSAGE_SIZE).color(color);
                    if span.bold {
                        rich = rich.strong();
                    }
                    ui.label(rich);
                }
            }
        });
    }
}

/// Three dots, one highlighted at a time.
pub(crate) fn render_typing_dots(ui: &mut egui::Ui, theme: &ChatTheme) {
    let time = ui.input(|i| i.time);
    let active = (time * 3.0) as usize % 3;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;
        for i in 0..3 {
            let color = if i == active {
                theme.text_primary
            } else {
                theme.text_muted
            };
            ui.label(egui::RichText::new("●").size(10.0).color(color));
        }
    });
}
