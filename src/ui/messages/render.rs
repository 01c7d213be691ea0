//! Message list rendering with avatars and bubbles.

use eframe::egui;

use crate::conversation::{Bubble, BubbleBody, ConversationView, Role};
use crate::ui::theme::ChatTheme;

use super::format::{render_lines, render_typing_dots};

/// Share of the remaining row width a bubble may use.
const BUBBLE_WIDTH_RATIO: f32 = 0.75;

/// Render the scrolling message list. When `scroll_to_latest` is set the
/// newest bubble is brought into view.
pub fn render_conversation(
    ui: &mut egui::Ui,
    view: &ConversationView,
    scroll_to_latest: bool,
    theme: &ChatTheme,
) {
    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            ui.add_space(8.0);

            let count = view.len();
            for (idx, bubble) in view.bubbles().iter().enumerate() {
                let response = render_bubble(ui, bubble, theme);
                if scroll_to_latest && idx + 1 == count {
                    response.scroll_to_me(Some(egui::Align::BOTTOM));
                }
            }

            ui.add_space(8.0);
        });
}

/// Bot bubbles sit left with the avatar first, user bubbles sit right with
/// the avatar last.
fn render_bubble(ui: &mut egui::Ui, bubble: &Bubble, theme: &ChatTheme) -> egui::Response {
    let (layout, fill) = match bubble.role {
        Role::Bot => (egui::Layout::left_to_right(egui::Align::TOP), theme.bot_bubble),
        Role::User => (egui::Layout::right_to_left(egui::Align::TOP), theme.user_bubble),
    };

    ui.add_space(6.0);
    ui.with_layout(layout, |ui| {
        ui.add_space(12.0);
        ui.label(egui::RichText::new(bubble.role.avatar()).size(22.0));
        ui.add_space(4.0);

        let max_width = (ui.available_width() * BUBBLE_WIDTH_RATIO).max(120.0);
        egui::Frame::new()
            .fill(fill)
            .corner_radius(12.0)
            .inner_margin(egui::Margin::symmetric(12, 8))
            .show(ui, |ui| {
                ui.set_max_width(max_width);
                ui.vertical(|ui| render_body(ui, &bubble.body, theme));
            })
            .response
            .on_hover_text(bubble.timestamp.as_str())
    })
    .inner
}

fn render_body(ui: &mut egui::Ui, body: &BubbleBody, theme: &ChatTheme) {
    match body {
        BubbleBody::Text { lines, .. } => render_lines(ui, lines, theme.text_primary),
        BubbleBody::Markup { html } => {
            ui.label(egui::RichText::new(html).size(14.0).color(theme.text_primary));
        }
        BubbleBody::Typing => render_typing_dots(ui, theme),
    }
}
