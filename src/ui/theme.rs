//! Colour themes and global style for the chat window.
//!
//! Surfaces follow a three-level hierarchy:
//!
//! - `surface[0]`: header background
//! - `surface[1]`: input panel background
//! - `surface[2]`: message list background
//!
//! Bubble fills are separate so user and bot bubbles stay distinguishable in
//! both modes.

use std::collections::BTreeMap;

use eframe::egui::{self, Color32, FontFamily, FontId, TextStyle};

use crate::config::ThemeChoice;

#[derive(Clone, Debug)]
pub struct ChatTheme {
    pub surface: [Color32; 3],
    pub accent: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub border_medium: Color32,
    pub bot_bubble: Color32,
    pub user_bubble: Color32,
}

impl ChatTheme {
    pub fn for_choice(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Dark => Self::dark(),
            ThemeChoice::Light => Self::light(),
        }
    }

    pub fn dark() -> Self {
        Self {
            surface: [
                Color32::from_rgb(19, 19, 26),
                Color32::from_rgb(19, 19, 26),
                Color32::from_rgb(28, 28, 38),
            ],
            accent: Color32::from_rgb(88, 101, 242),
            text_primary: Color32::WHITE,
            text_muted: Color32::from_rgb(114, 118, 125),
            border_medium: Color32::from_rgb(47, 49, 54),
            bot_bubble: Color32::from_rgb(46, 46, 62),
            user_bubble: Color32::from_rgb(60, 69, 165),
        }
    }

    pub fn light() -> Self {
        Self {
            surface: [
                Color32::from_rgb(255, 255, 255),
                Color32::from_rgb(246, 246, 247),
                Color32::from_rgb(242, 243, 245),
            ],
            accent: Color32::from_rgb(88, 101, 242),
            text_primary: Color32::from_rgb(6, 6, 7),
            text_muted: Color32::from_rgb(116, 127, 141),
            border_medium: Color32::from_rgb(210, 213, 219),
            bot_bubble: Color32::from_rgb(227, 229, 232),
            user_bubble: Color32::from_rgb(200, 208, 250),
        }
    }
}

pub fn configure_text_styles() -> BTreeMap<TextStyle, FontId> {
    use FontFamily::{Monospace, Proportional};

    [
        (TextStyle::Small, FontId::new(10.0, Proportional)),
        (TextStyle::Body, FontId::new(14.0, Proportional)),
        (TextStyle::Button, FontId::new(13.0, Proportional)),
        (TextStyle::Heading, FontId::new(16.0, Proportional)),
        (TextStyle::Monospace, FontId::new(13.0, Monospace)),
    ]
    .into()
}

/// Apply visuals, spacing and text styles for the given theme choice.
///
/// Called at startup and whenever the theme is toggled.
pub fn apply_app_style(ctx: &egui::Context, choice: ThemeChoice) {
    ctx.set_visuals(match choice {
        ThemeChoice::Dark => egui::Visuals::dark(),
        ThemeChoice::Light => egui::Visuals::light(),
    });

    let theme = ChatTheme::for_choice(choice);
    let mut style = (*ctx.style()).clone();

    style.text_styles = configure_text_styles();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 5.0);

    style.visuals.widgets.inactive.corner_radius = egui::CornerRadius::same(6);
    style.visuals.widgets.hovered.corner_radius = egui::CornerRadius::same(6);
    style.visuals.widgets.active.corner_radius = egui::CornerRadius::same(6);
    style.visuals.widgets.active.bg_fill = theme.accent;
    style.visuals.selection.bg_fill = theme.accent.linear_multiply(0.4);

    ctx.set_style(style);
}
