//! Core ChatApp struct definition and initialization

use crossbeam_channel::{unbounded, Sender};
use std::sync::Arc;
use std::thread;
use tracing::{debug, error, info};

use crate::backend::{run_backend, HttpTransport};
use crate::config::{Settings, StoredSettings};
use crate::protocol::BackendAction;
use crate::ui;
use crate::widget::{ChatWidget, WidgetOptions};

pub struct ChatApp {
    // Conversation, input field and exchange state
    pub widget: ChatWidget,

    // Settings for this run, command line overrides included
    pub settings: Settings,

    // The file as loaded; only a toggled theme is written back to it
    stored: StoredSettings,
    theme_toggled: bool,

    // Kept for the shutdown request on drop
    action_tx: Sender<BackendAction>,
}

impl ChatApp {
    pub(super) fn theme(&self) -> ui::ChatTheme {
        ui::ChatTheme::for_choice(self.settings.theme)
    }

    /// Build the app around an already validated chat URL. `settings` is
    /// `stored` merged with the command line.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        chat_url: String,
        stored: StoredSettings,
    ) -> Self {
        // Create channels for UI <-> Backend
        let (action_tx, action_rx) = unbounded::<BackendAction>();
        let (event_tx, event_rx) = unbounded();

        info!(%chat_url, "starting chat backend");
        let transport = Arc::new(HttpTransport::new(chat_url));
        thread::spawn(move || {
            run_backend(action_rx, event_tx, transport);
        });

        ui::apply_app_style(&cc.egui_ctx, settings.theme);

        let widget = ChatWidget::new(
            WidgetOptions::from(&settings),
            action_tx.clone(),
            event_rx,
        );

        Self {
            widget,
            settings,
            stored,
            theme_toggled: false,
            action_tx,
        }
    }

    pub(super) fn toggle_theme(&mut self, ctx: &eframe::egui::Context) {
        self.settings.theme = self.settings.theme.toggled();
        self.theme_toggled = true;
        ui::apply_app_style(ctx, self.settings.theme);
    }
}

impl Drop for ChatApp {
    fn drop(&mut self) {
        let _ = self.action_tx.send(BackendAction::Shutdown);
        if !self.theme_toggled {
            return;
        }
        match self.stored.save_theme(self.settings.theme) {
            Ok(true) => debug!(theme = ?self.settings.theme, "saved theme"),
            Ok(false) => {}
            Err(e) => error!("Failed to save settings: {}", e),
        }
    }
}
