//! The chat widget context.
//!
//! `ChatWidget` owns everything one chat surface needs: the conversation
//! view, the input field state and the exchange coordinator. It is built once
//! and every operation goes through it, so there is no ambient state. The
//! host (the egui app, or a test) feeds it send intents and calls
//! [`ChatWidget::process_events`] once per frame.

use crossbeam_channel::{Receiver, Sender};
use tracing::debug;

use crate::config::{Settings, DEFAULT_ERROR_TEXT, DEFAULT_GREETING};
use crate::conversation::{ConversationView, Message};
use crate::exchange::{ExchangeCoordinator, Settlement};
use crate::input_state::{InputState, SendIntent};
use crate::markup::RenderMode;
use crate::protocol::{BackendAction, ExchangeId, GuiEvent};

/// Fixed texts and render mode for one widget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetOptions {
    pub greeting: String,
    pub error_text: String,
    pub render_mode: RenderMode,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            greeting: DEFAULT_GREETING.to_string(),
            error_text: DEFAULT_ERROR_TEXT.to_string(),
            render_mode: RenderMode::default(),
        }
    }
}

impl From<&Settings> for WidgetOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            greeting: settings.greeting.clone(),
            error_text: settings.error_text.clone(),
            render_mode: settings.render_mode(),
        }
    }
}

pub struct ChatWidget {
    pub view: ConversationView,
    pub input: InputState,
    exchange: ExchangeCoordinator,
    event_rx: Receiver<GuiEvent>,
}

impl ChatWidget {
    /// Build the widget and render the greeting bubble.
    pub fn new(
        options: WidgetOptions,
        action_tx: Sender<BackendAction>,
        event_rx: Receiver<GuiEvent>,
    ) -> Self {
        let mut view = ConversationView::new(options.render_mode);
        view.render(Message::bot(options.greeting));

        Self {
            view,
            input: InputState::new(),
            exchange: ExchangeCoordinator::new(action_tx, options.error_text),
            event_rx,
        }
    }

    /// False while a reply is outstanding; the send control is disabled then.
    pub fn can_send(&self) -> bool {
        !self.exchange.is_awaiting()
    }

    pub fn exchange(&self) -> &ExchangeCoordinator {
        &self.exchange
    }

    /// Handle a click on the send button or Enter in the input field.
    ///
    /// While an exchange is outstanding the intent is dropped and the input
    /// is left as typed. Empty input is a no-op.
    pub fn on_send_intent(&mut self, intent: SendIntent) -> Option<ExchangeId> {
        if !self.can_send() {
            debug!(?intent, "send intent ignored while awaiting a reply");
            return None;
        }
        let text = self.input.take_submission()?;
        self.exchange.send(&mut self.view, text)
    }

    /// Drain pending backend events. Returns how many settled an exchange.
    pub fn process_events(&mut self) -> usize {
        let mut settled = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            if self.handle_event(event) != Settlement::Stale {
                settled += 1;
            }
        }
        settled
    }

    pub fn handle_event(&mut self, event: GuiEvent) -> Settlement {
        self.exchange.settle(&mut self.view, event)
    }
}
