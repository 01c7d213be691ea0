//! Exchange coordinator: one user send, one placeholder, one request, one
//! settlement.
//!
//! State per cycle: `Idle -> AwaitingReply -> (Resolved | Failed) -> Idle`.
//! Entering `AwaitingReply` happens together with the placeholder insertion;
//! leaving it happens on the settlement event for the same exchange id.

use crossbeam_channel::Sender;
use tracing::{debug, warn};

use crate::conversation::{BubbleId, ConversationView, Message};
use crate::protocol::{BackendAction, ExchangeId, GuiEvent};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExchangeState {
    Idle,
    AwaitingReply {
        exchange: ExchangeId,
        placeholder: BubbleId,
    },
}

/// Result of applying a backend event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Settlement {
    /// The reply was rendered in place of the placeholder.
    Resolved,
    /// The error bubble was rendered in place of the placeholder.
    Failed,
    /// The event did not belong to the outstanding exchange and was ignored.
    Stale,
}

pub struct ExchangeCoordinator {
    state: ExchangeState,
    next_exchange: u64,
    action_tx: Sender<BackendAction>,
    error_text: String,
}

impl ExchangeCoordinator {
    pub fn new(action_tx: Sender<BackendAction>, error_text: impl Into<String>) -> Self {
        Self {
            state: ExchangeState::Idle,
            next_exchange: 0,
            action_tx,
            error_text: error_text.into(),
        }
    }

    pub fn state(&self) -> ExchangeState {
        self.state
    }

    pub fn is_awaiting(&self) -> bool {
        matches!(self.state, ExchangeState::AwaitingReply { .. })
    }

    /// Start an exchange for `text`.
    ///
    /// Returns `None` without touching the view while another exchange is
    /// outstanding.
    pub fn send(&mut self, view: &mut ConversationView, text: String) -> Option<ExchangeId> {
        if self.is_awaiting() {
            debug!("send dropped: an exchange is already outstanding");
            return None;
        }

        view.render(Message::user(text.clone()));
        let placeholder = view.show_typing();

        let exchange = ExchangeId(self.next_exchange);
        self.next_exchange += 1;
        self.state = ExchangeState::AwaitingReply {
            exchange,
            placeholder,
        };

        debug!(exchange = exchange.0, bytes = text.len(), "exchange started");
        if self
            .action_tx
            .send(BackendAction::SendMessage { exchange, text })
            .is_err()
        {
            // Backend is gone, so nothing will ever settle this exchange.
            warn!(exchange = exchange.0, "backend unavailable");
            self.settle(
                view,
                GuiEvent::ExchangeFailed {
                    exchange,
                    reason: "backend unavailable".into(),
                },
            );
        }
        Some(exchange)
    }

    /// Apply a settlement event from the backend.
    pub fn settle(&mut self, view: &mut ConversationView, event: GuiEvent) -> Settlement {
        let ExchangeState::AwaitingReply {
            exchange,
            placeholder,
        } = self.state
        else {
            debug!(exchange = event.exchange().0, "settlement with no outstanding exchange");
            return Settlement::Stale;
        };
        if event.exchange() != exchange {
            debug!(
                expected = exchange.0,
                got = event.exchange().0,
                "ignoring settlement for another exchange"
            );
            return Settlement::Stale;
        }

        view.remove_placeholder(placeholder);
        self.state = ExchangeState::Idle;

        match event {
            GuiEvent::ReplyReceived { reply, .. } => {
                view.render(Message::bot(reply));
                Settlement::Resolved
            }
            GuiEvent::ExchangeFailed { reason, .. } => {
                debug!(exchange = exchange.0, %reason, "showing error bubble");
                view.render(Message::bot(self.error_text.clone()));
                Settlement::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Role;
    use crossbeam_channel::unbounded;

    const ERR: &str = "❌ Error reaching server";

    #[test]
    fn test_send_renders_user_and_placeholder() {
        let (tx, rx) = unbounded();
        let mut coord = ExchangeCoordinator::new(tx, ERR);
        let mut view = ConversationView::default();

        let id = coord.send(&mut view, "hello".into()).unwrap();

        assert_eq!(view.len(), 2);
        assert_eq!(view.bubbles()[0].role, Role::User);
        assert_eq!(view.bubbles()[0].body.html(), "hello");
        assert!(view.bubbles()[1].is_placeholder());
        assert!(coord.is_awaiting());

        match rx.try_recv().unwrap() {
            BackendAction::SendMessage { exchange, text } => {
                assert_eq!(exchange, id);
                assert_eq!(text, "hello");
            }
            other => panic!("unexpected action {other:?}"),
        }
        // Exactly one request
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_reply_replaces_placeholder() {
        let (tx, _rx) = unbounded();
        let mut coord = ExchangeCoordinator::new(tx, ERR);
        let mut view = ConversationView::default();
        let id = coord.send(&mut view, "q".into()).unwrap();

        let outcome = coord.settle(
            &mut view,
            GuiEvent::ReplyReceived {
                exchange: id,
                reply: "**hi**".into(),
            },
        );

        assert_eq!(outcome, Settlement::Resolved);
        assert_eq!(coord.state(), ExchangeState::Idle);
        assert_eq!(view.placeholder_count(), 0);
        let last = view.last().unwrap();
        assert_eq!(last.role, Role::Bot);
        assert_eq!(last.body.html(), "<strong>hi</strong>");
    }

    #[test]
    fn test_failure_shows_fixed_error() {
        let (tx, _rx) = unbounded();
        let mut coord = ExchangeCoordinator::new(tx, ERR);
        let mut view = ConversationView::default();
        let id = coord.send(&mut view, "q".into()).unwrap();

        let outcome = coord.settle(
            &mut view,
            GuiEvent::ExchangeFailed {
                exchange: id,
                reason: "connection refused".into(),
            },
        );

        assert_eq!(outcome, Settlement::Failed);
        assert_eq!(view.placeholder_count(), 0);
        assert_eq!(view.last().unwrap().body.html(), ERR);
        assert!(!coord.is_awaiting());
    }

    #[test]
    fn test_second_send_dropped_while_awaiting() {
        let (tx, rx) = unbounded();
        let mut coord = ExchangeCoordinator::new(tx, ERR);
        let mut view = ConversationView::default();
        coord.send(&mut view, "first".into()).unwrap();

        assert_eq!(coord.send(&mut view, "second".into()), None);
        assert_eq!(view.len(), 2);
        assert_eq!(view.placeholder_count(), 1);
        assert_eq!(rx.len(), 1);
    }

    #[test]
    fn test_stale_settlement_ignored() {
        let (tx, _rx) = unbounded();
        let mut coord = ExchangeCoordinator::new(tx, ERR);
        let mut view = ConversationView::default();

        // Nothing outstanding
        let outcome = coord.settle(
            &mut view,
            GuiEvent::ReplyReceived {
                exchange: ExchangeId(7),
                reply: "late".into(),
            },
        );
        assert_eq!(outcome, Settlement::Stale);
        assert!(view.is_empty());

        let id = coord.send(&mut view, "q".into()).unwrap();
        let outcome = coord.settle(
            &mut view,
            GuiEvent::ReplyReceived {
                exchange: ExchangeId(id.0 + 1),
                reply: "wrong".into(),
            },
        );
        assert_eq!(outcome, Settlement::Stale);
        assert_eq!(view.placeholder_count(), 1);
        assert!(coord.is_awaiting());
    }

    #[test]
    fn test_backend_gone_fails_immediately() {
        let (tx, rx) = unbounded();
        drop(rx);
        let mut coord = ExchangeCoordinator::new(tx, ERR);
        let mut view = ConversationView::default();

        assert!(coord.send(&mut view, "q".into()).is_some());
        assert!(!coord.is_awaiting());
        assert_eq!(view.placeholder_count(), 0);
        assert_eq!(view.len(), 2);
        assert_eq!(view.last().unwrap().body.html(), ERR);
    }
}
