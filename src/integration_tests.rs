//! Integration tests for insight-chat
//!
//! These tests run the widget against the real backend loop with a scripted
//! transport, so the full send, placeholder and settle path is exercised.

#[cfg(test)]
mod integration_tests {
    use async_trait::async_trait;
    use crossbeam_channel::unbounded;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use crate::backend::{run_backend, ChatTransport};
    use crate::config::DEFAULT_ERROR_TEXT;
    use crate::conversation::{BubbleBody, Role};
    use crate::error::ExchangeError;
    use crate::exchange::ExchangeState;
    use crate::input_state::SendIntent;
    use crate::markup::RenderMode;
    use crate::protocol::BackendAction;
    use crate::widget::{ChatWidget, WidgetOptions};

    /// Replies with bold text, fails on "fail", and counts calls.
    struct CountingTransport {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ChatTransport for CountingTransport {
        async fn send(&self, message: &str) -> Result<String, ExchangeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if message == "fail" {
                Err(ExchangeError::Decode("reply missing".to_string()))
            } else {
                Ok(format!("**{}**", message))
            }
        }
    }

    struct Harness {
        widget: ChatWidget,
        transport: Arc<CountingTransport>,
        action_tx: crossbeam_channel::Sender<BackendAction>,
    }

    impl Harness {
        fn new(options: WidgetOptions) -> Self {
            let (action_tx, action_rx) = unbounded();
            let (event_tx, event_rx) = unbounded();
            let transport = Arc::new(CountingTransport {
                calls: AtomicUsize::new(0),
            });

            let backend_transport = Arc::clone(&transport);
            std::thread::spawn(move || {
                run_backend(action_rx, event_tx, backend_transport);
            });

            Self {
                widget: ChatWidget::new(options, action_tx.clone(), event_rx),
                transport,
                action_tx,
            }
        }

        fn submit(&mut self, text: &str) {
            self.widget.input.message_input = text.to_string();
            self.widget.on_send_intent(SendIntent::Click);
        }

        /// Poll the way the UI loop does until the exchange settles.
        fn wait_settled(&mut self) {
            let deadline = Instant::now() + Duration::from_secs(5);
            while self.widget.exchange().is_awaiting() {
                assert!(Instant::now() < deadline, "exchange never settled");
                self.widget.process_events();
                std::thread::sleep(Duration::from_millis(10));
            }
        }
    }

    impl Drop for Harness {
        fn drop(&mut self) {
            let _ = self.action_tx.send(BackendAction::Shutdown);
        }
    }

    #[test]
    fn test_successful_exchange_replaces_placeholder() {
        let mut h = Harness::new(WidgetOptions::default());
        h.submit("  top products  ");

        // User bubble and placeholder are shown before any reply
        assert_eq!(h.widget.view.len(), 3);
        assert!(h.widget.input.message_input.is_empty());
        assert!(h.widget.view.last().unwrap().is_placeholder());

        h.wait_settled();

        let bubbles = h.widget.view.bubbles();
        assert_eq!(bubbles.len(), 3);
        assert_eq!(bubbles[1].role, Role::User);
        assert_eq!(bubbles[1].body.html(), "top products");
        assert_eq!(bubbles[2].role, Role::Bot);
        assert_eq!(bubbles[2].body.html(), "<strong>top products</strong>");
        assert_eq!(h.widget.view.placeholder_count(), 0);
        assert_eq!(h.widget.exchange().state(), ExchangeState::Idle);
    }

    #[test]
    fn test_failed_exchange_shows_error_bubble() {
        let mut h = Harness::new(WidgetOptions::default());
        h.submit("fail");
        h.wait_settled();

        let last = h.widget.view.last().unwrap();
        assert_eq!(last.role, Role::Bot);
        assert_eq!(last.body.html(), DEFAULT_ERROR_TEXT);
        assert_eq!(h.widget.view.placeholder_count(), 0);
        assert_eq!(h.widget.view.len(), 3);
    }

    #[test]
    fn test_empty_input_sends_nothing() {
        let mut h = Harness::new(WidgetOptions::default());
        h.submit("   \t ");
        std::thread::sleep(Duration::from_millis(100));

        assert_eq!(h.widget.view.len(), 1);
        assert_eq!(h.transport.calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.widget.input.message_input, "   \t ");
    }

    #[test]
    fn test_send_while_awaiting_is_dropped() {
        let mut h = Harness::new(WidgetOptions::default());
        h.submit("first");
        h.widget.input.message_input = "second".to_string();
        assert!(h.widget.on_send_intent(SendIntent::Enter).is_none());
        assert_eq!(h.widget.input.message_input, "second");

        h.wait_settled();
        assert_eq!(h.transport.calls.load(Ordering::SeqCst), 1);

        // Once idle the kept text goes out normally
        assert!(h.widget.on_send_intent(SendIntent::Enter).is_some());
        h.wait_settled();
        assert_eq!(h.transport.calls.load(Ordering::SeqCst), 2);
        assert_eq!(h.widget.view.len(), 5);
    }

    #[test]
    fn test_escaped_mode_renders_markup_as_text() {
        let options = WidgetOptions {
            render_mode: RenderMode::Escaped,
            ..WidgetOptions::default()
        };
        let mut h = Harness::new(options);
        h.submit("<b>x</b>");
        h.wait_settled();

        let last = h.widget.view.last().unwrap();
        assert_eq!(
            last.body.html(),
            "<strong>&lt;b&gt;x&lt;/b&gt;</strong>"
        );
        match &last.body {
            BubbleBody::Text { lines, .. } => {
                assert_eq!(lines.len(), 1);
                assert!(lines[0].spans[0].bold);
                assert_eq!(lines[0].spans[0].text, "<b>x</b>");
            }
            other => panic!("unexpected body: {:?}", other),
        }
    }
}
