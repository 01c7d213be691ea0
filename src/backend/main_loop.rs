//! Backend event loop: runs each exchange on a Tokio runtime and reports
//! the single settlement back to the UI thread.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use tokio::runtime::Runtime;
use tracing::{debug, error, info, warn};

use super::transport::ChatTransport;
use crate::protocol::{BackendAction, ExchangeId, GuiEvent};

/// How long the loop sleeps when no action is queued.
const IDLE_POLL: Duration = Duration::from_millis(20);

/// Run the backend event loop on a tokio runtime.
///
/// Returns when `BackendAction::Shutdown` arrives or every sender is dropped.
/// Exchanges still in flight at that point are abandoned.
pub fn run_backend(
    action_rx: Receiver<BackendAction>,
    event_tx: Sender<GuiEvent>,
    transport: Arc<dyn ChatTransport>,
) {
    let rt = match Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!(error = %e, "failed to create Tokio runtime; every exchange will fail");
            fail_all(&action_rx, &event_tx, &format!("runtime unavailable: {e}"));
            return;
        }
    };

    rt.block_on(async move {
        loop {
            match action_rx.try_recv() {
                Ok(BackendAction::SendMessage { exchange, text }) => {
                    debug!(exchange = exchange.0, "dispatching exchange");
                    tokio::spawn(run_exchange(
                        exchange,
                        text,
                        Arc::clone(&transport),
                        event_tx.clone(),
                    ));
                }
                Ok(BackendAction::Shutdown) => {
                    debug!("backend shutdown requested");
                    break;
                }
                Err(TryRecvError::Disconnected) => {
                    debug!("UI side closed; stopping backend");
                    break;
                }
                Err(TryRecvError::Empty) => {
                    tokio::time::sleep(IDLE_POLL).await;
                }
            }
        }
    });
}

/// One request, one settlement event.
async fn run_exchange(
    exchange: ExchangeId,
    text: String,
    transport: Arc<dyn ChatTransport>,
    event_tx: Sender<GuiEvent>,
) {
    let event = match transport.send(&text).await {
        Ok(reply) => {
            info!(exchange = exchange.0, reply_bytes = reply.len(), "exchange resolved");
            GuiEvent::ReplyReceived { exchange, reply }
        }
        Err(e) => {
            warn!(exchange = exchange.0, error = %e, "exchange failed");
            GuiEvent::ExchangeFailed {
                exchange,
                reason: e.to_string(),
            }
        }
    };
    // The UI may already be gone; nothing left to notify then.
    let _ = event_tx.send(event);
}

/// Without a runtime, settle every request as failed so no placeholder is
/// left waiting.
fn fail_all(action_rx: &Receiver<BackendAction>, event_tx: &Sender<GuiEvent>, reason: &str) {
    for action in action_rx.iter() {
        match action {
            BackendAction::SendMessage { exchange, .. } => {
                let _ = event_tx.send(GuiEvent::ExchangeFailed {
                    exchange,
                    reason: reason.to_string(),
                });
            }
            BackendAction::Shutdown => break,
        }
    }
}
