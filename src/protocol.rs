use serde::{Deserialize, Serialize};

/// Correlates a dispatched request with its settlement event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ExchangeId(pub u64);

/// Actions sent from the UI to the Backend
#[derive(Debug, Clone)]
pub enum BackendAction {
    /// Post one message to the chat endpoint
    SendMessage { exchange: ExchangeId, text: String },
    /// Stop the backend loop
    Shutdown,
}

/// Events sent from the Backend to the UI. Exactly one per `SendMessage`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuiEvent {
    /// The endpoint answered with a well-formed reply
    ReplyReceived { exchange: ExchangeId, reply: String },
    /// Transport or parsing failure
    ExchangeFailed { exchange: ExchangeId, reason: String },
}

impl GuiEvent {
    pub fn exchange(&self) -> ExchangeId {
        match self {
            GuiEvent::ReplyReceived { exchange, .. } | GuiEvent::ExchangeFailed { exchange, .. } => {
                *exchange
            }
        }
    }
}

/// Request body for `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
}

/// Success body of `POST /chat`. Extra fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    pub reply: String,
}
