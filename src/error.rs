use std::path::PathBuf;

use thiserror::Error;

/// Why an exchange with the chat endpoint failed. The widget shows the same
/// error bubble for every variant; the detail only goes to the log.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed reply: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ExchangeError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ExchangeError::Decode(e.to_string())
        } else {
            ExchangeError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ExchangeError {
    fn from(e: serde_json::Error) -> Self {
        ExchangeError::Decode(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid endpoint {0:?}: {1}")]
    InvalidEndpoint(String, String),

    #[error("could not determine a configuration directory")]
    NoConfigDir,
}
