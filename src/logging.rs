//! Diagnostic logging setup.
//!
//! Logs go to stderr through `tracing-subscriber`. `RUST_LOG` takes
//! precedence; otherwise the level comes from the `-v` count. Chat content is
//! never written to disk.

use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default filter directive for a given `-v` count.
pub fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbosity)));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
