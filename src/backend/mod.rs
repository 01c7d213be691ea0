/// Backend submodules for the chat exchange
///
/// - `transport`: the `ChatTransport` seam and its reqwest implementation
/// - `main_loop`: Tokio event loop that runs exchanges off the UI thread
mod main_loop;
mod transport;

pub use main_loop::run_backend;
pub use transport::{ChatTransport, HttpTransport};
