//! Message rendering for the central chat panel.

mod format;
mod render;

pub use render::render_conversation;
