//! UI rendering modules for the chat widget.
//!
//! - `messages`: message list and bubble rendering
//! - `theme`: colour schemes and global style

mod messages;
mod theme;

pub use messages::render_conversation;
pub use theme::{apply_app_style, ChatTheme};
