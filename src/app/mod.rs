//! Application module structure for ChatApp
//!
//! - `core`: ChatApp struct, backend thread startup and shutdown
//! - `update`: Main update loop
//! - `ui::panels`: Header and central panel rendering
//! - `ui::input`: Message input panel

pub mod core;
pub mod update;
pub mod ui;

pub use core::ChatApp;
