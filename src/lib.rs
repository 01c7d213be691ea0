//! Customer insights chat widget library.
//!
//! This module re-exports the core components for testing and embedding.

pub mod app;
pub mod backend;
pub mod config;
pub mod conversation;
pub mod error;
pub mod exchange;
pub mod input_state;
pub mod logging;
pub mod markup;
pub mod protocol;
pub mod ui;
pub mod widget;

#[cfg(test)]
mod integration_tests;
