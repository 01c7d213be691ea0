//! Panel rendering for ChatApp.

mod input;
mod panels;
