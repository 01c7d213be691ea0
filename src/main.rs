//! Customer insights chat widget built with egui.
//!
//! Architecture:
//! - Main thread: runs the egui UI
//! - Backend thread: runs a Tokio runtime for the HTTP exchanges
//! - Communication via crossbeam channels

use clap::Parser;
use eframe::egui;
use tracing::error;

use insight_chat::app::ChatApp;
use insight_chat::config::{settings_path, Args, StoredSettings};
use insight_chat::logging::init_tracing;

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let stored = StoredSettings::load(args.settings.clone().or_else(settings_path));
    let settings = stored.runtime(&args);

    let chat_url = match settings.chat_url() {
        Ok(url) => url,
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Customer Insights Chatbot")
            .with_inner_size([480.0, 640.0])
            .with_min_inner_size([320.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Customer Insights Chatbot",
        options,
        Box::new(move |cc| Ok(Box::new(ChatApp::new(cc, settings, chat_url, stored)))),
    )
}
