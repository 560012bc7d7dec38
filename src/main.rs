//! AMS Checklist Admin Frontend Entry Point

mod actions;
mod api;
mod app;
mod browser;
mod checklist;
mod components;
mod config;
mod context;
mod error;
mod logging;
mod models;
mod session;
mod store;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let config = AppConfig::load();
    logging::init(config.log_level);
    log::info!(target: "app", "starting, API base {}", config.api_base);
    mount_to_body(move || view! { <App config=config.clone() /> });
}
