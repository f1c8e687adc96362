//! Group Travel Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod drag_reorder;
mod error;
mod format;
mod forms;
mod membership;
mod models;
mod notice;
mod staging;
mod status;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(config::log_level()));
    log::info!("[APP] api base {}", config::api_base());
    mount_to_body(App);
}
