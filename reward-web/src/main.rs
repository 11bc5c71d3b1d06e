//! Fitness Club Reward Tracker
//!
//! Browser front end for the reward points contract: connect MetaMask, check
//! your points, and add points to a member's address.

use leptos::prelude::*;
use lib_core::config::Config;
use wasm_bindgen::prelude::*;

mod app;
mod components;
mod pages;
mod services;
mod state;
mod utils;

use app::{App, ConfigError};

#[wasm_bindgen(start)]
pub fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // lib-core logs through `tracing`, which falls back to `log` without a subscriber
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Reward tracker starting...");

    hide_loading_screen();

    match Config::bundled() {
        Ok(config) => {
            log::info!("Reward contract at {}", config.contract_address);
            leptos::mount::mount_to_body(move || view! { <App config=config/> });
        }
        Err(err) => {
            log::error!("Invalid bundled configuration: {}", err);
            let message = err.to_string();
            leptos::mount::mount_to_body(move || view! { <ConfigError message=message/> });
        }
    }
}

/// Hide the static loading placeholder from index.html
fn hide_loading_screen() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::warn!("No document available");
        return;
    };

    match document.get_element_by_id("leptos-loading") {
        Some(loading_element) => {
            if let Err(e) = loading_element.class_list().add_1("hidden") {
                log::warn!("Failed to hide loading screen: {:?}", e);
            }
        }
        None => log::debug!("Loading element not found"),
    }
}
