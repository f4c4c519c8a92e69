//! # client
//!
//! Leptos + WASM front-end shell: route table, navigation guard, session
//! context and the authenticated REST client views talk to the backend with.
//!
//! Built with `hydrate` for the browser bundle and `ssr` when linked into the
//! host server.

pub mod app;
pub mod net;
pub mod pages;
pub mod routes;
pub mod state;
pub mod util;

/// Browser entry point: install the panic hook and console logger, then
/// hydrate the server-rendered markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("hydrating app");
    leptos::mount::hydrate_body(app::App);
}
