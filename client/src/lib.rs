//! Leptos front end for the map control layer.
//!
//! SYSTEM CONTEXT
//! ==============
//! `mapcore` owns every state machine; this crate renders them and, under the
//! `hydrate` feature, binds them to Leaflet in the browser. Server rendering
//! produces the static shell and the controls' initial markup only.

pub mod app;
pub mod components;
pub mod pages;
pub mod util;

/// Browser entry point: install the panic hook and logger, then hydrate.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("logger already initialised: {err}");
    }
    leptos::mount::hydrate_body(app::App);
}
