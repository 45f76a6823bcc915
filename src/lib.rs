//! Rental pricing site
//!
//! Server-rendered landing page whose pricing widget hydrates in the browser,
//! built with Leptos and WebAssembly. The pricing engine in [`core`] is plain
//! Rust and independent of the DOM.

#![recursion_limit = "4096"]

pub mod app;
pub mod core;
pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
