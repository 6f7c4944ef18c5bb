//! # client
//!
//! Leptos + WASM front end for the clinic front desk: a session gate in front
//! of the patient records screen.
//!
//! This crate contains the app shell, pages, components, and the browser
//! transport for the `frontdesk` collaborator traits. Screen logic and wire
//! mapping live in `frontdesk`; this crate wires them to signals and
//! `gloo-net`.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install browser logging and hydrate the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
