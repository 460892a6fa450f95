//! Customer review widget for the studio portfolio site.
//!
//! Reviews are aggregated from a constant seed record, a persistent store and user
//! submissions, then rendered as a looping marquee with rating statistics. Two page
//! variants exist: one backed by the shared server-side collection and one backed by
//! the browser's local storage.

pub mod app;
pub mod components;
pub mod config;
pub mod controller;
pub mod error;
pub mod maintenance;
pub mod models;
pub mod session;
pub mod store;
pub mod utils;
pub mod view;

#[cfg(feature = "ssr")]
pub mod api;
#[cfg(feature = "ssr")]
pub mod db;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;

    console_error_panic_hook::set_once();
    leptos::mount_to_body(App);
}
