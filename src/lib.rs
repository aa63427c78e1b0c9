//! # postboard
//!
//! Leptos + WASM frontend for the posts application: login, registration, a
//! searchable post feed with likes and comments, and a post composer.
//!
//! All persistence and validation live behind the remote REST API. The one
//! piece of client-side state with real invariants is the session manager in
//! [`state::session`], which keeps the bearer token, the resolved profile and
//! `localStorage` in step.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install console logging and hydrate the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
