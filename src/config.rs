//! Build-time configuration for the remote API.
//!
//! SYSTEM CONTEXT
//! ==============
//! The WASM bundle has no process environment at runtime, so the API base URL
//! is baked in at compile time from `POSTBOARD_API_URL`. Every REST helper in
//! `net::api` builds its endpoint from [`api_base_url`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Name of the `localStorage` slot holding the bearer token.
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Resolved API base URL with any trailing slash removed.
pub fn api_base_url() -> String {
    resolve_base_url(option_env!("POSTBOARD_API_URL"))
}

fn resolve_base_url(raw: Option<&str>) -> String {
    let value = raw.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(DEFAULT_API_BASE_URL);
    value.trim_end_matches('/').to_owned()
}
