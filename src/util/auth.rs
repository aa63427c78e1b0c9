//! Shared auth routing helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components should apply identical unauthenticated redirect behavior,
//! and must wait for the stored token to resolve before deciding.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::session::Session;

/// True once startup has resolved and no user is signed in.
pub fn should_redirect_unauth(session: &Session) -> bool {
    !session.loading && session.user.is_none()
}

/// Where the root route should send the visitor, once known.
pub fn landing_route(session: &Session) -> Option<&'static str> {
    if session.loading {
        None
    } else if session.token.is_some() {
        Some("/dashboard")
    } else {
        Some("/login")
    }
}

/// Redirect to `/login` whenever startup has resolved and no user is present.
pub fn install_unauth_redirect<F>(session: ReadSignal<Session>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&session.get()) {
            navigate("/login", NavigateOptions::default());
        }
    });
}
