//! Auth-session state and the manager that owns it.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` constructs one [`AppSession`], provides it via context, and calls
//! [`SessionManager::initialize`] once on hydrate. Pages read the session
//! through [`SessionManager::session`] and borrow the bearer token from
//! [`SessionManager::token`]; nothing else touches the storage slot.
//!
//! DESIGN
//! ======
//! The network and storage seams are traits so the manager's transitions can
//! be driven in unit tests with in-memory fakes. State lives in an
//! `RwSignal`, so every page observing it re-renders on login/logout.
//!
//! INVARIANTS
//! ==========
//! - `user` is only set while `token` is set.
//! - After any operation completes, the storage slot equals `token`.
//! - A token whose profile cannot be resolved is dropped, never kept.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;

use crate::net::api::HttpAuthBackend;
use crate::net::error::ApiError;
use crate::net::types::{AuthReply, Credentials, Registration, User};
use crate::util::storage::{BrowserTokenStore, TokenStore};

/// Remote endpoints the session manager depends on.
#[allow(async_fn_in_trait)]
pub trait AuthBackend {
    async fn login(&self, credentials: &Credentials) -> Result<AuthReply, ApiError>;
    async fn register(&self, registration: &Registration) -> Result<AuthReply, ApiError>;
    async fn logout(&self, token: &str) -> Result<(), ApiError>;
    async fn me(&self, token: &str) -> Result<User, ApiError>;
}

/// Current authentication state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
    /// True until the stored token (if any) has been resolved on startup.
    pub loading: bool,
}

impl Session {
    /// Initial state before `initialize` has run.
    pub fn pending() -> Self {
        Self { loading: true, ..Self::default() }
    }
}

/// Successful registration result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// The server issued a token and the session is now populated.
    SignedIn,
    /// The account exists but no token was issued; the caller must log in.
    AccountCreated,
}

/// Session manager wired to the real HTTP backend and `localStorage`.
pub type AppSession = SessionManager<HttpAuthBackend, BrowserTokenStore>;

#[derive(Clone)]
pub struct SessionManager<B, S> {
    backend: B,
    store: S,
    state: RwSignal<Session>,
    started: Arc<AtomicBool>,
}

impl<B: AuthBackend, S: TokenStore> SessionManager<B, S> {
    pub fn new(backend: B, store: S) -> Self {
        Self {
            backend,
            store,
            state: RwSignal::new(Session::pending()),
            started: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Read-only reactive view of the session.
    pub fn session(&self) -> ReadSignal<Session> {
        self.state.read_only()
    }

    /// Current bearer token, read without subscribing.
    pub fn token(&self) -> Option<String> {
        self.state.with_untracked(|s| s.token.clone())
    }

    /// Restore a persisted token and resolve its profile. Only the first call
    /// does anything.
    pub async fn initialize(&self) {
        if self.started.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(token) = self.store.load() {
            log::debug!("restoring stored session");
            self.state.update(|s| s.token = Some(token.clone()));
            self.fetch_profile(&token).await;
        }
        self.state.update(|s| s.loading = false);
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// `Rejected` when the server refuses the credentials or answers without a
    /// token; `Transport`/`Decode` on network failure. The session is left
    /// unchanged in every error case.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let credentials = Credentials { email: email.to_owned(), password: password.to_owned() };
        let reply = self.backend.login(&credentials).await.inspect_err(|e| {
            log::warn!("login request failed: {e}");
        })?;
        let token = login_token(reply).inspect_err(|e| log::info!("login rejected: {e}"))?;
        self.adopt(token).await;
        log::info!("login succeeded");
        Ok(())
    }

    /// Create an account. Signs in automatically when the server returns a
    /// token.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::login`]; a successful response without a token
    /// is not an error.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        password_confirmation: &str,
    ) -> Result<RegisterOutcome, ApiError> {
        let registration = Registration {
            name: name.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
            password_confirmation: password_confirmation.to_owned(),
        };
        let reply = self.backend.register(&registration).await.inspect_err(|e| {
            log::warn!("register request failed: {e}");
        })?;
        let outcome = match register_token(reply).inspect_err(|e| log::info!("registration rejected: {e}"))? {
            Some(token) => {
                self.adopt(token).await;
                RegisterOutcome::SignedIn
            }
            None => RegisterOutcome::AccountCreated,
        };
        log::info!("registration succeeded: {outcome:?}");
        Ok(outcome)
    }

    /// Drop the session. The server is notified best-effort; local state is
    /// always cleared.
    pub async fn logout(&self) {
        if let Some(token) = self.token() {
            if let Err(e) = self.backend.logout(&token).await {
                log::warn!("logout notification failed: {e}");
            }
        }
        self.clear();
        log::info!("session cleared");
    }

    async fn adopt(&self, token: String) {
        self.store.save(&token);
        self.state.update(|s| s.token = Some(token.clone()));
        self.fetch_profile(&token).await;
    }

    async fn fetch_profile(&self, token: &str) {
        match self.backend.me(token).await {
            Ok(user) => self.state.update(|s| {
                if s.token.as_deref() == Some(token) {
                    s.user = Some(user);
                }
            }),
            Err(e) => {
                log::warn!("profile fetch failed, dropping session: {e}");
                if self.token().as_deref() == Some(token) {
                    self.clear();
                }
            }
        }
    }

    fn clear(&self) {
        self.store.clear();
        self.state.update(|s| {
            s.token = None;
            s.user = None;
        });
    }
}

fn rejection(reply: AuthReply) -> ApiError {
    ApiError::Rejected { status: reply.status, payload: reply.body }
}

fn login_token(reply: AuthReply) -> Result<String, ApiError> {
    if reply.is_success() {
        if let Some(token) = reply.access_token() {
            return Ok(token.to_owned());
        }
    }
    Err(rejection(reply))
}

fn register_token(reply: AuthReply) -> Result<Option<String>, ApiError> {
    if !reply.is_success() {
        return Err(rejection(reply));
    }
    Ok(reply.access_token().map(str::to_owned))
}
