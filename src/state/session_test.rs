use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::executor::block_on;
use leptos::prelude::*;
use serde_json::json;

use super::*;
use crate::net::error::ErrorKind;

// =============================================================
// Fakes
// =============================================================

#[derive(Default)]
struct FakeServer {
    login_reply: Option<Result<AuthReply, ApiError>>,
    register_reply: Option<Result<AuthReply, ApiError>>,
    profiles: HashMap<String, User>,
    profile_offline: bool,
    logout_offline: bool,
    logout_calls: Vec<String>,
    register_calls: Vec<Registration>,
}

#[derive(Clone, Default)]
struct FakeBackend(Rc<RefCell<FakeServer>>);

impl FakeBackend {
    fn with_user(token: &str, user: User) -> Self {
        let backend = Self::default();
        backend.0.borrow_mut().profiles.insert(token.to_owned(), user);
        backend
    }

    fn grant_login(&self, token: &str) {
        self.0.borrow_mut().login_reply = Some(Ok(reply(200, json!({ "access_token": token }))));
    }

    fn set_login(&self, result: Result<AuthReply, ApiError>) {
        self.0.borrow_mut().login_reply = Some(result);
    }

    fn set_register(&self, result: Result<AuthReply, ApiError>) {
        self.0.borrow_mut().register_reply = Some(result);
    }

    fn logout_calls(&self) -> Vec<String> {
        self.0.borrow().logout_calls.clone()
    }
}

fn unconfigured() -> ApiError {
    ApiError::Transport("no reply configured".to_owned())
}

impl AuthBackend for FakeBackend {
    async fn login(&self, _credentials: &Credentials) -> Result<AuthReply, ApiError> {
        self.0.borrow().login_reply.clone().unwrap_or_else(|| Err(unconfigured()))
    }

    async fn register(&self, registration: &Registration) -> Result<AuthReply, ApiError> {
        let mut server = self.0.borrow_mut();
        server.register_calls.push(registration.clone());
        server.register_reply.clone().unwrap_or_else(|| Err(unconfigured()))
    }

    async fn logout(&self, token: &str) -> Result<(), ApiError> {
        let mut server = self.0.borrow_mut();
        server.logout_calls.push(token.to_owned());
        if server.logout_offline {
            return Err(ApiError::Transport("connection refused".to_owned()));
        }
        Ok(())
    }

    async fn me(&self, token: &str) -> Result<User, ApiError> {
        let server = self.0.borrow();
        if server.profile_offline {
            return Err(ApiError::Transport("connection refused".to_owned()));
        }
        server
            .profiles
            .get(token)
            .cloned()
            .ok_or_else(|| ApiError::Rejected { status: 401, payload: json!({ "message": "Unauthenticated." }) })
    }
}

#[derive(Clone, Default)]
struct MemoryStore(Rc<RefCell<Option<String>>>);

impl MemoryStore {
    fn holding(token: &str) -> Self {
        Self(Rc::new(RefCell::new(Some(token.to_owned()))))
    }

    fn get(&self) -> Option<String> {
        self.0.borrow().clone()
    }
}

impl TokenStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.get()
    }

    fn save(&self, token: &str) {
        *self.0.borrow_mut() = Some(token.to_owned());
    }

    fn clear(&self) {
        *self.0.borrow_mut() = None;
    }
}

fn reply(status: u16, body: serde_json::Value) -> AuthReply {
    AuthReply { status, body }
}

fn alice() -> User {
    User { id: 1, name: "A".to_owned(), email: "a@x.com".to_owned() }
}

fn manager(backend: &FakeBackend, store: &MemoryStore) -> SessionManager<FakeBackend, MemoryStore> {
    SessionManager::new(backend.clone(), store.clone())
}

fn snapshot(session: &SessionManager<FakeBackend, MemoryStore>) -> Session {
    session.session().get_untracked()
}

fn populated(token: &str) -> Session {
    Session { token: Some(token.to_owned()), user: Some(alice()), loading: false }
}

fn empty() -> Session {
    Session { token: None, user: None, loading: false }
}

/// Manager that has been initialized with `tok1` already signed in.
fn signed_in(backend: &FakeBackend, store: &MemoryStore) -> SessionManager<FakeBackend, MemoryStore> {
    store.save("tok1");
    let session = manager(backend, store);
    block_on(session.initialize());
    assert_eq!(snapshot(&session), populated("tok1"));
    session
}

// =============================================================
// initialize
// =============================================================

#[test]
fn new_session_is_pending_until_initialized() {
    let owner = Owner::new();
    owner.set();
    let session = manager(&FakeBackend::default(), &MemoryStore::default());
    assert_eq!(snapshot(&session), Session::pending());
}

#[test]
fn initialize_without_stored_token_leaves_session_empty() {
    let owner = Owner::new();
    owner.set();
    let store = MemoryStore::default();
    let session = manager(&FakeBackend::default(), &store);

    block_on(session.initialize());

    assert_eq!(snapshot(&session), empty());
    assert_eq!(store.get(), None);
}

#[test]
fn initialize_with_stored_token_restores_same_session_as_login() {
    let owner = Owner::new();
    owner.set();
    let backend = FakeBackend::with_user("tok1", alice());
    backend.grant_login("tok1");

    let restored_store = MemoryStore::holding("tok1");
    let restored = manager(&backend, &restored_store);
    block_on(restored.initialize());

    let fresh_store = MemoryStore::default();
    let fresh = manager(&backend, &fresh_store);
    block_on(fresh.initialize());
    block_on(fresh.login("a@x.com", "secret")).expect("login");

    assert_eq!(snapshot(&restored), populated("tok1"));
    assert_eq!(snapshot(&restored), snapshot(&fresh));
    assert_eq!(restored_store.get(), fresh_store.get());
}

#[test]
fn initialize_with_stale_token_clears_storage() {
    let owner = Owner::new();
    owner.set();
    let store = MemoryStore::holding("expired");
    let session = manager(&FakeBackend::with_user("tok1", alice()), &store);

    block_on(session.initialize());

    assert_eq!(snapshot(&session), empty());
    assert_eq!(store.get(), None);
}

#[test]
fn initialize_runs_only_once() {
    let owner = Owner::new();
    owner.set();
    let backend = FakeBackend::with_user("tok1", alice());
    let store = MemoryStore::default();
    let session = manager(&backend, &store);

    block_on(session.initialize());
    store.save("tok1");
    block_on(session.initialize());

    assert_eq!(snapshot(&session), empty());
}

// =============================================================
// login
// =============================================================

#[test]
fn login_success_populates_session_and_storage() {
    let owner = Owner::new();
    owner.set();
    let backend = FakeBackend::with_user("tok1", alice());
    backend.grant_login("tok1");
    let store = MemoryStore::default();
    let session = manager(&backend, &store);
    block_on(session.initialize());

    block_on(session.login("a@x.com", "secret")).expect("login");

    assert_eq!(snapshot(&session), populated("tok1"));
    assert_eq!(store.get(), session.token());
}

#[test]
fn login_rejected_leaves_empty_session_empty() {
    let owner = Owner::new();
    owner.set();
    let backend = FakeBackend::with_user("tok1", alice());
    backend.set_login(Ok(reply(401, json!({ "message": "Invalid credentials" }))));
    let store = MemoryStore::default();
    let session = manager(&backend, &store);
    block_on(session.initialize());

    let err = block_on(session.login("a@x.com", "wrong")).expect_err("rejected");

    assert_eq!(err.kind(), ErrorKind::Rejected);
    assert_eq!(err.payload(), Some(&json!({ "message": "Invalid credentials" })));
    assert_eq!(snapshot(&session), empty());
    assert_eq!(store.get(), None);
}

#[test]
fn login_rejected_leaves_populated_session_untouched() {
    let owner = Owner::new();
    owner.set();
    let backend = FakeBackend::with_user("tok1", alice());
    let store = MemoryStore::default();
    let session = signed_in(&backend, &store);
    backend.set_login(Ok(reply(422, json!({ "errors": { "email": ["required"] } }))));

    assert!(block_on(session.login("", "")).is_err());

    assert_eq!(snapshot(&session), populated("tok1"));
    assert_eq!(store.get().as_deref(), Some("tok1"));
}

#[test]
fn login_success_without_token_is_rejected() {
    let owner = Owner::new();
    owner.set();
    let backend = FakeBackend::default();
    backend.set_login(Ok(reply(200, json!({ "message": "ok" }))));
    let store = MemoryStore::default();
    let session = manager(&backend, &store);
    block_on(session.initialize());

    let err = block_on(session.login("a@x.com", "secret")).expect_err("no token");

    assert_eq!(err, ApiError::Rejected { status: 200, payload: json!({ "message": "ok" }) });
    assert_eq!(snapshot(&session), empty());
}

#[test]
fn login_network_failure_reports_network_kind() {
    let owner = Owner::new();
    owner.set();
    let backend = FakeBackend::default();
    backend.set_login(Err(ApiError::Transport("offline".to_owned())));
    let store = MemoryStore::default();
    let session = manager(&backend, &store);
    block_on(session.initialize());

    let err = block_on(session.login("a@x.com", "secret")).expect_err("offline");

    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(snapshot(&session), empty());
    assert_eq!(store.get(), None);
}

#[test]
fn login_with_unresolvable_profile_converges_to_empty() {
    let owner = Owner::new();
    owner.set();
    let backend = FakeBackend::default();
    backend.grant_login("tok1");
    let store = MemoryStore::default();
    let session = manager(&backend, &store);
    block_on(session.initialize());

    block_on(session.login("a@x.com", "secret")).expect("login reported");

    assert_eq!(snapshot(&session), empty());
    assert_eq!(store.get(), None);
}

#[test]
fn profile_fetch_network_failure_converges_to_empty() {
    let owner = Owner::new();
    owner.set();
    let backend = FakeBackend::with_user("tok1", alice());
    backend.0.borrow_mut().profile_offline = true;
    let store = MemoryStore::holding("tok1");
    let session = manager(&backend, &store);

    block_on(session.initialize());

    assert_eq!(snapshot(&session), empty());
    assert_eq!(store.get(), None);
}

// =============================================================
// register
// =============================================================

#[test]
fn register_without_token_reports_account_created_and_stays_empty() {
    let owner = Owner::new();
    owner.set();
    let backend = FakeBackend::default();
    backend.set_register(Ok(reply(201, json!({}))));
    let store = MemoryStore::default();
    let session = manager(&backend, &store);
    block_on(session.initialize());

    let outcome = block_on(session.register("A", "a@x.com", "secret", "secret")).expect("register");

    assert_eq!(outcome, RegisterOutcome::AccountCreated);
    assert_eq!(snapshot(&session), empty());
    assert_eq!(store.get(), None);
}

#[test]
fn register_with_token_signs_in() {
    let owner = Owner::new();
    owner.set();
    let backend = FakeBackend::with_user("tok2", alice());
    backend.set_register(Ok(reply(201, json!({ "access_token": "tok2", "user": { "id": 1 } }))));
    let store = MemoryStore::default();
    let session = manager(&backend, &store);
    block_on(session.initialize());

    let outcome = block_on(session.register("A", "a@x.com", "secret", "secret")).expect("register");

    assert_eq!(outcome, RegisterOutcome::SignedIn);
    assert_eq!(snapshot(&session), populated("tok2"));
    assert_eq!(store.get().as_deref(), Some("tok2"));
}

#[test]
fn register_sends_all_fields() {
    let owner = Owner::new();
    owner.set();
    let backend = FakeBackend::default();
    backend.set_register(Ok(reply(200, json!({}))));
    let session = manager(&backend, &MemoryStore::default());

    block_on(session.register("A", "a@x.com", "secret", "secret2")).expect("register");

    let calls = backend.0.borrow().register_calls.clone();
    assert_eq!(
        calls,
        vec![Registration {
            name: "A".to_owned(),
            email: "a@x.com".to_owned(),
            password: "secret".to_owned(),
            password_confirmation: "secret2".to_owned(),
        }]
    );
}

#[test]
fn register_rejected_keeps_validation_payload() {
    let owner = Owner::new();
    owner.set();
    let backend = FakeBackend::default();
    let payload = json!({ "errors": { "password": ["The password confirmation does not match."] } });
    backend.set_register(Ok(reply(422, payload.clone())));
    let session = manager(&backend, &MemoryStore::default());
    block_on(session.initialize());

    let err = block_on(session.register("A", "a@x.com", "secret", "other")).expect_err("rejected");

    assert_eq!(err, ApiError::Rejected { status: 422, payload });
    assert_eq!(snapshot(&session), empty());
}

// =============================================================
// logout
// =============================================================

#[test]
fn logout_notifies_server_and_clears_session() {
    let owner = Owner::new();
    owner.set();
    let backend = FakeBackend::with_user("tok1", alice());
    let store = MemoryStore::default();
    let session = signed_in(&backend, &store);

    block_on(session.logout());

    assert_eq!(backend.logout_calls(), vec!["tok1".to_owned()]);
    assert_eq!(snapshot(&session), empty());
    assert_eq!(store.get(), None);
}

#[test]
fn logout_clears_session_when_server_unreachable() {
    let owner = Owner::new();
    owner.set();
    let backend = FakeBackend::with_user("tok1", alice());
    backend.0.borrow_mut().logout_offline = true;
    let store = MemoryStore::default();
    let session = signed_in(&backend, &store);

    block_on(session.logout());

    assert_eq!(snapshot(&session), empty());
    assert_eq!(store.get(), None);
}

#[test]
fn logout_without_token_skips_server_call() {
    let owner = Owner::new();
    owner.set();
    let backend = FakeBackend::default();
    let store = MemoryStore::default();
    let session = manager(&backend, &store);
    block_on(session.initialize());

    block_on(session.logout());

    assert!(backend.logout_calls().is_empty());
    assert_eq!(snapshot(&session), empty());
}

// =============================================================
// reply classification
// =============================================================

#[test]
fn login_token_requires_success_and_token() {
    assert_eq!(login_token(reply(200, json!({ "access_token": "t" }))), Ok("t".to_owned()));
    assert!(login_token(reply(401, json!({ "access_token": "t" }))).is_err());
    assert!(login_token(reply(200, json!({}))).is_err());
}

#[test]
fn register_token_allows_missing_token_on_success() {
    assert_eq!(register_token(reply(201, json!({}))), Ok(None));
    assert_eq!(register_token(reply(200, json!({ "access_token": "t" }))), Ok(Some("t".to_owned())));
    assert!(register_token(reply(500, json!(null))).is_err());
}

// =============================================================
// interleaving
// =============================================================

/// Backend whose first `me` call waits until the paired sender fires.
#[derive(Clone)]
struct GatedBackend {
    inner: FakeBackend,
    gate: Rc<RefCell<Option<oneshot::Receiver<()>>>>,
}

impl GatedBackend {
    fn new(inner: FakeBackend) -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        (Self { inner, gate: Rc::new(RefCell::new(Some(rx))) }, tx)
    }
}

impl AuthBackend for GatedBackend {
    async fn login(&self, credentials: &Credentials) -> Result<AuthReply, ApiError> {
        self.inner.login(credentials).await
    }

    async fn register(&self, registration: &Registration) -> Result<AuthReply, ApiError> {
        self.inner.register(registration).await
    }

    async fn logout(&self, token: &str) -> Result<(), ApiError> {
        self.inner.logout(token).await
    }

    async fn me(&self, token: &str) -> Result<User, ApiError> {
        let gate = self.gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.inner.me(token).await
    }
}

#[test]
fn logout_during_pending_profile_fetch_stays_empty() {
    let owner = Owner::new();
    owner.set();
    let (backend, release) = GatedBackend::new(FakeBackend::with_user("tok1", alice()));
    let store = MemoryStore::holding("tok1");
    let session = SessionManager::new(backend, store.clone());

    block_on(async {
        futures::join!(session.initialize(), async {
            session.logout().await;
            let _ = release.send(());
        });
    });

    assert_eq!(session.session().get_untracked(), empty());
    assert_eq!(store.get(), None);
}

#[test]
fn login_during_failing_profile_fetch_keeps_new_session() {
    let owner = Owner::new();
    owner.set();
    let inner = FakeBackend::with_user("tok2", alice());
    inner.grant_login("tok2");
    let (backend, release) = GatedBackend::new(inner);
    let store = MemoryStore::holding("tok1");
    let session = SessionManager::new(backend, store.clone());

    block_on(async {
        futures::join!(session.initialize(), async {
            session.login("a@x.com", "secret").await.expect("login");
            let _ = release.send(());
        });
    });

    assert_eq!(session.session().get_untracked(), populated("tok2"));
    assert_eq!(store.get().as_deref(), Some("tok2"));
}
