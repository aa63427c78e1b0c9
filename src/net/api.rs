//! REST API helpers for communicating with the posts backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `ApiError::Transport` since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>`. Non-2xx responses become
//! `Rejected` with whatever payload the server sent; transport and body
//! parse failures are kept apart so the session layer can classify them.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::error::ApiError;
use super::types::{AuthReply, Credentials, NewComment, NewPost, Post, Registration, User};
use crate::state::session::AuthBackend;

#[cfg(any(test, feature = "hydrate"))]
fn endpoint(base: &str, path: &str) -> String {
    format!("{base}/api/{path}")
}

#[cfg(any(test, feature = "hydrate"))]
fn posts_endpoint(base: &str, search: &str) -> String {
    format!("{base}/api/posts?search={}", urlencoding::encode(search.trim()))
}

#[cfg(any(test, feature = "hydrate"))]
fn post_like_endpoint(base: &str, post_id: u64) -> String {
    format!("{base}/api/posts/{post_id}/like")
}

#[cfg(any(test, feature = "hydrate"))]
fn post_comments_endpoint(base: &str, post_id: u64) -> String {
    format!("{base}/api/posts/{post_id}/comments")
}

#[cfg(any(test, feature = "hydrate"))]
fn comment_like_endpoint(base: &str, comment_id: u64) -> String {
    format!("{base}/api/comments/{comment_id}/like")
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Best-effort JSON view of a response body; non-JSON text is kept as a string.
#[cfg(any(test, feature = "hydrate"))]
fn lenient_payload(text: &str) -> serde_json::Value {
    if text.trim().is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| serde_json::Value::String(text.to_owned()))
}

#[cfg(any(test, feature = "hydrate"))]
fn expect_success(status: u16, text: String) -> Result<String, ApiError> {
    if (200..300).contains(&status) {
        Ok(text)
    } else {
        Err(ApiError::Rejected { status, payload: lenient_payload(&text) })
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn decode<T: serde::de::DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Interpret a login/register response. Success bodies must be JSON or empty
/// (read as `{}`); rejection bodies are kept as-is for the caller.
#[cfg(any(test, feature = "hydrate"))]
fn auth_reply(status: u16, text: &str) -> Result<AuthReply, ApiError> {
    let body = if (200..300).contains(&status) {
        if text.trim().is_empty() {
            serde_json::Value::Object(serde_json::Map::new())
        } else {
            decode::<serde_json::Value>(text)?
        }
    } else {
        lenient_payload(text)
    };
    Ok(AuthReply { status, body })
}

#[cfg(feature = "hydrate")]
async fn send(request: Result<gloo_net::http::Request, gloo_net::Error>) -> Result<(u16, String), ApiError> {
    let request = request.map_err(|e| ApiError::Transport(e.to_string()))?;
    let resp = request.send().await.map_err(|e| ApiError::Transport(e.to_string()))?;
    let status = resp.status();
    let text = resp.text().await.map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok((status, text))
}

#[cfg(not(feature = "hydrate"))]
fn unavailable() -> ApiError {
    ApiError::Transport("not available on server".to_owned())
}

/// `gloo-net` implementation of the session manager's auth endpoints.
#[derive(Clone, Debug)]
pub struct HttpAuthBackend {
    base_url: String,
}

impl HttpAuthBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }
}

impl AuthBackend for HttpAuthBackend {
    async fn login(&self, credentials: &Credentials) -> Result<AuthReply, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let url = endpoint(&self.base_url, "login");
            let (status, text) = send(gloo_net::http::Request::post(&url).json(credentials)).await?;
            auth_reply(status, &text)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&self.base_url, credentials);
            Err(unavailable())
        }
    }

    async fn register(&self, registration: &Registration) -> Result<AuthReply, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let url = endpoint(&self.base_url, "register");
            let (status, text) = send(gloo_net::http::Request::post(&url).json(registration)).await?;
            auth_reply(status, &text)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&self.base_url, registration);
            Err(unavailable())
        }
    }

    async fn logout(&self, token: &str) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let url = endpoint(&self.base_url, "logout");
            let request = gloo_net::http::Request::post(&url)
                .header("Authorization", &bearer(token))
                .build();
            let (status, text) = send(request).await?;
            expect_success(status, text).map(|_| ())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&self.base_url, token);
            Err(unavailable())
        }
    }

    async fn me(&self, token: &str) -> Result<User, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let url = endpoint(&self.base_url, "me");
            let request = gloo_net::http::Request::get(&url)
                .header("Authorization", &bearer(token))
                .build();
            let (status, text) = send(request).await?;
            decode(&expect_success(status, text)?)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&self.base_url, token);
            Err(unavailable())
        }
    }
}

/// Fetch posts matching `search` from `GET /api/posts?search=`.
///
/// # Errors
///
/// Returns `Rejected` for non-2xx statuses and `Transport`/`Decode` for
/// network or body failures.
pub async fn fetch_posts(base: &str, token: &str, search: &str) -> Result<Vec<Post>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = posts_endpoint(base, search);
        let request = gloo_net::http::Request::get(&url)
            .header("Authorization", &bearer(token))
            .build();
        let (status, text) = send(request).await?;
        let page: super::types::PostPage = decode(&expect_success(status, text)?)?;
        Ok(page.data)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (base, token, search);
        Err(unavailable())
    }
}

/// Create a post via `POST /api/posts`.
///
/// # Errors
///
/// Returns an `ApiError` if the request fails or the server rejects it.
pub async fn create_post(base: &str, token: &str, post: &NewPost) -> Result<Post, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = endpoint(base, "posts");
        let request = gloo_net::http::Request::post(&url)
            .header("Authorization", &bearer(token))
            .json(post);
        let (status, text) = send(request).await?;
        decode(&expect_success(status, text)?)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (base, token, post);
        Err(unavailable())
    }
}

/// Toggle a like on a post via `POST /api/posts/{id}/like`.
///
/// # Errors
///
/// Returns an `ApiError` if the request fails or the server rejects it.
pub async fn like_post(base: &str, token: &str, post_id: u64) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = post_like_endpoint(base, post_id);
        let request = gloo_net::http::Request::post(&url)
            .header("Authorization", &bearer(token))
            .build();
        let (status, text) = send(request).await?;
        expect_success(status, text).map(|_| ())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (base, token, post_id);
        Err(unavailable())
    }
}

/// Add a comment to a post via `POST /api/posts/{id}/comments`.
///
/// # Errors
///
/// Returns an `ApiError` if the request fails or the server rejects it.
pub async fn add_comment(base: &str, token: &str, post_id: u64, comment: &NewComment) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = post_comments_endpoint(base, post_id);
        let request = gloo_net::http::Request::post(&url)
            .header("Authorization", &bearer(token))
            .json(comment);
        let (status, text) = send(request).await?;
        expect_success(status, text).map(|_| ())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (base, token, post_id, comment);
        Err(unavailable())
    }
}

/// Toggle a like on a comment via `POST /api/comments/{id}/like`.
///
/// # Errors
///
/// Returns an `ApiError` if the request fails or the server rejects it.
pub async fn like_comment(base: &str, token: &str, comment_id: u64) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = comment_like_endpoint(base, comment_id);
        let request = gloo_net::http::Request::post(&url)
            .header("Authorization", &bearer(token))
            .build();
        let (status, text) = send(request).await?;
        expect_success(status, text).map(|_| ())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (base, token, comment_id);
        Err(unavailable())
    }
}
