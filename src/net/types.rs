//! Wire DTOs for the posts REST API.
//!
//! DESIGN
//! ======
//! Response types are lenient (`#[serde(default)]` on optional collections and
//! counters) because nested user objects and eager-loaded relations are not
//! always present in every payload. Request bodies mirror the server's field
//! names exactly.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Authenticated user profile as returned by `/api/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    /// Nested authors on posts and comments may omit the email.
    #[serde(default)]
    pub email: String,
}

/// A comment attached to a post.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    /// Comment body. The server names this field in the plural.
    pub comments: String,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub likes_count: u64,
}

/// A post with its author, like count and eager-loaded comments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Envelope returned by `GET /api/posts`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PostPage {
    #[serde(default)]
    pub data: Vec<Post>,
}

/// Body of `POST /api/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Body of `POST /api/posts`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
}

/// Body of `POST /api/posts/{id}/comments`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewComment {
    pub comments: String,
}

/// Raw reply from the login/register endpoints.
///
/// The body is kept untyped so a rejection can hand the server's validation
/// payload back to the caller unchanged.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthReply {
    pub status: u16,
    pub body: serde_json::Value,
}

impl AuthReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Non-empty `access_token` carried by the body, if any.
    pub fn access_token(&self) -> Option<&str> {
        self.body
            .get("access_token")
            .and_then(serde_json::Value::as_str)
            .filter(|token| !token.is_empty())
    }
}
