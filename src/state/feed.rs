//! Dashboard feed state: search query, per-post comment drafts and the
//! mutation notice.
//!
//! DESIGN
//! ======
//! Likes, comments and searches never patch the list locally; every mutation
//! is followed by a full refetch. Failed mutations are surfaced through
//! `notice` instead of being dropped.

#[cfg(test)]
#[path = "feed_test.rs"]
mod feed_test;

use std::collections::HashMap;

use crate::net::error::{ApiError, ErrorKind};

/// A write the dashboard performs against a post or comment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedAction {
    LikePost,
    LikeComment,
    Comment,
}

impl FeedAction {
    fn label(self) -> &'static str {
        match self {
            Self::LikePost => "like the post",
            Self::LikeComment => "like the comment",
            Self::Comment => "send the comment",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeedState {
    /// Text currently in the search box.
    pub search_input: String,
    /// Query the post list was last fetched with.
    pub query: String,
    /// Unsent comment text keyed by post id.
    pub drafts: HashMap<u64, String>,
    pub notice: Option<String>,
}

impl FeedState {
    /// Commit the search box contents as the active query.
    pub fn submit_search(&mut self) {
        self.query = self.search_input.trim().to_owned();
    }

    pub fn draft(&self, post_id: u64) -> String {
        self.drafts.get(&post_id).cloned().unwrap_or_default()
    }

    pub fn set_draft(&mut self, post_id: u64, text: String) {
        self.drafts.insert(post_id, text);
    }

    /// Trimmed draft for `post_id`, or `None` when there is nothing to send.
    pub fn sendable_draft(&self, post_id: u64) -> Option<String> {
        self.drafts
            .get(&post_id)
            .map(|text| text.trim())
            .filter(|text| !text.is_empty())
            .map(str::to_owned)
    }

    pub fn clear_draft(&mut self, post_id: u64) {
        self.drafts.remove(&post_id);
    }
}

/// User-facing notice for a failed dashboard write.
pub fn mutation_notice(action: FeedAction, err: &ApiError) -> String {
    match err.kind() {
        ErrorKind::Rejected => format!("Could not {}: the server refused the request.", action.label()),
        ErrorKind::Network => format!("Could not {}: network error.", action.label()),
    }
}
