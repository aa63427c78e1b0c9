//! Single comment row with author, timestamp and like action.

use leptos::prelude::*;

use super::post_card::{byline, likes_label};
use crate::net::types::Comment;

#[component]
pub fn CommentItem(comment: Comment, on_like: Callback<u64>) -> impl IntoView {
    let comment_id = comment.id;
    let meta = byline(comment.user.as_ref(), "Anonymous", &comment.created_at);

    view! {
        <li class="comment-item">
            <p class="comment-item__body">{comment.comments}</p>
            <p class="comment-item__meta">{meta}</p>
            <div class="comment-item__likes">
                <button class="btn btn--like btn--small" on:click=move |_| on_like.run(comment_id)>
                    "❤️ Like"
                </button>
                <span class="comment-item__count">{likes_label(comment.likes_count)}</span>
            </div>
        </li>
    }
}
