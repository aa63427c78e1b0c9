//! Post card for the dashboard feed.
//!
//! DESIGN
//! ======
//! The card is stateless apart from reading its comment draft out of the
//! shared `FeedState`; likes and comment submission are delegated to the
//! page through callbacks keyed by id.

#[cfg(test)]
#[path = "post_card_test.rs"]
mod post_card_test;

use leptos::prelude::*;

use super::comment_item::CommentItem;
use crate::net::types::{Post, User};
use crate::state::feed::FeedState;
use crate::util::datetime::format_timestamp;

/// `by {name} • {timestamp}`, using `fallback` when the author is unknown.
pub(crate) fn byline(user: Option<&User>, fallback: &str, created_at: &str) -> String {
    let name = user.map(|u| u.name.as_str()).filter(|n| !n.is_empty()).unwrap_or(fallback);
    format!("by {name} • {}", format_timestamp(created_at))
}

pub(crate) fn likes_label(count: u64) -> String {
    format!("{count} likes")
}

#[component]
pub fn PostCard(
    post: Post,
    feed: RwSignal<FeedState>,
    on_like: Callback<u64>,
    on_like_comment: Callback<u64>,
    on_comment: Callback<u64>,
) -> impl IntoView {
    let post_id = post.id;
    let meta = byline(post.user.as_ref(), "Unknown", &post.created_at);
    let comments = post.comments;

    let comment_list = if comments.is_empty() {
        view! { <p class="post-card__empty">"No comments yet"</p> }.into_any()
    } else {
        view! {
            <ul class="comment-list">
                {comments
                    .into_iter()
                    .map(|c| view! { <CommentItem comment=c on_like=on_like_comment/> })
                    .collect::<Vec<_>>()}
            </ul>
        }
            .into_any()
    };

    view! {
        <article class="post-card">
            <h2 class="post-card__title">{post.title}</h2>
            <p class="post-card__content">{post.content}</p>
            <p class="post-card__meta">{meta}</p>

            <div class="post-card__likes">
                <button class="btn btn--like" on:click=move |_| on_like.run(post_id)>
                    "❤️ Like"
                </button>
                <span>{likes_label(post.likes_count)}</span>
            </div>

            <section class="post-card__comments">
                <h3>"Comments"</h3>
                {comment_list}
                <div class="comment-form">
                    <input
                        class="comment-form__input"
                        type="text"
                        placeholder="Write a comment..."
                        prop:value=move || feed.with(|f| f.draft(post_id))
                        on:input=move |ev| feed.update(|f| f.set_draft(post_id, event_target_value(&ev)))
                        on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                ev.prevent_default();
                                on_comment.run(post_id);
                            }
                        }
                    />
                    <button class="btn btn--send" on:click=move |_| on_comment.run(post_id)>
                        "Send"
                    </button>
                </div>
            </section>
        </article>
    }
}
