//! Dashboard page: searchable post feed with likes and comments.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. The post list is a
//! `LocalResource` keyed on the session token and the submitted search query;
//! every like/comment is followed by a full refetch. A 401 from the feed
//! means the stored token went stale, so the session is dropped and the
//! redirect guard takes over.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::post_card::PostCard;
use crate::config::api_base_url;
use crate::net::api;
use crate::net::error::{ApiError, ErrorKind};
use crate::net::types::Post;
#[cfg(feature = "hydrate")]
use crate::net::types::NewComment;
use crate::state::feed::{FeedAction, FeedState};
#[cfg(feature = "hydrate")]
use crate::state::feed::mutation_notice;
use crate::state::session::AppSession;
use crate::util::auth::install_unauth_redirect;

type FeedResult = Result<Vec<Post>, ApiError>;

fn load_error_message(err: &ApiError) -> &'static str {
    match err.kind() {
        ErrorKind::Rejected => "Could not load posts.",
        ErrorKind::Network => "Could not reach the server.",
    }
}

/// True when the feed result means the token is no longer accepted.
fn is_stale_session(result: Option<&FeedResult>) -> bool {
    matches!(result, Some(Err(err)) if err.is_unauthorized())
}

async fn load_posts(token: Option<String>, query: String) -> FeedResult {
    let Some(token) = token else {
        return Ok(Vec::new());
    };
    api::fetch_posts(&api_base_url(), &token, &query).await
}

#[cfg(feature = "hydrate")]
async fn apply_action(token: &str, action: FeedAction, target: u64, comment: Option<String>) -> Result<(), ApiError> {
    let base = api_base_url();
    match (action, comment) {
        (FeedAction::LikePost, _) => api::like_post(&base, token, target).await,
        (FeedAction::LikeComment, _) => api::like_comment(&base, token, target).await,
        (FeedAction::Comment, Some(comments)) => api::add_comment(&base, token, target, &NewComment { comments }).await,
        (FeedAction::Comment, None) => Ok(()),
    }
}

/// Run a like/comment write, surface any failure, then refetch the feed.
fn dispatch(
    session: &AppSession,
    feed: RwSignal<FeedState>,
    posts: LocalResource<FeedResult>,
    action: FeedAction,
    target: u64,
) {
    let Some(token) = session.token() else {
        return;
    };
    let comment = match action {
        FeedAction::Comment => match feed.with_untracked(|f| f.sendable_draft(target)) {
            Some(text) => Some(text),
            None => return,
        },
        FeedAction::LikePost | FeedAction::LikeComment => None,
    };
    feed.update(|f| f.notice = None);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match apply_action(&token, action, target, comment).await {
            Ok(()) => {
                if action == FeedAction::Comment {
                    feed.update(|f| f.clear_draft(target));
                }
            }
            Err(e) => {
                log::error!("{action:?} on {target} failed: {e}");
                feed.update(|f| f.notice = Some(mutation_notice(action, &e)));
            }
        }
        posts.refetch();
    });

    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, comment, posts);
    }
}

/// Dashboard page: post feed, search, likes and comments.
/// Redirects to `/login` if the user is not authenticated.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let state = session.session();
    let navigate = use_navigate();

    install_unauth_redirect(state, navigate.clone());

    let feed = RwSignal::new(FeedState::default());
    let token = Memo::new(move |_| state.with(|s| s.token.clone()));
    let query = Memo::new(move |_| feed.with(|f| f.query.clone()));

    let posts = LocalResource::new(move || load_posts(token.get(), query.get()));

    let session_for_stale = session.clone();
    Effect::new(move || {
        if is_stale_session(posts.get().as_ref()) {
            log::info!("feed rejected token; signing out");
            let session = session_for_stale.clone();
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move { session.logout().await });
            #[cfg(not(feature = "hydrate"))]
            let _ = session;
        }
    });

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let before = query.get_untracked();
        feed.update(FeedState::submit_search);
        if feed.with_untracked(|f| f.query == before) {
            posts.refetch();
        }
    };

    let on_like = Callback::new({
        let session = session.clone();
        move |post_id| dispatch(&session, feed, posts, FeedAction::LikePost, post_id)
    });
    let on_like_comment = Callback::new({
        let session = session.clone();
        move |comment_id| dispatch(&session, feed, posts, FeedAction::LikeComment, comment_id)
    });
    let on_comment = Callback::new({
        let session = session.clone();
        move |post_id| dispatch(&session, feed, posts, FeedAction::Comment, post_id)
    });

    let navigate_create = navigate.clone();
    let on_logout = move |_| {
        let session = session.clone();
        let navigate = navigate.clone();
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            session.logout().await;
            navigate("/login", NavigateOptions::default());
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (session, navigate);
    };

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header">
                <h1>"Dashboard"</h1>
                <div class="dashboard-page__actions">
                    <button
                        class="btn btn--create"
                        on:click=move |_| navigate_create("/dashboard/create", NavigateOptions::default())
                    >
                        "+ New Post"
                    </button>
                    <button class="btn btn--primary" on:click=on_logout>
                        "Logout"
                    </button>
                </div>
            </header>

            <form class="search-form" on:submit=on_search>
                <input
                    class="search-form__input"
                    type="text"
                    placeholder="Search posts..."
                    prop:value=move || feed.with(|f| f.search_input.clone())
                    on:input=move |ev| feed.update(|f| f.search_input = event_target_value(&ev))
                />
                <button class="btn btn--primary" type="submit">
                    "Search"
                </button>
            </form>

            <Show when=move || feed.with(|f| f.notice.is_some())>
                <p class="dashboard-page__notice">{move || feed.with(|f| f.notice.clone().unwrap_or_default())}</p>
            </Show>

            <Suspense fallback=move || view! { <p class="dashboard-page__loading">"Loading posts..."</p> }>
                {move || {
                    posts
                        .get()
                        .map(|result| match result {
                            Ok(list) if list.is_empty() => {
                                view! { <p class="dashboard-page__empty">"No posts found."</p> }.into_any()
                            }
                            Ok(list) => {
                                view! {
                                    <div class="dashboard-page__posts">
                                        {list
                                            .into_iter()
                                            .map(|post| {
                                                view! {
                                                    <PostCard
                                                        post=post
                                                        feed=feed
                                                        on_like=on_like
                                                        on_like_comment=on_like_comment
                                                        on_comment=on_comment
                                                    />
                                                }
                                            })
                                            .collect::<Vec<_>>()}
                                    </div>
                                }
                                    .into_any()
                            }
                            Err(err) => {
                                view! { <p class="dashboard-page__error">{load_error_message(&err)}</p> }.into_any()
                            }
                        })
                }}
            </Suspense>
        </div>
    }
}
