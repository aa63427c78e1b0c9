//! Post creation form.

#[cfg(test)]
#[path = "create_post_test.rs"]
mod create_post_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::types::NewPost;
use crate::state::session::AppSession;
use crate::util::auth::install_unauth_redirect;

const MISSING_FIELDS_MESSAGE: &str = "Title and content are required.";
#[cfg(feature = "hydrate")]
const CREATE_FAILED_MESSAGE: &str = "Failed to create post";

fn validate_new_post(title: &str, content: &str) -> Result<NewPost, &'static str> {
    let title = title.trim();
    let content = content.trim();
    if title.is_empty() || content.is_empty() {
        return Err(MISSING_FIELDS_MESSAGE);
    }
    Ok(NewPost { title: title.to_owned(), content: content.to_owned() })
}

fn submit_label(saving: bool) -> &'static str {
    if saving { "Saving..." } else { "Create Post" }
}

#[component]
pub fn CreatePostPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let navigate = use_navigate();

    install_unauth_redirect(session.session(), navigate.clone());

    let title = RwSignal::new(String::new());
    let content = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let saving = RwSignal::new(false);

    let navigate_cancel = navigate.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let post = match validate_new_post(&title.get_untracked(), &content.get_untracked()) {
            Ok(post) => post,
            Err(message) => {
                error.set(message.to_owned());
                return;
            }
        };
        let Some(token) = session.token() else {
            navigate("/login", NavigateOptions::default());
            return;
        };
        error.set(String::new());
        saving.set(true);

        #[cfg(feature = "hydrate")]
        {
            let session = session.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::create_post(&crate::config::api_base_url(), &token, &post).await {
                    Ok(created) => {
                        log::info!("created post {}", created.id);
                        navigate("/dashboard", NavigateOptions::default());
                    }
                    Err(e) => {
                        log::error!("create post failed: {e}");
                        error.set(CREATE_FAILED_MESSAGE.to_owned());
                        if e.is_unauthorized() {
                            session.logout().await;
                        }
                    }
                }
                saving.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (token, post);
        }
    };

    view! {
        <div class="create-page">
            <h1>"Create a New Post"</h1>
            <Show when=move || !error.get().is_empty()>
                <p class="create-page__error">{move || error.get()}</p>
            </Show>
            <form class="create-form" on:submit=on_submit>
                <input
                    class="create-form__title"
                    type="text"
                    placeholder="Post title"
                    required=true
                    prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))
                />
                <textarea
                    class="create-form__content"
                    placeholder="Post content"
                    rows="5"
                    required=true
                    prop:value=move || content.get()
                    on:input=move |ev| content.set(event_target_value(&ev))
                ></textarea>
                <div class="create-form__actions">
                    <button
                        class="btn btn--secondary"
                        type="button"
                        on:click=move |_| navigate_cancel("/dashboard", NavigateOptions::default())
                    >
                        "Cancel"
                    </button>
                    <button class="btn btn--primary" type="submit" disabled=move || saving.get()>
                        {move || submit_label(saving.get())}
                    </button>
                </div>
            </form>
        </div>
    }
}
