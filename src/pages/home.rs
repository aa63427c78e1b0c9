//! Root route: forwards to the dashboard or the login page.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::session::AppSession;
use crate::util::auth::landing_route;

#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<AppSession>().session();
    let navigate = use_navigate();

    Effect::new(move || {
        if let Some(target) = landing_route(&session.get()) {
            navigate(target, NavigateOptions::default());
        }
    });

    view! { <div class="home-page">"Loading..."</div> }
}
