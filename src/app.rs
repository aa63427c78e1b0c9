//! Root application component with routing and the session context.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::config::api_base_url;
use crate::net::api::HttpAuthBackend;
use crate::pages::{
    create_post::CreatePostPage, dashboard::DashboardPage, home::HomePage, login::LoginPage,
    register::RegisterPage,
};
use crate::state::session::AppSession;
use crate::util::storage::BrowserTokenStore;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Owns the single session manager, provides it to every route, and restores
/// any stored token once the client hydrates.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = AppSession::new(HttpAuthBackend::new(api_base_url()), BrowserTokenStore);
    provide_context(session.clone());

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move { session.initialize().await });
    #[cfg(not(feature = "hydrate"))]
    let _ = session;

    view! {
        <Stylesheet id="leptos" href="/pkg/postboard.css"/>
        <Title text="Postboard"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("register") view=RegisterPage/>
                <Route path=StaticSegment("dashboard") view=DashboardPage/>
                <Route path=(StaticSegment("dashboard"), StaticSegment("create")) view=CreatePostPage/>
            </Routes>
        </Router>
    }
}
