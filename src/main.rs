//! SSR host: renders the Leptos shell and serves the compiled WASM bundle.
//!
//! The posts API is a separate service; this binary only serves the front-end.

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::get;
    use leptos::prelude::*;
    use leptos_axum::{LeptosRoutes, generate_route_list};
    use postboard::app::{App, shell};
    use tower_http::compression::CompressionLayer;
    use tower_http::services::ServeDir;
    use tower_http::trace::TraceLayer;

    async fn healthz() -> StatusCode {
        StatusCode::OK
    }

    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let conf = get_configuration(None).expect("leptos configuration");
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;
    let routes = generate_route_list(App);

    // Serve Leptos static assets (WASM, CSS, JS) from the site root pkg directory.
    let pkg_dir = std::path::PathBuf::from(leptos_options.site_root.as_ref()).join(leptos_options.site_pkg_dir.as_ref());

    let app = Router::new()
        .route("/healthz", get(healthz))
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || shell(opts.clone())
        })
        .nest_service("/pkg", ServeDir::new(pkg_dir))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(leptos_options);

    let listener = tokio::net::TcpListener::bind(&addr).await.expect("failed to bind");
    tracing::info!(%addr, api = %postboard::config::api_base_url(), "postboard listening");
    axum::serve(listener, app.into_make_service()).await.expect("server failed");
}

#[cfg(not(feature = "ssr"))]
pub fn main() {
    // Built with `hydrate` only: the WASM bundle is loaded by the SSR host.
}
