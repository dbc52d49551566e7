//! HTTP surface of the YouRide site.
//!
//! Shared by the binary and the integration tests: the HTML shell and the
//! axum router that server-renders every page and serves the wasm bundle.

#![recursion_limit = "512"]

use app::components::App;
use app::config::Config;
use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::services::ServeDir;

pub fn leptos_options(config: &Config) -> LeptosOptions {
    LeptosOptions::builder()
        .output_name(config.output_name.clone())
        .site_pkg_dir(config.site_pkg_dir.clone())
        .site_root(config.site_root.clone())
        .site_addr(config.site_addr)
        .build()
}

/// cargo-leptos writes the stylesheet next to the wasm bundle, named after the output.
pub fn stylesheet_href(options: &LeptosOptions) -> String {
    format!("/{}/{}.css", options.site_pkg_dir, options.output_name)
}

pub fn shell(options: LeptosOptions) -> impl IntoView {
    use leptos::hydration::{AutoReload, HydrationScripts};
    use leptos_meta::MetaTags;
    let stylesheet = stylesheet_href(&options);
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <link rel="stylesheet" href=stylesheet/>
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

pub fn router(config: &Config) -> Router {
    let options = leptos_options(config);
    let routes = generate_route_list(App);

    Router::new()
        .leptos_routes(&options, routes, {
            let options = options.clone();
            move || shell(options.clone())
        })
        .fallback(file_and_error_handler)
        .nest_service(&format!("/{}", config.site_pkg_dir), ServeDir::new(config.pkg_path()))
        .with_state(options)
}

/// Unknown pages go through the client router so it can show its 404 view.
async fn file_and_error_handler(State(options): State<LeptosOptions>, req: Request<Body>) -> Response {
    if req.uri().path().starts_with(&format!("/{}/", options.site_pkg_dir)) {
        return (StatusCode::NOT_FOUND, Html("<h1>404 Not Found</h1>")).into_response();
    }

    let handler = leptos_axum::render_app_to_stream(move || shell(options.clone()));
    handler(req).await.into_response()
}
