//! SSR integration tests
//!
//! Every page must server-render without panicking. The session lives in
//! the browser, so the dashboard renders its loading state on the server.

#![recursion_limit = "512"]
#![allow(clippy::unwrap_used)]

use app::config::Config;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::util::ServiceExt;

fn test_config() -> Config {
    Config {
        site_addr: "127.0.0.1:3000".parse().unwrap(),
        site_root: "target/site".to_string(),
        site_pkg_dir: "pkg".to_string(),
        output_name: "frontend".to_string(),
    }
}

fn setup_test_app() -> Router {
    server_lib::router(&test_config())
}

async fn get_page(uri: &str) -> (StatusCode, String) {
    get_page_from(setup_test_app(), uri).await
}

async fn get_page_from(app: Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

#[tokio::test]
async fn test_home_page_ssr_no_panic() {
    let (status, html) = get_page("/").await;
    assert_eq!(status, StatusCode::OK, "Expected 200 OK for home page SSR");
    assert!(html.contains("Your ride, your way"));
    assert!(html.contains("Frequently asked questions"));
}

#[tokio::test]
async fn test_header_has_mobile_menu_toggle() {
    let (_, html) = get_page("/about").await;
    assert!(html.contains("aria-label=\"Toggle menu\""));
    assert!(html.contains("href=\"/city\""));
}

#[tokio::test]
async fn test_marketing_pages_render() {
    for (uri, marker) in [
        ("/about", "Our story"),
        ("/contact", "Get in touch"),
        ("/become-a-driver", "Become a driver"),
    ] {
        let (status, html) = get_page(uri).await;
        assert_eq!(status, StatusCode::OK, "Expected 200 OK for {uri}");
        assert!(html.contains(marker), "{uri} should contain {marker:?}");
    }
}

#[tokio::test]
async fn test_auth_pages_render_forms() {
    let (status, html) = get_page("/sign-in").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("type=\"password\""));

    let (status, html) = get_page("/sign-up").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Create an account"));
    assert!(html.contains("Confirm password"));
}

#[tokio::test]
async fn test_become_driver_asks_anonymous_visitors_to_sign_in() {
    let (_, html) = get_page("/become-a-driver").await;
    assert!(html.contains("Sign in to your account to apply."));
}

#[tokio::test]
async fn test_city_booking_asks_anonymous_visitors_to_sign_in() {
    let (status, html) = get_page("/city").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Book your trip"));
    assert!(html.contains("Sign in to your account to request a trip."));
}

#[tokio::test]
async fn test_stylesheet_follows_output_name() {
    let (_, html) = get_page("/").await;
    assert!(html.contains("href=\"/pkg/frontend.css\""));

    let config = Config {
        site_pkg_dir: "assets".to_string(),
        output_name: "youride".to_string(),
        ..test_config()
    };
    let (status, html) = get_page_from(server_lib::router(&config), "/about").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("href=\"/assets/youride.css\""));
}

#[tokio::test]
async fn test_dashboard_renders_loading_state_on_server() {
    for uri in ["/dashboard", "/dashboard/users", "/dashboard/request-trip"] {
        let (status, html) = get_page(uri).await;
        assert_eq!(status, StatusCode::OK, "Expected 200 OK for {uri}");
        assert!(html.contains("Loading..."), "{uri} should render the loading state");
    }
}

#[tokio::test]
async fn test_unknown_path_renders_not_found_view() {
    let (_, html) = get_page("/no/such/page").await;
    assert!(html.contains("The page you are looking for does not exist."));
}

#[tokio::test]
async fn test_missing_asset_is_a_plain_404() {
    let (status, _) = get_page("/pkg/missing.wasm").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
