#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! Page routes shared by the server and the web client.
//!
//! Every page the server renders is also a client route at the same path,
//! so a link followed after the client takes over lands on the page the
//! server would have rendered for it.
//!
//! Run with: cargo test --test route_contract

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use docsite::api::AppState;
use docsite::app::{Route, SitePage};
use docsite::config::SiteConfig;
use docsite::ui::page_routes;
use tower::ServiceExt;

fn app() -> Router {
    page_routes().with_state(AppState::new(SiteConfig::default()))
}

async fn get(app: Router, path: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::get(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[test]
fn every_page_is_a_client_route_at_the_same_path() {
    for page in SitePage::ALL {
        let route: Route = page
            .path()
            .parse()
            .unwrap_or_else(|_| panic!("{} is not a client route", page.path()));
        assert_eq!(route, page.route());
        assert_eq!(route.to_string(), page.path());
        assert_eq!(SitePage::from(&route), page);
    }
}

#[test]
fn page_paths_and_titles_are_distinct() {
    for (i, a) in SitePage::ALL.iter().enumerate() {
        for b in &SitePage::ALL[i + 1..] {
            assert_ne!(a.path(), b.path());
            assert_ne!(a.title(), b.title());
        }
    }
}

#[tokio::test]
async fn server_renders_every_page() {
    for page in SitePage::ALL {
        let (status, html) = get(app(), page.path()).await;

        assert_eq!(status, StatusCode::OK, "GET {}", page.path());
        assert!(
            html.contains(&format!("<title>{} - Docs</title>", page.title())),
            "GET {} rendered the wrong page",
            page.path()
        );
    }
}

#[tokio::test]
async fn theme_cookie_reaches_every_page() {
    for page in SitePage::ALL {
        let request = Request::get(page.path())
            .header("cookie", "theme=dark")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();

        assert!(
            html.contains(r#"<html lang="en" class="dark" data-theme="dark""#),
            "GET {} ignored the theme cookie",
            page.path()
        );
    }
}

#[tokio::test]
async fn unknown_paths_are_not_pages() {
    let (status, _) = get(app(), "/settings").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
