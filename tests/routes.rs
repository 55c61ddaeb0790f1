//! Route-level behavior, driving the router directly.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use game_inventory::database::connection::establish_connection;
use game_inventory::server::app::create_app;

async fn app() -> Router {
    let db = establish_connection(":memory:").await.expect("store");
    create_app(db)
}

fn get(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

fn post_form(path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn read_only_pages_render() {
    let app = app().await;
    for path in [
        "/",
        "/health",
        "/games",
        "/genres",
        "/platforms",
        "/developers",
        "/publishers",
        "/game/create",
        "/genre/create",
        "/platform/create",
        "/developer/create",
        "/publisher/create",
    ] {
        let response = app.clone().oneshot(get(path)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "GET {}", path);
    }
}

#[tokio::test]
async fn malformed_identifiers_render_not_found() {
    let app = app().await;
    for path in [
        "/genre/definitely-not-an-id",
        "/game/123",
        "/developer/zz/update",
        "/publisher/zz/delete",
    ] {
        let response = app.clone().oneshot(get(path)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "GET {}", path);
    }
}

#[tokio::test]
async fn unmatched_paths_render_not_found() {
    let app = app().await;
    let response = app.oneshot(get("/inventory")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_redirects_to_the_new_detail_page() {
    let app = app().await;

    let response = app
        .clone()
        .oneshot(post_form("/genre/create", "name=Action"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("redirect target")
        .to_string();
    assert!(location.starts_with("/genre/"), "location: {}", location);

    let detail = app.clone().oneshot(get(&location)).await.unwrap();
    assert_eq!(detail.status(), StatusCode::OK);

    let list = app.clone().oneshot(get("/genres")).await.unwrap();
    let bytes = axum::body::to_bytes(list.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Action"));
}

#[tokio::test]
async fn invalid_submissions_rerender_the_form() {
    let app = app().await;

    let response = app
        .clone()
        .oneshot(post_form("/genre/create", "name="))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Name is required"));
}

#[tokio::test]
async fn delete_redirects_to_the_list() {
    let app = app().await;

    let created = app
        .clone()
        .oneshot(post_form("/platform/create", "name=Dreamcast"))
        .await
        .unwrap();
    let location = created
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("redirect target")
        .to_string();

    let response = app
        .clone()
        .oneshot(post_form(&format!("{}/delete", location), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some("/platforms")
    );

    let detail = app.clone().oneshot(get(&location)).await.unwrap();
    assert_eq!(detail.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn game_form_normalizes_a_single_bare_genre_value() {
    let app = app().await;

    let genre = app
        .clone()
        .oneshot(post_form("/genre/create", "name=Adventure"))
        .await
        .unwrap();
    let genre_url = genre
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("redirect target")
        .to_string();
    let genre_id = genre_url.rsplit('/').next().unwrap().to_string();

    let created = app
        .clone()
        .oneshot(post_form(
            "/game/create",
            &format!("name=Foo&genre={}", genre_id),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::SEE_OTHER);
    let game_url = created
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("redirect target")
        .to_string();

    let detail = app.clone().oneshot(get(&game_url)).await.unwrap();
    let bytes = axum::body::to_bytes(detail.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Adventure"));
}
