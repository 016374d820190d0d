use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header::CONTENT_TYPE};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use nms::application::news::NewsService;
use nms::cache::{CacheConfig, L0Store, NewsCache};
use nms::infra::http::{ApiState, build_router};
use nms::infra::memory::InMemoryRepositories;
use nms_api_types::ApiErrorBody;

fn router() -> Router {
    let repos = Arc::new(InMemoryRepositories::new());
    let cache: Arc<dyn NewsCache> = Arc::new(L0Store::new(&CacheConfig::default()));
    let service = NewsService::new(repos.clone(), repos.clone(), repos.clone(), repos)
        .with_cache(cache, true);
    build_router(ApiState::new(Arc::new(service)))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let request = builder.body(body).expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    (status, bytes.to_vec())
}

fn json_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("json body")
}

fn error_body(bytes: &[u8]) -> ApiErrorBody {
    serde_json::from_slice(bytes).expect("error body")
}

async fn create(app: &Router, payload: Value) -> Value {
    let (status, bytes) = send(app, Method::POST, "/api/v1/news", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    json_body(&bytes)
}

#[tokio::test]
async fn health_without_database_is_no_content() {
    let app = router();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
}

#[tokio::test]
async fn create_then_read_round_trip() {
    let app = router();
    let created = create(
        &app,
        json!({
            "id": "client-chosen",
            "title": "A",
            "body": "B",
            "comments": [{"text": "c1"}, {"text": "c2"}]
        }),
    )
    .await;

    let id = created["id"].as_str().expect("id").to_string();
    assert_ne!(id, "client-chosen");
    let comments = created["comments"].as_array().expect("comments");
    assert_eq!(comments.len(), 2);
    for comment in comments {
        assert_eq!(comment["news_id"], created["id"]);
        assert_eq!(comment["date"], created["date"]);
    }

    let (status, bytes) = send(&app, Method::GET, &format!("/api/v1/news/{id}?limit=1"), None).await;
    assert_eq!(status, StatusCode::OK);
    let read = json_body(&bytes);
    assert_eq!(read["title"], "A");
    assert_eq!(read["comments"].as_array().expect("comments").len(), 1);
}

#[tokio::test]
async fn invalid_create_lists_every_violation() {
    let app = router();
    let (status, bytes) = send(
        &app,
        Method::POST,
        "/api/v1/news",
        Some(json!({"title": "", "comments": [{"text": " "}]})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let body = error_body(&bytes);
    assert_eq!(body.error.code, "validation_failed");
    assert_eq!(
        body.error.violations,
        vec![
            "title: must not be blank".to_string(),
            "body: is required".to_string(),
            "comments[0].text: must not be blank".to_string(),
        ]
    );
}

#[tokio::test]
async fn empty_list_and_missing_news_use_distinct_codes() {
    let app = router();

    let (status, bytes) = send(&app, Method::GET, "/api/v1/news?page=0&limit=10", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_body(&bytes).error.code, "empty_result");

    let missing = uuid::Uuid::new_v4();
    let (status, bytes) = send(&app, Method::GET, &format!("/api/v1/news/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_body(&bytes).error.code, "not_found");

    create(&app, json!({"title": "A", "body": "B"})).await;
    let (status, bytes) = send(&app, Method::GET, "/api/v1/news?page=0&limit=10", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&bytes).as_array().expect("list").len(), 1);
}

#[tokio::test]
async fn malformed_arguments_are_bad_requests() {
    let app = router();

    for uri in [
        "/api/v1/news/not-a-uuid",
        "/api/v1/news/search",
        "/api/v1/news/search?term=%20%20",
        "/api/v1/news?limit=0",
        "/api/v1/news?limit=500",
    ] {
        let (status, bytes) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        let body = error_body(&bytes);
        assert_eq!(body.error.code, "invalid_argument", "{uri}");
        assert!(!body.error.violations.is_empty(), "{uri}");
    }
}

#[tokio::test]
async fn search_returns_scored_hits() {
    let app = router();
    create(&app, json!({"title": "Rust 2024", "body": "rust edition"})).await;
    create(&app, json!({"title": "Gardening", "body": "tomatoes"})).await;

    let (status, bytes) = send(&app, Method::GET, "/api/v1/news/search?term=rust", None).await;
    assert_eq!(status, StatusCode::OK);
    let hits = json_body(&bytes);
    let hits = hits.as_array().expect("hits");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["title"], "Rust 2024");
    assert!(hits[0]["score"].as_f64().expect("score") > 0.0);

    let (status, _) = send(&app, Method::GET, "/api/v1/news/search?term=python", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_uses_path_id_and_keeps_missing_fields() {
    let app = router();
    let created = create(&app, json!({"title": "A", "body": "B", "comments": [{"text": "c"}]})).await;
    let id = created["id"].as_str().expect("id").to_string();

    let (status, bytes) = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/news/{id}"),
        Some(json!({"id": uuid::Uuid::new_v4().to_string(), "title": "A2"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let updated = json_body(&bytes);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["title"], "A2");
    assert_eq!(updated["body"], "B");
    assert_eq!(updated["date"], created["date"]);
    assert!(updated.get("comments").is_none());

    let (_, bytes) = send(&app, Method::GET, &format!("/api/v1/news/{id}"), None).await;
    let read = json_body(&bytes);
    assert_eq!(read["title"], "A2");
    assert_eq!(read["comments"].as_array().expect("comments").len(), 1);
}

#[tokio::test]
async fn patch_with_oversized_title_is_unprocessable() {
    let app = router();
    let created = create(&app, json!({"title": "A", "body": "B"})).await;
    let id = created["id"].as_str().expect("id");

    let (status, bytes) = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/news/{id}"),
        Some(json!({"title": "x".repeat(256)})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_body(&bytes).error.violations.len(), 1);
}

#[tokio::test]
async fn delete_is_no_content_then_not_found() {
    let app = router();
    let created = create(&app, json!({"title": "A", "body": "B", "comments": [{"text": "c"}]})).await;
    let uri = format!("/api/v1/news/{}", created["id"].as_str().expect("id"));

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, bytes) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_body(&bytes).error.code, "not_found");
}
