use super::*;
use crate::net::test_helpers::{closed_port, serve};

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

type Recorded = Arc<Mutex<Vec<Value>>>;

fn echo_router() -> Router {
    Router::new().route(
        "/api/text",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            let component = params.get("component").cloned().unwrap_or_default();
            Json(json!({ "content": format!("title for {component}"), "paragraphs": ["Line1", "Line2"] }))
        }),
    )
}

fn recording_router(recorded: Recorded) -> Router {
    Router::new()
        .route(
            "/api/text",
            get(|| async { StatusCode::OK }).put(|State(rec): State<Recorded>, Json(body): Json<Value>| async move {
                rec.lock().unwrap().push(body);
                Json(json!({ "message": "saved" }))
            }),
        )
        .with_state(recorded)
}

// =============================================================
// fetch
// =============================================================

#[tokio::test]
async fn fetch_sends_component_query_and_parses_record() {
    let config = serve(echo_router()).await;
    let store = HttpContentStore::new(&config).unwrap();

    let fetched = store.fetch("HeroAbout").await.unwrap().unwrap();
    assert_eq!(fetched.content.as_deref(), Some("title for HeroAbout"));
    assert_eq!(fetched.paragraphs, Some(vec!["Line1".to_owned(), "Line2".to_owned()]));
}

#[tokio::test]
async fn fetch_empty_body_is_no_record() {
    let config = serve(recording_router(Recorded::default())).await;
    let store = HttpContentStore::new(&config).unwrap();

    assert_eq!(store.fetch("HeroAbout").await.unwrap(), None);
}

#[tokio::test]
async fn fetch_non_success_status_is_an_error() {
    let app = Router::new().route("/api/text", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
    let config = serve(app).await;
    let store = HttpContentStore::new(&config).unwrap();

    let err = store.fetch("HeroAbout").await.unwrap_err();
    assert!(matches!(err, NetworkError::Status { status: 500 }));
}

#[tokio::test]
async fn fetch_invalid_json_is_a_decode_error() {
    let app = Router::new().route("/api/text", get(|| async { "<html>oops</html>" }));
    let config = serve(app).await;
    let store = HttpContentStore::new(&config).unwrap();

    let err = store.fetch("HeroAbout").await.unwrap_err();
    assert!(matches!(err, NetworkError::Decode(_)));
}

#[tokio::test]
async fn fetch_unreachable_backend_is_a_request_error() {
    let config = closed_port().await;
    let store = HttpContentStore::new(&config).unwrap();

    let err = store.fetch("HeroAbout").await.unwrap_err();
    assert!(matches!(err, NetworkError::Request(_)));
}

// =============================================================
// save
// =============================================================

#[tokio::test]
async fn save_puts_record_as_json() {
    let recorded = Recorded::default();
    let config = serve(recording_router(recorded.clone())).await;
    let store = HttpContentStore::new(&config).unwrap();

    let record = ContentRecord::for_save("X", "World", "Line1\nLine2");
    store.save(&record).await.unwrap();

    let bodies = recorded.lock().unwrap().clone();
    assert_eq!(bodies, vec![json!({ "component": "X", "content": "World", "paragraphs": ["Line1\nLine2"] })]);
}

#[tokio::test]
async fn save_rejected_status_is_an_error() {
    let app = Router::new().route("/api/text", axum::routing::put(|| async { StatusCode::BAD_REQUEST }));
    let config = serve(app).await;
    let store = HttpContentStore::new(&config).unwrap();

    let err = store
        .save(&ContentRecord::for_save("X", "T", "P"))
        .await
        .unwrap_err();
    assert!(matches!(err, NetworkError::Status { status: 400 }));
    assert_eq!(err.to_string(), "unexpected response status: 400");
}
