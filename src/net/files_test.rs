use super::*;
use crate::net::test_helpers::serve;

use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

/// One multipart field as the mock backend saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SeenField {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    data: Vec<u8>,
}

type Seen = Arc<Mutex<Vec<(String, Vec<SeenField>)>>>;

async fn fetch_asset(Path(title): Path<String>) -> Result<([(header::HeaderName, &'static str); 1], Vec<u8>), StatusCode> {
    if title == "missing" {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(([(header::CONTENT_TYPE, "image/png")], format!("png:{title}").into_bytes()))
}

async fn record_upload(
    State(seen): State<Seen>,
    Path(title): Path<String>,
    mut multipart: Multipart,
) -> Json<serde_json::Value> {
    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_owned();
        let file_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);
        let data = field.bytes().await.unwrap().to_vec();
        fields.push(SeenField { name, file_name, content_type, data });
    }
    seen.lock().unwrap().push((title.clone(), fields));
    Json(json!({ "message": "Image updated successfully", "url": format!("/files/{title}") }))
}

fn file_router(seen: Seen) -> Router {
    Router::new()
        .route("/files/{title}", get(fetch_asset).put(record_upload))
        .with_state(seen)
}

fn upload_file() -> UploadFile {
    UploadFile { file_name: "hero.png".into(), bytes: vec![1, 2, 3, 4], mime_type: "image/png".into() }
}

// =============================================================
// fetch_by_title
// =============================================================

#[tokio::test]
async fn fetch_by_title_returns_bytes_and_mime_type() {
    let config = serve(file_router(Seen::default())).await;
    let store = HttpFileStore::new(&config).unwrap();

    let asset = store.fetch_by_title("starteryou-v2").await.unwrap();
    assert_eq!(asset.title, "starteryou-v2");
    assert_eq!(asset.bytes, b"png:starteryou-v2");
    assert_eq!(asset.mime_type, "image/png");
}

#[tokio::test]
async fn fetch_by_title_not_found_is_an_error() {
    let config = serve(file_router(Seen::default())).await;
    let store = HttpFileStore::new(&config).unwrap();

    let err = store.fetch_by_title("missing").await.unwrap_err();
    assert!(matches!(err, NetworkError::Status { status: 404 }));
}

// =============================================================
// upload
// =============================================================

#[tokio::test]
async fn upload_sends_file_and_title_fields() {
    let seen = Seen::default();
    let config = serve(file_router(seen.clone())).await;
    let store = HttpFileStore::new(&config).unwrap();

    let ack = store.upload("BesstBudy2", &upload_file()).await.unwrap();
    assert_eq!(ack.message, "Image updated successfully");
    assert_eq!(ack.url.as_deref(), Some("/files/BesstBudy2"));

    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    let (title, fields) = &seen[0];
    assert_eq!(title, "BesstBudy2");
    assert_eq!(fields.len(), 2);
    assert_eq!(
        fields[0],
        SeenField {
            name: "file".into(),
            file_name: Some("hero.png".into()),
            content_type: Some("image/png".into()),
            data: vec![1, 2, 3, 4],
        }
    );
    assert_eq!(fields[1].name, "title");
    assert_eq!(fields[1].file_name, None);
    assert_eq!(fields[1].data, b"BesstBudy2");
}

#[tokio::test]
async fn upload_non_json_ack_is_a_decode_error() {
    let app = Router::new().route("/files/{title}", axum::routing::put(|| async { "ok" }));
    let config = serve(app).await;
    let store = HttpFileStore::new(&config).unwrap();

    let err = store.upload("hero", &upload_file()).await.unwrap_err();
    assert!(matches!(err, NetworkError::Decode(_)));
}

#[tokio::test]
async fn upload_rejected_status_is_an_error() {
    let app = Router::new().route(
        "/files/{title}",
        axum::routing::put(|| async { StatusCode::PAYLOAD_TOO_LARGE }),
    );
    let config = serve(app).await;
    let store = HttpFileStore::new(&config).unwrap();

    let err = store.upload("hero", &upload_file()).await.unwrap_err();
    assert!(matches!(err, NetworkError::Status { status: 413 }));
}
