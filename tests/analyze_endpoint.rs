//! End-to-end tests for the upload endpoint: router, extraction, the real
//! LLM client and a mock model server on a loopback port.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{Request, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower::ServiceExt;

use postcraft::analysis::Analyzer;
use postcraft::config::ServerConfig;
use postcraft::llm::{LlmClient, LlmConfig, LlmProvider};
use postcraft::ocr::TextExtractor;
use postcraft::server::{create_router, AppState};
use postcraft::services::AnalyzeService;

const BOUNDARY: &str = "integration-boundary";

/// Serve canned Gemini replies, counting requests.
async fn spawn_model(status: StatusCode, text: &'static str) -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let router = Router::new()
        .route(
            "/v1beta/models/:action",
            post(
                move |State(hits): State<Arc<AtomicUsize>>,
                      Path(_action): Path<String>,
                      Json(body): Json<Value>| async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    let prompt = body["contents"][0]["parts"][0]["text"]
                        .as_str()
                        .unwrap_or_default()
                        .to_string();
                    assert!(prompt.contains("Hello world"), "prompt: {prompt}");
                    let reply = json!({
                        "candidates": [{"content": {"parts": [{"text": text}]}}]
                    });
                    (status, Json(reply))
                },
            ),
        )
        .with_state(hits.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{}", addr), hits)
}

fn app_for(endpoint: &str) -> Router {
    let config = LlmConfig::for_provider(LlmProvider::Gemini)
        .with_endpoint(endpoint)
        .with_api_key("test-key");
    let client = LlmClient::new(config).unwrap();
    let service = AnalyzeService::new(TextExtractor::default(), Analyzer::new(Arc::new(client)));
    create_router(AppState::new(service), &ServerConfig::default())
}

fn upload(filename: &str, content: &[u8]) -> Request<Body> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: text/plain\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/analyze/")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn analyzes_text_upload() {
    let (endpoint, hits) = spawn_model(
        StatusCode::OK,
        "```json\n{\"analysis\": \"Short greeting.\", \"recommendations\": {\"seo_keywords\": [\"hello\", \"world\"], \"tone\": \"warmer\"}}\n```",
    )
    .await;

    let response = app_for(&endpoint)
        .oneshot(upload("greeting.txt", b"Hello world"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    assert_eq!(json["extracted_text"], "Hello world");
    assert_eq!(json["analysis"], "Short greeting.");
    assert_eq!(
        json["recommendations"],
        "Seo Keywords: ['hello', 'world']\nTone: warmer"
    );
    assert_eq!(json["rewrite"], "No rewrite provided.");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn rejects_unsupported_type_without_calling_model() {
    let (endpoint, hits) = spawn_model(StatusCode::OK, "{}").await;

    let response = app_for(&endpoint)
        .oneshot(upload("slides.pptx", b"Hello world"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["error"], "Unsupported file type");
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn blank_upload_is_unprocessable() {
    let (endpoint, hits) = spawn_model(StatusCode::OK, "{}").await;

    let response = app_for(&endpoint)
        .oneshot(upload("empty.txt", b"   \n"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        read_json(response).await["error"],
        "No text could be extracted from file"
    );
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn non_json_reply_is_server_error() {
    let (endpoint, _hits) = spawn_model(StatusCode::OK, "I think this post is great!").await;

    let response = app_for(&endpoint)
        .oneshot(upload("greeting.txt", b"Hello world"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        read_json(response).await["error"],
        "AI returned invalid JSON. Please try again."
    );
}

#[tokio::test]
async fn model_http_error_is_server_error() {
    let (endpoint, _hits) = spawn_model(StatusCode::TOO_MANY_REQUESTS, "quota").await;

    let response = app_for(&endpoint)
        .oneshot(upload("greeting.txt", b"Hello world"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        read_json(response).await["error"],
        "AI service request failed. Please try again."
    );
}

#[tokio::test]
async fn corrupt_pdf_is_internal_error() {
    let (endpoint, hits) = spawn_model(StatusCode::OK, "{}").await;

    let response = app_for(&endpoint)
        .oneshot(upload("report.pdf", b"%PDF-1.4 not really a pdf"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = read_json(response).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Internal server error: PDF extraction failed"));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}
