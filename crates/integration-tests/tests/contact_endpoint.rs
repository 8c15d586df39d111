//! Integration tests for `POST /api/save-message`.

#![allow(clippy::unwrap_used)]

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use folio_integration_tests::{
    ADMIN_ADDRESS, RecordingTransport, body_text, server_app, server_config,
};
use serde_json::{Value, json};
use tower::ServiceExt;

fn post_json(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/save-message")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn submission() -> Value {
    json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@example.com",
        "company": "Analytical Engines",
        "projectType": "ml",
        "description": "Forecasting <b>bernoulli</b> numbers",
        "timeline": "Q3"
    })
}

#[tokio::test]
async fn test_emails_sent() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("messages.txt");
    let transport = RecordingTransport::new();
    let app = server_app(server_config(&log_path, &[]), transport.clone());

    let response = app.oneshot(post_json(&submission())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "Message saved and emails sent");
    assert_eq!(transport.recipients(), vec![ADMIN_ADDRESS, "ada@example.com"]);
    assert!(!log_path.exists());

    let sent = transport.sent();
    assert_eq!(sent[0].subject, "New Client Entry");
    assert!(sent[0].html_body.contains("&lt;b&gt;bernoulli&lt;/b&gt;"));
    assert_eq!(sent[1].subject, "Thank you for reaching out to Sam Rivera!");
    assert!(sent[1].text_body.contains("Hello Ada,"));
}

#[tokio::test]
async fn test_no_acknowledgment_without_at_symbol() {
    let dir = tempfile::tempdir().unwrap();
    let transport = RecordingTransport::new();
    let app = server_app(
        server_config(&dir.path().join("messages.txt"), &[]),
        transport.clone(),
    );

    let response = app
        .oneshot(post_json(&json!({"firstName": "Ada", "email": "ada.example.com"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(transport.recipients(), vec![ADMIN_ADDRESS]);
}

#[tokio::test]
async fn test_mail_failure_saves_to_log() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("messages.txt");
    let app = server_app(server_config(&log_path, &[]), RecordingTransport::failing());
    let raw = submission();

    let response = app.oneshot(post_json(&raw)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, "Email failed, message saved to file");

    let contents = std::fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 1);
    let logged: Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(logged, raw);
    assert_eq!(lines[0], raw.to_string());
}

#[tokio::test]
async fn test_acknowledgment_failure_saves_to_log() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("messages.txt");
    let app = server_app(
        server_config(&log_path, &[]),
        RecordingTransport::failing_for("ada@example.com"),
    );

    let response = app.oneshot(post_json(&submission())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(std::fs::read_to_string(&log_path).unwrap().lines().count(), 1);
}

#[tokio::test]
async fn test_total_failure() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("missing").join("messages.txt");
    let app = server_app(server_config(&log_path, &[]), RecordingTransport::failing());

    let response = app.oneshot(post_json(&submission())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_text(response).await,
        "Error saving message and sending email"
    );
    assert!(!log_path.exists());
}

#[tokio::test]
async fn test_resubmission_appends_again() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("messages.txt");
    let app = server_app(server_config(&log_path, &[]), RecordingTransport::failing());

    for _ in 0..2 {
        let response = app.clone().oneshot(post_json(&submission())).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    assert_eq!(std::fs::read_to_string(&log_path).unwrap().lines().count(), 2);
}

#[tokio::test]
async fn test_health() {
    let dir = tempfile::tempdir().unwrap();
    let app = server_app(
        server_config(&dir.path().join("messages.txt"), &[]),
        RecordingTransport::new(),
    );

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(body_text(response).await, "ok");
}
