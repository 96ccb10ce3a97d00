use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use floatchat_dashboard::{build_app, DashboardConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    let config = DashboardConfig {
        seed: Some(2024),
        ..DashboardConfig::default()
    };
    build_app(&config)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };
    (status, parsed)
}

fn post_json(uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn new_session(app: &Router) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/sessions")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["rows"], 2135);
    body["session_id"].as_str().unwrap().to_string()
}

async fn ask(app: &Router, session_id: &str, text: &str) -> Value {
    let (status, body) = send(
        app,
        post_json("/v1/chat", json!({ "session_id": session_id, "text": text })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body
}

#[tokio::test]
async fn health_reports_metrics() {
    let app = app();
    let (status, body) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["metrics"].get("requests_total").is_some());
}

#[tokio::test]
async fn index_serves_the_page() {
    let app = app();
    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("content-security-policy").is_some());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("Ocean Data Overview"));
}

#[tokio::test]
async fn data_queries_return_plots() {
    let app = app();
    let session_id = new_session(&app).await;

    for (text, title) in [
        ("show me temperature", "Recent Ocean Temperature Measurements"),
        ("what is the salinity", "Recent Ocean Salinity Measurements"),
        ("temperature in the indian ocean", "Temperature Measurements in Indian Ocean"),
        ("arctic", "Recent ARGO Float Measurements in Arctic Ocean"),
    ] {
        let body = ask(&app, &session_id, text).await;
        assert_eq!(body["kind"], "plot", "{text}");
        assert_eq!(body["plot"]["title"], title);
        assert_eq!(body["session_id"], session_id.as_str());
    }

    let body = ask(&app, &session_id, "pick an argo float").await;
    assert_eq!(body["kind"], "plot");
    assert_eq!(body["plot"]["series"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn greeting_and_help_are_text() {
    let app = app();
    let session_id = new_session(&app).await;

    let body = ask(&app, &session_id, "hello").await;
    assert_eq!(body["kind"], "text");
    assert!(body.get("plot").is_none());

    let body = ask(&app, &session_id, "what can you do").await;
    assert!(body["content"]
        .as_str()
        .unwrap()
        .starts_with("I can help you explore ARGO ocean data."));
}

#[tokio::test]
async fn chat_without_session_creates_one() {
    let app = app();
    let (status, body) = send(&app, post_json("/v1/chat", json!({ "text": "salinity" }))).await;

    assert_eq!(status, StatusCode::OK);
    let session_id = body["session_id"].as_str().unwrap();
    let (status, transcript) = send(&app, get(&format!("/v1/sessions/{session_id}/messages"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(transcript["messages"].as_array().unwrap().len(), 2);
    assert_eq!(transcript["messages"][0]["role"], "user");
    assert_eq!(transcript["messages"][1]["role"], "assistant");
}

#[tokio::test]
async fn overview_has_three_plots() {
    let app = app();
    let session_id = new_session(&app).await;
    let (status, body) = send(&app, get(&format!("/v1/sessions/{session_id}/overview"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["global_view"]["kind"], "scatter_geo");
    assert_eq!(body["temperature"]["kind"], "bar");
    assert_eq!(body["salinity"]["series"][0]["points"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn unknown_session_is_404() {
    let app = app();

    let (status, body) = send(&app, get("/v1/sessions/missing/messages")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "session_not_found");

    let (status, _) = send(&app, get("/v1/sessions/missing/overview")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        post_json("/v1/chat", json!({ "session_id": "missing", "text": "hello" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_text_is_400() {
    let app = app();
    let (status, body) = send(&app, post_json("/v1/chat", json!({ "text": "   " }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "empty_query");
}

#[tokio::test]
async fn transcript_is_capped() {
    let app = app();
    let session_id = new_session(&app).await;
    for _ in 0..30 {
        ask(&app, &session_id, "salinity in the atlantic").await;
    }

    let (status, transcript) = send(&app, get(&format!("/v1/sessions/{session_id}/messages"))).await;
    assert_eq!(status, StatusCode::OK);
    let messages = transcript["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 40);
    assert_eq!(messages[0]["role"], "user");
}
