mod config;

use std::sync::Arc;

use anyhow::Error;
use axum::body::Body;
use axum::extract::{Json, Path, State};
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use floatchat_agents::{DashboardAgent, DashboardError};
use floatchat_observability::{AppMetrics, MetricsSnapshot};
use floatchat_storage::MemoryStore;
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub use config::DashboardConfig;

const INDEX_HTML: &str = include_str!("../assets/index.html");

#[derive(Clone)]
pub struct ApiState {
    pub agent: Arc<DashboardAgent<MemoryStore>>,
    pub store: Arc<MemoryStore>,
    pub metrics: Arc<AppMetrics>,
    pub allowed_origins: Arc<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    active_sessions: usize,
    metrics: MetricsSnapshot,
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    session_id: Option<String>,
    text: String,
}

#[derive(Debug, Serialize)]
struct SessionCreated {
    session_id: String,
    rows: usize,
    expires_at: String,
}

pub fn build_app(config: &DashboardConfig) -> Router {
    build_router(build_state(config), config.max_body_bytes)
}

pub fn build_state(config: &DashboardConfig) -> ApiState {
    let metrics = AppMetrics::shared();
    let store = Arc::new(MemoryStore::new());
    let agent = Arc::new(DashboardAgent::new(
        store.clone(),
        metrics.clone(),
        config.session_ttl,
        config.seed,
    ));

    ApiState {
        agent,
        store,
        metrics,
        allowed_origins: Arc::new(config.allowed_origins.clone()),
    }
}

pub fn build_router(state: ApiState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/v1/sessions", post(create_session))
        .route("/v1/chat", post(chat))
        .route("/v1/sessions/:id/messages", get(session_messages))
        .route("/v1/sessions/:id/overview", get(session_overview))
        .layer(build_cors_layer(&state.allowed_origins))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        active_sessions: state.store.session_count(),
        metrics: state.metrics.snapshot(),
    };
    (StatusCode::OK, Json(payload))
}

async fn create_session(State(state): State<ApiState>) -> Response {
    match state.agent.create_session().await {
        Ok(session) => (
            StatusCode::CREATED,
            Json(SessionCreated {
                session_id: session.session_id,
                rows: session.dataset.len(),
                expires_at: session.expires_at.to_rfc3339(),
            }),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

async fn chat(State(state): State<ApiState>, Json(request): Json<ChatRequest>) -> Response {
    match state
        .agent
        .handle_chat(request.session_id.as_deref(), &request.text)
        .await
    {
        Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn session_messages(State(state): State<ApiState>, Path(id): Path<String>) -> Response {
    match state.agent.transcript(&id).await {
        Ok(messages) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "session_id": id,
                "messages": messages,
            })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

async fn session_overview(State(state): State<ApiState>, Path(id): Path<String>) -> Response {
    match state.agent.overview(&id).await {
        Ok(overview) => (StatusCode::OK, Json(overview)).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn run_session_janitor(state: ApiState, every: std::time::Duration) {
    let mut ticker = tokio::time::interval(every);
    loop {
        ticker.tick().await;
        match state.agent.purge_expired_sessions().await {
            Ok(0) => {}
            Ok(removed) => info!(removed, "expired dashboard sessions purged"),
            Err(err) => error!(error = %err, "session purge failed"),
        }
    }
}

fn error_response(err: Error) -> Response {
    let (status, code) = match err.downcast_ref::<DashboardError>() {
        Some(DashboardError::SessionNotFound(_)) => (StatusCode::NOT_FOUND, "session_not_found"),
        Some(DashboardError::EmptyQuery) => (StatusCode::BAD_REQUEST, "empty_query"),
        None => {
            error!(error = %err, "dashboard request failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
        }
    };

    (
        status,
        Json(serde_json::json!({
            "error": code,
            "message": err.to_string(),
        })),
    )
        .into_response()
}

fn build_cors_layer(allowed_origins: &Arc<Vec<String>>) -> CorsLayer {
    let origins = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect::<Vec<_>>();
    let origins = if origins.is_empty() {
        vec![HeaderValue::from_static("http://localhost:8080")]
    } else {
        origins
    };

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

async fn security_headers_middleware(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;

    response.headers_mut().insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    response.headers_mut().insert(
        header::HeaderName::from_static("x-frame-options"),
        HeaderValue::from_static("DENY"),
    );
    response.headers_mut().insert(
        header::HeaderName::from_static("referrer-policy"),
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    // the page ships its script and styles inline
    response.headers_mut().insert(
        header::HeaderName::from_static("content-security-policy"),
        HeaderValue::from_static(
            "default-src 'self'; script-src 'self' 'unsafe-inline'; style-src 'self' 'unsafe-inline'; frame-ancestors 'none'; base-uri 'none'",
        ),
    );

    response
}
