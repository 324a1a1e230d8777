//! REST endpoints for the triage service.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::triage::processor::TriageProcessor;
use crate::triage::types::TriageRequest;

/// Shared state for the triage routes.
#[derive(Clone)]
pub struct TriageRouteState {
    pub processor: Arc<TriageProcessor>,
}

/// POST /api/triage
///
/// Runs the full pipeline and returns the finished record. Malformed JSON
/// is the caller's fault (400); everything else that goes wrong is an
/// upstream or storage failure (502, details logged but not leaked).
async fn post_triage(State(state): State<TriageRouteState>, body: Bytes) -> impl IntoResponse {
    let request: TriageRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({"error": "Invalid JSON"})),
            )
                .into_response();
        }
    };

    match state.processor.triage(request).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => {
            error!(error = %e, "Triage request failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({"error": "triage failed"})),
            )
                .into_response()
        }
    }
}

/// GET /api/health
async fn get_health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

/// Build the triage REST routes.
pub fn triage_routes(state: TriageRouteState) -> Router {
    Router::new()
        .route("/api/triage", post(post_triage))
        .route("/api/health", get(get_health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
