//! HTTP handlers for the triage API
//!
//! - POST /classify_email -> mask PII and classify an email body
//! - GET  /health         -> liveness probe

use crate::domain::TriageError;
use crate::service::{ClassificationOutcome, TriageService};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

/// Shared state for the triage handlers
#[derive(Clone, Debug)]
pub struct AppState {
    pub service: TriageService,
}

/// Create the triage router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/classify_email", post(classify_email))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// Request / Response types
// =============================================================================

/// Request body for `POST /classify_email`
#[derive(Debug, Deserialize)]
pub struct EmailRequest {
    pub email_body: String,
}

/// Health probe response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Error body returned on request failure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Request failure, rendered as HTTP 500 with a `detail` message
#[derive(Debug)]
pub struct ApiError(String);

impl From<TriageError> for ApiError {
    fn from(err: TriageError) -> Self {
        Self(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            detail: format!("Error processing email: {}", self.0),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// POST /classify_email: preprocess, mask and classify
async fn classify_email(
    State(state): State<AppState>,
    Json(request): Json<EmailRequest>,
) -> Result<Json<ClassificationOutcome>, ApiError> {
    let service = state.service.clone();

    // masking and classification are CPU-bound
    let outcome = tokio::task::spawn_blocking(move || service.process(&request.email_body))
        .await
        .map_err(|e| ApiError(format!("processing task failed: {e}")))?;

    match outcome {
        Ok(outcome) => Ok(Json(outcome)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to process email");
            Err(e.into())
        }
    }
}

/// GET /health
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}
