//! # Question Bank API - REST Layer
//!
//! Exposes JSON endpoints for creating, listing, reading, updating and
//! deleting algorithm questions, plus Kubernetes-style health probes.

#![deny(unsafe_code)]

use std::sync::Arc;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use questionbank_store::QuestionStore;
use questionbank_types::StoreError;
use serde::Serialize;
use thiserror::Error;
use tower_http::trace::TraceLayer;

pub mod handlers;
pub mod health;
pub mod services;

use handlers::questions::{
    create::create_question, delete::delete_question, get::get_question, list::list_questions,
    missing_id, update::update_question,
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound("Question not found".to_string()),
            StoreError::InvalidId(id) => {
                ApiError::InvalidRequest(format!("Invalid question id: '{}'", id))
            },
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "Request rejected");
        }

        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn QuestionStore>,
    pub health_tracker: Arc<health::HealthTracker>,
    pub question_service: Arc<services::QuestionService>,
}

impl AppState {
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        let question_service = Arc::new(services::QuestionService::new(Arc::clone(&store)));
        Self { store, health_tracker: Arc::new(health::HealthTracker::new()), question_service }
    }
}

/// Build the service router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route(
            "/questions/{id}",
            get(get_question).put(update_question).delete(delete_question),
        )
        .route("/questions/", get(missing_id).put(missing_id).delete(missing_id))
        // Health endpoints (Kubernetes conventions)
        .route("/livez", get(health::livez_handler))
        .route("/readyz", get(health::readyz_handler))
        .route("/startupz", get(health::startupz_handler))
        .route("/healthz", get(health::healthz_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the router until `shutdown` resolves
///
/// In-flight requests are allowed to finish before this returns.
pub async fn serve(
    state: AppState,
    listener: tokio::net::TcpListener,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    axum::serve(listener, create_router(state)).with_graceful_shutdown(shutdown).await?;
    Ok(())
}
