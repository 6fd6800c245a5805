//! Get question handler

use axum::{
    Json,
    extract::{Path, State},
};
use questionbank_types::QuestionResponse;

use super::require_id;
use crate::{ApiError, AppState};

/// Get a question by ID
///
/// # Path Parameters
/// - `id`: 24-character hex question id
///
/// # Errors
/// - 400 Bad Request: Blank or malformed id
/// - 404 Not Found: No question has this id
/// - 500 Internal Server Error: Storage operation failed
#[tracing::instrument(skip(state))]
pub async fn get_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<QuestionResponse>, ApiError> {
    let id = require_id(&id)?;
    let question = state.question_service.get(id).await?;

    tracing::debug!(question_id = %question.id, "Question retrieved");

    Ok(Json(QuestionResponse::from(&question)))
}
