//! Delete question handler

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use super::require_id;
use crate::{ApiError, AppState};

/// Delete a question by ID
///
/// Deleting an id that does not exist succeeds, so retries are safe.
///
/// # Response
/// 204 No Content
///
/// # Errors
/// - 400 Bad Request: Blank or malformed id
/// - 500 Internal Server Error: Storage operation failed
#[tracing::instrument(skip(state))]
pub async fn delete_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = require_id(&id)?;
    state.question_service.delete(id).await?;

    tracing::info!(question_id = %id, "Question deleted");

    Ok(StatusCode::NO_CONTENT)
}
