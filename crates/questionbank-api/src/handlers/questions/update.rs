//! Update question handler

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use questionbank_types::QuestionRequest;

use super::{parse_body, require_id};
use crate::{ApiError, AppState};

/// Replace the mutable fields of an existing question
///
/// Accepts the same body as create. An `id` in the body is allowed only when
/// it matches the path.
///
/// # Response
/// 204 No Content
///
/// # Errors
/// - 400 Bad Request: Blank or malformed id, malformed body, unknown difficulty
/// - 404 Not Found: No question has this id
/// - 500 Internal Server Error: Storage operation failed
#[tracing::instrument(skip(state, payload))]
pub async fn update_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<QuestionRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = require_id(&id)?;
    let request = parse_body(payload)?;

    if let Some(body_id) = request.id.as_deref() {
        if body_id != id {
            return Err(ApiError::InvalidRequest(format!(
                "Body id '{}' does not match path id '{}'",
                body_id, id
            )));
        }
    }

    let question =
        request.into_question().map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
    state.question_service.update(id, &question).await?;

    tracing::info!(question_id = %id, "Question updated");

    Ok(StatusCode::NO_CONTENT)
}
