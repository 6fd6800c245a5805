//! Question endpoints
//!
//! | Method | Path              | Handler           |
//! |--------|-------------------|-------------------|
//! | GET    | `/questions`      | [`list::list_questions`] |
//! | POST   | `/questions`      | [`create::create_question`] |
//! | GET    | `/questions/{id}` | [`get::get_question`] |
//! | PUT    | `/questions/{id}` | [`update::update_question`] |
//! | DELETE | `/questions/{id}` | [`delete::delete_question`] |

use axum::{Json, extract::rejection::JsonRejection};
use questionbank_types::QuestionRequest;

use crate::ApiError;

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

/// Fallback for `/questions/` with the id segment left empty
pub async fn missing_id() -> ApiError {
    ApiError::InvalidRequest("Question id is required".to_string())
}

/// Reject blank path ids before they reach the store
pub(crate) fn require_id(id: &str) -> Result<&str, ApiError> {
    if id.trim().is_empty() {
        return Err(ApiError::InvalidRequest("Question id is required".to_string()));
    }
    Ok(id)
}

/// Unwrap a JSON body, turning any extractor rejection into a 400
pub(crate) fn parse_body(
    payload: Result<Json<QuestionRequest>, JsonRejection>,
) -> Result<QuestionRequest, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
    Ok(request)
}
