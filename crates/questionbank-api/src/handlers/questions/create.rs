//! Create question handler

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use questionbank_types::{CreateQuestionResponse, QuestionRequest};

use super::parse_body;
use crate::{ApiError, AppState};

/// Create a new question
///
/// # Request Body
/// ```json
/// {
///   "title": "Two Sum",
///   "content": "Return indices of the two numbers adding up to target",
///   "template": "fn two_sum(nums: Vec<i32>, target: i32) -> Vec<i32> {}",
///   "difficulty": "easy",
///   "tags": ["array", "hash-table"]
/// }
/// ```
///
/// Every field is optional. Ids are assigned by the store.
///
/// # Response (201 Created)
/// ```json
/// { "id": "65f0a1b2c3d4e5f601234567" }
/// ```
///
/// # Errors
/// - 400 Bad Request: Malformed body, unknown difficulty or client-supplied id
/// - 500 Internal Server Error: Storage operation failed
#[tracing::instrument(skip(state, payload))]
pub async fn create_question(
    State(state): State<AppState>,
    payload: Result<Json<QuestionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateQuestionResponse>), ApiError> {
    let request = parse_body(payload)?;

    if request.id.is_some() {
        return Err(ApiError::InvalidRequest(
            "Question id is assigned by the server and must not be provided".to_string(),
        ));
    }

    let question =
        request.into_question().map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
    let created = state.question_service.create(question).await?;

    tracing::info!(question_id = %created.id, title = %created.title, "Question created");

    Ok((StatusCode::CREATED, Json(CreateQuestionResponse { id: created.id })))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use questionbank_store::{MockQuestionStore, QuestionStore};
    use questionbank_types::{Difficulty, StoreError};

    use super::*;
    use crate::handlers::questions::test_support::{create_test_state, error_of, state_with};

    fn request(title: &str, difficulty: &str) -> QuestionRequest {
        QuestionRequest {
            title: title.to_string(),
            content: "content".to_string(),
            difficulty: difficulty.to_string(),
            tags: vec!["array".to_string()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_question_success() {
        let state = create_test_state();

        let (status, Json(body)) =
            create_question(State(state.clone()), Ok(Json(request("Two Sum", "easy"))))
                .await
                .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.id.len(), 24);

        let stored = state.store.get(&body.id).await.unwrap();
        assert_eq!(stored.title, "Two Sum");
        assert_eq!(stored.difficulty, Some(Difficulty::Easy));
    }

    #[tokio::test]
    async fn test_create_question_rejects_client_id() {
        let state = create_test_state();
        let mut body = request("Two Sum", "easy");
        body.id = Some("65f0a1b2c3d4e5f601234567".to_string());

        let result = create_question(State(state), Ok(Json(body))).await;
        let (status, message) = error_of(result).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(message.contains("must not be provided"));
    }

    #[tokio::test]
    async fn test_create_question_rejects_unknown_difficulty() {
        let state = create_test_state();

        let result = create_question(State(state), Ok(Json(request("T", "nightmare")))).await;
        let (status, message) = error_of(result).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(message.contains("nightmare"));
    }

    #[tokio::test]
    async fn test_create_question_store_failure() {
        let mut store = MockQuestionStore::new();
        store.expect_save().returning(|_| Err(StoreError::Database("write failed".to_string())));

        let result = create_question(State(state_with(store)), Ok(Json(request("T", "")))).await;
        let (status, _) = error_of(result).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
