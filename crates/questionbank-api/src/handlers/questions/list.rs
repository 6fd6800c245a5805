//! List (filter) questions handler

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use questionbank_types::{Difficulty, Filter, QuestionResponse};
use serde::Deserialize;

use crate::{ApiError, AppState};

/// Query parameters accepted by `GET /questions`
#[derive(Debug, Default, Deserialize)]
pub struct ListQuestionsQuery {
    /// Comma separated tags; a question matches if it carries any of them
    pub tags: Option<String>,
    pub difficulty: Option<String>,
}

impl ListQuestionsQuery {
    pub fn into_filter(self) -> Result<Filter, ApiError> {
        let tags = self.tags.as_deref().map(split_tags).unwrap_or_default();
        let difficulty = Difficulty::parse_optional(self.difficulty.as_deref().unwrap_or_default())
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        Ok(Filter::new(tags, difficulty))
    }
}

/// Split a comma separated tag list, trimming segments and dropping blanks
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|t| !t.is_empty()).map(str::to_string).collect()
}

/// List questions matching optional tag and difficulty criteria
///
/// # Query Parameters
/// - `tags`: comma separated, match-any (e.g. `tags=tree,graph`)
/// - `difficulty`: one of `easy`, `medium`, `hard`
///
/// # Response (200 OK)
/// ```json
/// [
///   {
///     "title": "Two Sum",
///     "content": "...",
///     "template": "",
///     "difficulty": "easy",
///     "tags": ["array"]
///   }
/// ]
/// ```
///
/// # Errors
/// - 400 Bad Request: Unknown difficulty or malformed query string
/// - 500 Internal Server Error: Storage operation failed
#[tracing::instrument(skip(state, query))]
pub async fn list_questions(
    State(state): State<AppState>,
    query: Result<Query<ListQuestionsQuery>, QueryRejection>,
) -> Result<Json<Vec<QuestionResponse>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
    let filter = query.into_filter()?;

    let questions = state.question_service.filter(&filter).await?;

    tracing::debug!(count = questions.len(), "Questions listed");

    Ok(Json(questions.iter().map(QuestionResponse::from).collect()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use questionbank_store::MockQuestionStore;
    use questionbank_types::{AlgorithmQuestion, StoreError, Tag};

    use super::*;
    use crate::handlers::questions::test_support::{error_of, state_with};

    fn query(tags: Option<&str>, difficulty: Option<&str>) -> ListQuestionsQuery {
        ListQuestionsQuery {
            tags: tags.map(str::to_string),
            difficulty: difficulty.map(str::to_string),
        }
    }

    #[test]
    fn test_split_tags() {
        assert_eq!(split_tags("tree"), vec!["tree"]);
        assert_eq!(split_tags("tree, graph ,dp"), vec!["tree", "graph", "dp"]);
        assert_eq!(split_tags("tree,,graph,"), vec!["tree", "graph"]);
        assert!(split_tags("").is_empty());
        assert!(split_tags(" , ").is_empty());
    }

    #[test]
    fn test_empty_query_is_empty_filter() {
        assert_eq!(query(None, None).into_filter().unwrap(), Filter::default());
        assert_eq!(query(Some(""), Some("")).into_filter().unwrap(), Filter::default());
    }

    #[test]
    fn test_query_into_filter() {
        let filter = query(Some("tree"), Some("hard")).into_filter().unwrap();
        assert_eq!(filter, Filter::new(vec!["tree".to_string()], Some(Difficulty::Hard)));
    }

    #[test]
    fn test_query_unknown_difficulty() {
        assert!(matches!(
            query(None, Some("expert")).into_filter(),
            Err(ApiError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_list_questions_flattens_records() {
        let mut store = MockQuestionStore::new();
        store.expect_find().times(1).returning(|_, _| {
            Ok(vec![
                AlgorithmQuestion::builder()
                    .id("65f0a1b2c3d4e5f601234567")
                    .title("A")
                    .difficulty(Difficulty::Medium)
                    .tags(vec![Tag::from("tree"), Tag::from("bfs")])
                    .build(),
                AlgorithmQuestion::builder().id("65f0a1b2c3d4e5f601234568").title("B").build(),
            ])
        });

        let Json(views) = list_questions(State(state_with(store)), Ok(Query(query(None, None))))
            .await
            .unwrap();

        assert_eq!(views.len(), 2);
        assert_eq!(views[0].difficulty, "medium");
        assert_eq!(views[0].tags, vec!["tree", "bfs"]);
        assert_eq!(views[1].difficulty, "");
        assert!(views[1].tags.is_empty());
    }

    #[tokio::test]
    async fn test_list_questions_store_failure() {
        let mut store = MockQuestionStore::new();
        store.expect_find().returning(|_, _| Err(StoreError::Database("timeout".to_string())));

        let result = list_questions(State(state_with(store)), Ok(Query(query(None, None)))).await;
        let (status, _) = error_of(result).await;
        assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
