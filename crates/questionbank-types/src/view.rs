//! HTTP request and response bodies for the question endpoints

use serde::{Deserialize, Serialize};

use crate::{
    null_as_default,
    question::{AlgorithmQuestion, Difficulty, ParseDifficultyError, Tag},
};

/// Body accepted by create and update
///
/// Every field is optional and defaults to empty. `difficulty` is carried as
/// text so the handler can reject unknown values with a descriptive message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionRequest {
    /// Ids are assigned by the store; a client-supplied id is rejected on create
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(deserialize_with = "null_as_default")]
    pub template: String,
    #[serde(deserialize_with = "null_as_default")]
    pub difficulty: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

impl QuestionRequest {
    /// Convert into an unpersisted domain record
    pub fn into_question(self) -> Result<AlgorithmQuestion, ParseDifficultyError> {
        let difficulty = Difficulty::parse_optional(&self.difficulty)?;
        Ok(AlgorithmQuestion {
            id: String::new(),
            title: self.title,
            content: self.content,
            template: self.template,
            difficulty,
            tags: self.tags.into_iter().map(Tag::from).collect(),
            test_cases: Vec::new(),
            editorial: Default::default(),
        })
    }
}

/// Flattened rendering of a question returned by list and get
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub title: String,
    pub content: String,
    pub template: String,
    /// Difficulty text, `""` when unset
    pub difficulty: String,
    pub tags: Vec<String>,
}

impl From<&AlgorithmQuestion> for QuestionResponse {
    fn from(question: &AlgorithmQuestion) -> Self {
        Self {
            title: question.title.clone(),
            content: question.content.clone(),
            template: question.template.clone(),
            difficulty: question.difficulty.map(|d| d.as_str().to_string()).unwrap_or_default(),
            tags: question.tag_strings(),
        }
    }
}

impl From<AlgorithmQuestion> for QuestionResponse {
    fn from(question: AlgorithmQuestion) -> Self {
        Self::from(&question)
    }
}

/// Response body for a successful create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateQuestionResponse {
    pub id: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_request_fields_default_to_empty() {
        let request: QuestionRequest = serde_json::from_str(r#"{"title":"T"}"#).unwrap();
        assert_eq!(request.title, "T");
        assert_eq!(request.content, "");
        assert_eq!(request.difficulty, "");
        assert!(request.tags.is_empty());
        assert!(request.id.is_none());
    }

    #[test]
    fn test_request_captures_client_id() {
        let request: QuestionRequest = serde_json::from_str(r#"{"id":"abc"}"#).unwrap();
        assert_eq!(request.id.as_deref(), Some("abc"));
    }

    #[test]
    fn test_request_null_fields_default_to_empty() {
        let request: QuestionRequest = serde_json::from_str(
            r#"{"title":"T","content":null,"difficulty":null,"tags":null,"id":null}"#,
        )
        .unwrap();
        assert_eq!(request.title, "T");
        assert_eq!(request.content, "");
        assert_eq!(request.difficulty, "");
        assert!(request.tags.is_empty());
        assert!(request.id.is_none());
        assert!(request.into_question().unwrap().difficulty.is_none());
    }

    #[test]
    fn test_into_question_parses_difficulty_and_tags() {
        let request = QuestionRequest {
            title: "Two Sum".to_string(),
            difficulty: "easy".to_string(),
            tags: vec!["array".to_string(), "hash".to_string()],
            ..Default::default()
        };

        let question = request.into_question().unwrap();
        assert_eq!(question.id, "");
        assert_eq!(question.difficulty, Some(Difficulty::Easy));
        assert_eq!(question.tags, vec![Tag::from("array"), Tag::from("hash")]);
    }

    #[test]
    fn test_into_question_empty_difficulty_is_unset() {
        let question = QuestionRequest::default().into_question().unwrap();
        assert_eq!(question.difficulty, None);
    }

    #[test]
    fn test_into_question_rejects_unknown_difficulty() {
        let request = QuestionRequest { difficulty: "brutal".to_string(), ..Default::default() };
        assert!(request.into_question().is_err());
    }

    #[test]
    fn test_response_flattens_question() {
        let question = AlgorithmQuestion::builder()
            .id("65f0a1b2c3d4e5f601234567")
            .title("T")
            .content("C")
            .difficulty(Difficulty::Hard)
            .tags(vec![Tag::from("tree")])
            .build();

        let response = QuestionResponse::from(&question);
        assert_eq!(response.difficulty, "hard");
        assert_eq!(response.tags, vec!["tree"]);

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_response_unset_difficulty_renders_empty() {
        let question = AlgorithmQuestion::builder().title("T").content("C").build();
        let json = serde_json::to_value(QuestionResponse::from(question)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "T",
                "content": "C",
                "template": "",
                "difficulty": "",
                "tags": []
            })
        );
    }
}
