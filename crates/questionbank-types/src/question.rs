//! Algorithm question domain model
//!
//! An [`AlgorithmQuestion`] is the record the service manages. Its `id` is
//! assigned by the store and stays empty until the record has been persisted.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Difficulty of a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All difficulties, in ascending order
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Canonical lowercase text form, as stored and rendered over HTTP
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Parse an optional difficulty where the empty string means "unset"
    pub fn parse_optional(value: &str) -> Result<Option<Self>, ParseDifficultyError> {
        if value.is_empty() { Ok(None) } else { value.parse().map(Some) }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when text does not name one of the known difficulties
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown difficulty '{0}': must be one of easy, medium, hard")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(ParseDifficultyError(other.to_string())),
        }
    }
}

/// Free-form label attached to a question
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for Tag {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Tag {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Input/expected-output pair used to judge a submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub input: String,
    pub output: String,
}

impl TestCase {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self { input: input.into(), output: output.into() }
    }
}

/// Commentary explaining the intended solution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Editorial {
    pub explanation: String,
}

/// A persisted algorithm question
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, bon::Builder)]
#[builder(on(String, into))]
pub struct AlgorithmQuestion {
    /// Store-assigned identifier, empty until persisted
    #[builder(default)]
    pub id: String,
    #[builder(default)]
    pub title: String,
    /// Problem statement
    #[builder(default)]
    pub content: String,
    /// Starter code handed to the solver
    #[builder(default)]
    pub template: String,
    pub difficulty: Option<Difficulty>,
    #[builder(default)]
    pub tags: Vec<Tag>,
    #[builder(default)]
    pub test_cases: Vec<TestCase>,
    #[builder(default)]
    pub editorial: Editorial,
}

impl AlgorithmQuestion {
    /// Whether the record has been assigned an id by the store
    pub fn is_persisted(&self) -> bool {
        !self.id.is_empty()
    }

    /// Tags rendered as plain strings
    pub fn tag_strings(&self) -> Vec<String> {
        self.tags.iter().map(|t| t.as_str().to_string()).collect()
    }
}

/// Criteria for listing questions
///
/// An empty `tags` list or a `None` difficulty places no constraint on that
/// field. Tags use match-any semantics; difficulty is an exact match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub tags: Vec<String>,
    pub difficulty: Option<Difficulty>,
}

impl Filter {
    pub fn new(tags: Vec<String>, difficulty: Option<Difficulty>) -> Self {
        Self { tags, difficulty }
    }

    /// True when the filter matches every question
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.difficulty.is_none()
    }

    /// Evaluate the filter against a question in memory
    pub fn matches(&self, question: &AlgorithmQuestion) -> bool {
        let tags_match = self.tags.is_empty()
            || question.tags.iter().any(|tag| self.tags.iter().any(|t| t == tag.as_str()));
        let difficulty_match = match self.difficulty {
            Some(wanted) => question.difficulty == Some(wanted),
            None => true,
        };
        tags_match && difficulty_match
    }
}
