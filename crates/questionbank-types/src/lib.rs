//! # Question Bank Types
//!
//! Shared domain model, API request/response types and storage errors used
//! across the question bank crates.

#![deny(unsafe_code)]

use serde::{Deserialize, Deserializer};
use thiserror::Error;

pub mod question;
pub mod view;

pub use question::{
    AlgorithmQuestion, Difficulty, Editorial, Filter, ParseDifficultyError, Tag, TestCase,
};
pub use view::{CreateQuestionResponse, QuestionRequest, QuestionResponse};

// ============================================================================
// Storage Errors
// ============================================================================

/// Errors reported by a question store implementation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Not found")]
    NotFound,

    /// The identifier is not a valid store key (e.g. not a 24-char hex ObjectId)
    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Deserialize an explicit `null` as the type's default value
///
/// Pair with `#[serde(default)]` so a missing field and a `null` field decode
/// the same way.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
