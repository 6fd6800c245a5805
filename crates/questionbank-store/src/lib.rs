//! # Question Bank Store
//!
//! The repository contract for algorithm questions and its implementations:
//!
//! - [`MongoBackend`] persists questions as documents in a MongoDB collection
//! - [`MemoryBackend`] keeps them in process, for tests and local development
//!
//! Both assign ids as 24-character hex `ObjectId`s and share the same error
//! semantics, so callers can swap one for the other freely.

#![deny(unsafe_code)]

use async_trait::async_trait;
use questionbank_types::{AlgorithmQuestion, Difficulty, StoreResult};

pub mod factory;
pub mod memory;
pub mod mongo;

pub use factory::{BackendType, StorageConfig, StorageFactory};
pub use memory::MemoryBackend;
pub use mongo::{MongoBackend, MongoSettings};
pub use questionbank_types::StoreError;

/// Persistence contract for algorithm questions
///
/// Implementations are shared across requests behind an `Arc` and must be
/// safe to call concurrently.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Fetch a single question
    ///
    /// Returns `InvalidId` when `id` is not a valid key and `NotFound` when no
    /// question has that id.
    async fn get(&self, id: &str) -> StoreResult<AlgorithmQuestion>;

    /// Insert a new question and return its generated id
    ///
    /// Any id already present on `question` is ignored.
    async fn save(&self, question: &AlgorithmQuestion) -> StoreResult<String>;

    /// List questions carrying any of `tags` and, if set, exactly `difficulty`
    ///
    /// An empty `tags` slice places no constraint on tags. Results are in
    /// store order.
    async fn find(
        &self,
        tags: &[String],
        difficulty: Option<Difficulty>,
    ) -> StoreResult<Vec<AlgorithmQuestion>>;

    /// Replace every mutable field of an existing question
    ///
    /// This is a full replacement: `test_cases` and `editorial` are
    /// overwritten too, so passing them empty clears the stored values.
    /// Returns `NotFound` when no question has that id.
    async fn update(&self, id: &str, question: &AlgorithmQuestion) -> StoreResult<()>;

    /// Remove a question; succeeds when the id is already absent
    async fn delete(&self, id: &str) -> StoreResult<()>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    /// Release connections held by the store
    async fn close(&self) -> StoreResult<()> {
        Ok(())
    }
}
