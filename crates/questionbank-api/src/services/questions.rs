//! Question service - delegates question operations to the store

use std::sync::Arc;

use questionbank_store::QuestionStore;
use questionbank_types::{AlgorithmQuestion, Filter};

use crate::ApiError;

/// Service for managing algorithm questions
///
/// Input validation happens in the handlers; this layer owns id assignment
/// and the mapping of store failures onto API errors.
pub struct QuestionService {
    store: Arc<dyn QuestionStore>,
}

impl QuestionService {
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self { store }
    }

    /// Persist a new question and return it with its store-assigned id
    ///
    /// Any id already set on `question` is discarded.
    #[tracing::instrument(skip(self, question), fields(title = %question.title))]
    pub async fn create(
        &self,
        mut question: AlgorithmQuestion,
    ) -> Result<AlgorithmQuestion, ApiError> {
        question.id.clear();
        let id = self.store.save(&question).await?;
        question.id = id;
        Ok(question)
    }

    #[tracing::instrument(skip(self))]
    pub async fn filter(&self, filter: &Filter) -> Result<Vec<AlgorithmQuestion>, ApiError> {
        let questions = self.store.find(&filter.tags, filter.difficulty).await?;
        tracing::debug!(count = questions.len(), "Questions listed");
        Ok(questions)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<AlgorithmQuestion, ApiError> {
        Ok(self.store.get(id).await?)
    }

    #[tracing::instrument(skip(self, question))]
    pub async fn update(&self, id: &str, question: &AlgorithmQuestion) -> Result<(), ApiError> {
        Ok(self.store.update(id, question).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        Ok(self.store.delete(id).await?)
    }
}
