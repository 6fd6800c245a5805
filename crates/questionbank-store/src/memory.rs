//! In-memory question store for testing and development

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use questionbank_types::{AlgorithmQuestion, Difficulty, Filter, StoreError, StoreResult};
use tokio::sync::RwLock;

use crate::QuestionStore;

/// Question store backed by a vector in insertion order
///
/// Ids are generated as `ObjectId`s so they look and validate exactly like the
/// ones issued by MongoDB. Cloning yields a handle to the same data.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    questions: Arc<RwLock<Vec<AlgorithmQuestion>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored questions
    pub async fn len(&self) -> usize {
        self.questions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.questions.read().await.is_empty()
    }
}

fn parse_id(id: &str) -> StoreResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

#[async_trait]
impl QuestionStore for MemoryBackend {
    async fn get(&self, id: &str) -> StoreResult<AlgorithmQuestion> {
        let key = parse_id(id)?.to_hex();
        let questions = self.questions.read().await;
        questions.iter().find(|q| q.id == key).cloned().ok_or(StoreError::NotFound)
    }

    async fn save(&self, question: &AlgorithmQuestion) -> StoreResult<String> {
        let id = ObjectId::new().to_hex();
        let mut stored = question.clone();
        stored.id = id.clone();

        self.questions.write().await.push(stored);
        Ok(id)
    }

    async fn find(
        &self,
        tags: &[String],
        difficulty: Option<Difficulty>,
    ) -> StoreResult<Vec<AlgorithmQuestion>> {
        let filter = Filter::new(tags.to_vec(), difficulty);
        let questions = self.questions.read().await;
        Ok(questions.iter().filter(|q| filter.matches(q)).cloned().collect())
    }

    async fn update(&self, id: &str, question: &AlgorithmQuestion) -> StoreResult<()> {
        let key = parse_id(id)?.to_hex();
        let mut questions = self.questions.write().await;
        let existing = questions.iter_mut().find(|q| q.id == key).ok_or(StoreError::NotFound)?;

        *existing = AlgorithmQuestion { id: key, ..question.clone() };
        Ok(())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let key = parse_id(id)?.to_hex();
        self.questions.write().await.retain(|q| q.id != key);
        Ok(())
    }
}
