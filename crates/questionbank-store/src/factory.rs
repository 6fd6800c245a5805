//! Storage factory for creating backend instances
//!
//! Keeps backend selection out of the binary: callers describe the backend
//! with a [`StorageConfig`] and receive a shared `Arc<dyn QuestionStore>`.

use std::{str::FromStr, sync::Arc};

use questionbank_types::{StoreError, StoreResult};

use crate::{MemoryBackend, MongoBackend, MongoSettings, QuestionStore};

/// Storage backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    /// In-process storage (for testing and development)
    Memory,
    /// MongoDB document store (for production)
    MongoDb,
}

impl FromStr for BackendType {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(BackendType::Memory),
            "mongodb" | "mongo" => Ok(BackendType::MongoDb),
            _ => Err(StoreError::Internal(format!("Unknown backend type: {}", s))),
        }
    }
}

impl BackendType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendType::Memory => "memory",
            BackendType::MongoDb => "mongodb",
        }
    }
}

/// Configuration for storage backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub backend: BackendType,
    /// Used only by the MongoDB backend
    pub mongodb: MongoSettings,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::memory()
    }
}

impl StorageConfig {
    pub fn memory() -> Self {
        Self { backend: BackendType::Memory, mongodb: MongoSettings::default() }
    }

    pub fn mongodb(settings: MongoSettings) -> Self {
        Self { backend: BackendType::MongoDb, mongodb: settings }
    }
}

/// Storage factory for creating backend instances
pub struct StorageFactory;

impl StorageFactory {
    /// Create a storage backend from configuration
    pub async fn create(config: StorageConfig) -> StoreResult<Arc<dyn QuestionStore>> {
        match config.backend {
            BackendType::Memory => {
                tracing::debug!("Creating in-memory question store");
                Ok(Arc::new(MemoryBackend::new()))
            },
            BackendType::MongoDb => {
                tracing::debug!(
                    database = %config.mongodb.database,
                    collection = %config.mongodb.collection,
                    "Creating MongoDB question store"
                );
                Ok(Arc::new(MongoBackend::connect(&config.mongodb).await?))
            },
        }
    }

    pub fn memory() -> Arc<dyn QuestionStore> {
        Arc::new(MemoryBackend::new())
    }
}
