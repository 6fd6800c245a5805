//! Configuration validation

use thiserror::Error;

use crate::{Config, ListenConfig, MongoConfig, StorageConfig};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid address '{0}': {1}")]
    InvalidAddress(String, String),

    #[error("Invalid log level: {0} (must be one of: trace, debug, info, warn, error)")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0} (must be one of: pretty, compact, json)")]
    InvalidLogFormat(String),

    #[error("Invalid backend: {0} (must be one of: mongodb, mongo, memory)")]
    InvalidBackend(String),

    #[error("storage.mongodb.{0} must not be empty")]
    EmptyMongoSetting(&'static str),

    #[error("Invalid MongoDB URI '{0}': must start with mongodb:// or mongodb+srv://")]
    InvalidMongoUri(String),

    #[error("Invalid shutdown timeout: {0} (must be > 0)")]
    InvalidShutdownTimeout(u64),

    #[error("Multiple validation errors: {0:?}")]
    Multiple(Vec<ValidationError>),
}

pub type Result<T> = std::result::Result<T, ValidationError>;

/// Validate complete configuration, collecting every failure
pub fn validate(config: &Config) -> Result<()> {
    let mut errors: Vec<ValidationError> = [
        validate_logging(&config.logging),
        validate_log_format(&config.log_format),
        validate_listen(&config.listen),
        validate_storage(&config.storage),
        validate_shutdown_timeout(config.shutdown_timeout_secs),
    ]
    .into_iter()
    .filter_map(std::result::Result::err)
    .collect();

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

pub fn validate_logging(level: &str) -> Result<()> {
    match level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ValidationError::InvalidLogLevel(level.to_string())),
    }
}

pub fn validate_log_format(format: &str) -> Result<()> {
    match format.to_lowercase().as_str() {
        "pretty" | "compact" | "json" => Ok(()),
        _ => Err(ValidationError::InvalidLogFormat(format.to_string())),
    }
}

pub fn validate_listen(config: &ListenConfig) -> Result<()> {
    config
        .http
        .parse::<std::net::SocketAddr>()
        .map_err(|e| ValidationError::InvalidAddress(config.http.clone(), e.to_string()))?;
    Ok(())
}

/// Validate storage configuration
///
/// Backend names are case-insensitive and `mongo` is an alias of `mongodb`.
/// MongoDB settings are only checked when the mongodb backend is selected.
pub fn validate_storage(config: &StorageConfig) -> Result<()> {
    match config.backend.to_lowercase().as_str() {
        "memory" => Ok(()),
        "mongodb" | "mongo" => validate_mongodb(&config.mongodb),
        _ => Err(ValidationError::InvalidBackend(config.backend.clone())),
    }
}

pub fn validate_mongodb(config: &MongoConfig) -> Result<()> {
    if config.uri.is_empty() {
        return Err(ValidationError::EmptyMongoSetting("uri"));
    }
    if !config.uri.starts_with("mongodb://") && !config.uri.starts_with("mongodb+srv://") {
        return Err(ValidationError::InvalidMongoUri(config.uri.clone()));
    }
    if config.database.is_empty() {
        return Err(ValidationError::EmptyMongoSetting("database"));
    }
    if config.collection.is_empty() {
        return Err(ValidationError::EmptyMongoSetting("collection"));
    }
    Ok(())
}

pub fn validate_shutdown_timeout(secs: u64) -> Result<()> {
    if secs == 0 {
        return Err(ValidationError::InvalidShutdownTimeout(secs));
    }
    Ok(())
}
