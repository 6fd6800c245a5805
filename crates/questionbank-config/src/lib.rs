//! # Question Bank Config
//!
//! Loads service configuration in three layers, lowest precedence first:
//!
//! 1. serde defaults
//! 2. an optional YAML file
//! 3. environment variables prefixed with `QUESTIONBANK__`
//!
//! ```yaml
//! logging: info
//! log_format: pretty
//! listen:
//!   http: "0.0.0.0:8000"
//! storage:
//!   backend: mongodb
//!   mongodb:
//!     uri: "mongodb://localhost:27017"
//!     database: listing
//!     collection: question
//! shutdown_timeout_secs: 5
//! ```
//!
//! Nested keys are addressed from the environment with `__`, for example
//! `QUESTIONBANK__STORAGE__MONGODB__URI`.

#![deny(unsafe_code)]

pub mod validation;

use std::{path::Path, time::Duration};

use anyhow::Context;
pub use config::ConfigError;
use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "QUESTIONBANK";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_logging")]
    pub logging: String,

    /// Log output format (pretty, compact, json)
    #[serde(default = "default_log_format")]
    pub log_format: String,

    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub storage: StorageConfig,

    /// Upper bound on store teardown after the HTTP server stops
    #[serde(default = "default_shutdown_timeout_secs")]
    pub shutdown_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: default_logging(),
            log_format: default_log_format(),
            listen: ListenConfig::default(),
            storage: StorageConfig::default(),
            shutdown_timeout_secs: default_shutdown_timeout_secs(),
        }
    }
}

impl Config {
    /// Validate configuration at startup
    pub fn validate(&self) -> anyhow::Result<()> {
        validation::validate(self).context("invalid configuration")
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

fn default_logging() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_shutdown_timeout_secs() -> u64 {
    5
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenConfig {
    /// Format: "host:port" (e.g., "0.0.0.0:8000")
    #[serde(default = "default_http")]
    pub http: String,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self { http: default_http() }
    }
}

fn default_http() -> String {
    "0.0.0.0:8000".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Store implementation: "mongodb" or "memory"
    #[serde(default = "default_backend")]
    pub backend: String,

    #[serde(default)]
    pub mongodb: MongoConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { backend: default_backend(), mongodb: MongoConfig::default() }
    }
}

fn default_backend() -> String {
    "mongodb".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoConfig {
    #[serde(default = "default_mongo_uri")]
    pub uri: String,
    #[serde(default = "default_mongo_database")]
    pub database: String,
    #[serde(default = "default_mongo_collection")]
    pub collection: String,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: default_mongo_uri(),
            database: default_mongo_database(),
            collection: default_mongo_collection(),
        }
    }
}

fn default_mongo_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_mongo_database() -> String {
    "listing".to_string()
}

fn default_mongo_collection() -> String {
    "question".to_string()
}

/// Load configuration from an optional file plus environment overrides
///
/// A missing file is not an error; defaults fill every unset key.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let builder = ConfigBuilder::builder().add_source(File::from(path.as_ref()).required(false));

    let builder =
        builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__").try_parsing(true));

    builder.build()?.try_deserialize()
}

/// Load configuration, falling back to defaults if the sources cannot be parsed
///
/// The load error is handed back rather than logged, since configuration is
/// read before the log subscriber exists.
pub fn load_or_default<P: AsRef<Path>>(path: P) -> (Config, Option<ConfigError>) {
    match load(path) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    }
}
