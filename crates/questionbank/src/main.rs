//! # Question Bank Binary
//!
//! Main entrypoint for the algorithm question bank HTTP service.

use std::{str::FromStr, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use questionbank_api::AppState;
use questionbank_config::{Config, load_or_default};
use questionbank_observe::{
    ConfigEntry, LogConfig, LogFormat, init_logging, log_config_summary, log_initialized,
    log_phase, log_ready, log_skipped,
};
use questionbank_store::{BackendType, MongoSettings, QuestionStore, StorageConfig, StorageFactory};

#[derive(Parser, Debug)]
#[command(name = "questionbank")]
#[command(about = "Algorithm question bank service", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// HTTP address (overrides config), e.g., "0.0.0.0:8000"
    #[arg(long)]
    http: Option<String>,

    /// Storage backend (overrides config): "memory" or "mongodb"
    #[arg(long)]
    storage: Option<String>,
}

impl Args {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(ref addr) = self.http {
            config.listen.http = addr.clone();
        }
        if let Some(ref backend) = self.storage {
            config.storage.backend = backend.clone();
        }
    }
}

/// Translate the file-level storage section into a backend description
fn storage_config(config: &Config) -> Result<StorageConfig> {
    let backend = BackendType::from_str(&config.storage.backend)?;
    let settings = MongoSettings {
        uri: config.storage.mongodb.uri.clone(),
        database: config.storage.mongodb.database.clone(),
        collection: config.storage.mongodb.collection.clone(),
    };

    Ok(match backend {
        BackendType::Memory => StorageConfig::memory(),
        BackendType::MongoDb => StorageConfig::mongodb(settings),
    })
}

fn config_entries(config: &Config, config_path: &str) -> Vec<ConfigEntry> {
    let mut entries = vec![
        ConfigEntry::new("General", "Configuration File", config_path),
        ConfigEntry::new("General", "Log Level", &config.logging),
        ConfigEntry::new("General", "Log Format", &config.log_format),
        ConfigEntry::new("Listen", "HTTP", &config.listen.http),
        ConfigEntry::new("Storage", "Backend", &config.storage.backend),
    ];

    if config.storage.backend.eq_ignore_ascii_case("memory") {
        return entries;
    }

    // The URI may carry credentials
    entries.push(ConfigEntry::sensitive("Storage", "MongoDB URI", &config.storage.mongodb.uri));
    entries.push(ConfigEntry::new("Storage", "Database", &config.storage.mongodb.database));
    entries.push(ConfigEntry::new("Storage", "Collection", &config.storage.mongodb.collection));
    entries
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load before logging is up; a load failure is reported once the subscriber exists
    let (mut config, load_error) = load_or_default(&args.config);
    args.apply_overrides(&mut config);

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {:#}", e);
        std::process::exit(1);
    }

    init_logging(
        LogConfig::builder()
            .format(config.log_format.parse::<LogFormat>().unwrap_or_default())
            .level(config.logging.clone())
            .build(),
    )?;

    if let Some(e) = load_error {
        tracing::warn!("Failed to load config from {:?}: {}. Using defaults.", args.config, e);
    }

    let config_path = std::fs::canonicalize(&args.config)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| args.config.clone());

    log_phase("Configuration");
    log_config_summary(&config_entries(&config, &config_path));

    log_phase("Initializing");
    let store = StorageFactory::create(storage_config(&config)?)
        .await
        .context("failed to initialize question store")?;
    log_initialized(&format!("Storage ({})", config.storage.backend));

    match store.ping().await {
        Ok(()) => log_initialized("Storage connectivity check"),
        Err(e) => {
            // Readiness stays red until the store answers; serving still starts
            tracing::warn!(error = %e, "Storage is not reachable yet");
            log_skipped("Storage connectivity check", "store did not answer ping");
        },
    }

    let state = AppState::new(Arc::clone(&store));

    let listener = tokio::net::TcpListener::bind(&config.listen.http)
        .await
        .with_context(|| format!("failed to bind {}", config.listen.http))?;
    let local_addr = listener.local_addr()?.to_string();

    state.health_tracker.set_startup_complete(true);
    state.health_tracker.set_ready(true);
    log_ready("Question Bank", &[("HTTP", local_addr.as_str())]);

    let tracker = Arc::clone(&state.health_tracker);
    let shutdown = async move {
        shutdown_signal().await;
        tracker.set_ready(false);
        tracing::info!("Shutdown signal received, draining connections");
    };

    questionbank_api::serve(state, listener, shutdown).await?;

    match tokio::time::timeout(config.shutdown_timeout(), store.close()).await {
        Ok(Ok(())) => tracing::info!("Question store closed"),
        Ok(Err(e)) => tracing::warn!(error = %e, "Failed to close question store"),
        Err(_) => tracing::warn!(
            timeout_secs = config.shutdown_timeout_secs,
            "Timed out closing question store"
        ),
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
