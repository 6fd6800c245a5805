//! Structured logging setup
//!
//! `RUST_LOG`, when set, takes precedence over the configured level.

use std::str::FromStr;

use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line output (for development)
    #[default]
    Pretty,
    /// Single-line output without span context
    Compact,
    /// Newline-delimited JSON (for production)
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown log format '{0}': must be one of pretty, compact, json")]
pub struct ParseLogFormatError(pub String);

impl FromStr for LogFormat {
    type Err = ParseLogFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(ParseLogFormatError(s.to_string())),
        }
    }
}

/// Configuration for logging behavior
#[derive(Debug, Clone, bon::Builder)]
pub struct LogConfig {
    #[builder(default)]
    pub format: LogFormat,
    /// Level directive used when `RUST_LOG` is unset (e.g. "info")
    #[builder(default = "info".to_string(), into)]
    pub level: String,
    /// Explicit filter that overrides both `level` and `RUST_LOG`
    pub filter: Option<String>,
    #[builder(default = true)]
    pub include_target: bool,
    #[builder(default = cfg!(debug_assertions))]
    pub include_location: bool,
    /// Emit span close events, which carry request timings
    #[builder(default)]
    pub log_spans: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl LogConfig {
    fn env_filter(&self) -> anyhow::Result<EnvFilter> {
        if let Some(filter) = &self.filter {
            return Ok(EnvFilter::try_new(filter)?);
        }
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => Ok(EnvFilter::try_new(&self.level)?),
        }
    }
}

/// Install the global tracing subscriber
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: LogConfig) -> anyhow::Result<()> {
    let env_filter = config.env_filter()?;

    let fmt_span = if config.log_spans { FmtSpan::CLOSE } else { FmtSpan::NONE };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(config.include_target)
        .with_file(config.include_location)
        .with_line_number(config.include_location)
        .with_span_events(fmt_span);

    match config.format {
        LogFormat::Pretty => {
            subscriber
                .pretty()
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to initialize pretty logger: {}", e))?;
        },
        LogFormat::Compact => {
            subscriber
                .compact()
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to initialize compact logger: {}", e))?;
        },
        LogFormat::Json => {
            subscriber
                .json()
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to initialize JSON logger: {}", e))?;
        },
    }

    tracing::debug!(format = ?config.format, level = %config.level, "Logging initialized");

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!("COMPACT".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_log_config_default() {
        let config = LogConfig::default();
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.level, "info");
        assert!(config.filter.is_none());
        assert!(config.include_target);
        assert!(!config.log_spans);
    }

    #[test]
    fn test_log_config_builder() {
        let config = LogConfig::builder()
            .format(LogFormat::Json)
            .level("warn")
            .filter("questionbank=trace".to_string())
            .log_spans(true)
            .build();

        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, "warn");
        assert_eq!(config.filter.as_deref(), Some("questionbank=trace"));
        assert!(config.log_spans);
    }

    #[test]
    fn test_explicit_filter_is_used() {
        let config = LogConfig::builder().filter("debug".to_string()).build();
        assert!(config.env_filter().is_ok());
    }

    #[test]
    fn test_invalid_filter_is_error() {
        let config = LogConfig::builder().filter("questionbank=loudest".to_string()).build();
        assert!(config.env_filter().is_err());
    }

    #[test]
    fn test_init_logging_twice_fails() {
        let config = LogConfig::builder().format(LogFormat::Compact).filter("info".to_string());
        // Another test in this binary may have installed a subscriber first
        let _ = init_logging(config.build());
        assert!(init_logging(LogConfig::builder().filter("info".to_string()).build()).is_err());
    }
}
