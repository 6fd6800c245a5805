//! # Question Bank Observe
//!
//! Tracing subscriber initialisation and the structured startup log helpers
//! used by the service binary.

#![deny(unsafe_code)]

pub mod logging;
pub mod startup;

pub use logging::{LogConfig, LogFormat, ParseLogFormatError, init_logging};
pub use startup::{
    ConfigEntry, log_config_summary, log_initialized, log_phase, log_ready, log_skipped,
};
