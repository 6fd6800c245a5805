//! Health check endpoints for Kubernetes probes
//!
//! - `/livez` - Liveness probe (is the process alive?)
//! - `/readyz` - Readiness probe (is the store reachable and startup done?)
//! - `/startupz` - Startup probe (has initialization completed?)
//! - `/healthz` - Detailed health status for debugging/monitoring

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use questionbank_store::QuestionStore;
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Upper bound on the store ping performed by readiness checks
const STORE_PING_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    /// Functional but not yet ready for traffic
    Degraded,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub service: String,
    pub version: String,
    pub uptime_seconds: u64,
    /// Seconds since the UNIX epoch
    pub timestamp: u64,
    pub details: HealthDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDetails {
    pub storage: ComponentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentStatus {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Process-level health flags shared by the probes
#[derive(Clone)]
pub struct HealthTracker {
    start_time: Arc<AtomicU64>,
    ready: Arc<AtomicBool>,
    alive: Arc<AtomicBool>,
    startup_complete: Arc<AtomicBool>,
}

impl Default for HealthTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthTracker {
    fn current_timestamp_secs() -> u64 {
        SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0)
    }

    pub fn new() -> Self {
        Self {
            start_time: Arc::new(AtomicU64::new(Self::current_timestamp_secs())),
            ready: Arc::new(AtomicBool::new(false)),
            alive: Arc::new(AtomicBool::new(true)),
            startup_complete: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        Self::current_timestamp_secs().saturating_sub(self.start_time.load(Ordering::Relaxed))
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn set_alive(&self, alive: bool) {
        self.alive.store(alive, Ordering::Release);
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    pub fn set_startup_complete(&self, complete: bool) {
        self.startup_complete.store(complete, Ordering::Release);
    }

    pub fn is_startup_complete(&self) -> bool {
        self.startup_complete.load(Ordering::Acquire)
    }

    /// Probe the store and combine the result with the tracker flags
    pub async fn check_health(&self, store: &Arc<dyn QuestionStore>) -> HealthResponse {
        let storage = match tokio::time::timeout(STORE_PING_TIMEOUT, store.ping()).await {
            Ok(Ok(())) => ComponentStatus {
                status: HealthStatus::Healthy,
                message: Some("Storage operational".to_string()),
            },
            Ok(Err(e)) => ComponentStatus {
                status: HealthStatus::Unhealthy,
                message: Some(format!("Storage error: {}", e)),
            },
            Err(_) => ComponentStatus {
                status: HealthStatus::Unhealthy,
                message: Some("Storage timeout".to_string()),
            },
        };

        let status = if !self.is_alive() || storage.status == HealthStatus::Unhealthy {
            HealthStatus::Unhealthy
        } else if !self.is_ready() {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        };

        HealthResponse {
            status,
            service: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.uptime_seconds(),
            timestamp: Self::current_timestamp_secs(),
            details: HealthDetails { storage },
        }
    }
}

/// Liveness probe handler (`/livez`)
///
/// Returns 200 while the process is alive, 503 otherwise.
pub async fn livez_handler(State(state): State<AppState>) -> impl IntoResponse {
    if state.health_tracker.is_alive() { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE }
}

/// Readiness probe handler (`/readyz`)
///
/// Returns 200 only when the service is marked ready and the store answers a
/// ping within one second.
pub async fn readyz_handler(State(state): State<AppState>) -> impl IntoResponse {
    let health = state.health_tracker.check_health(&state.store).await;

    match health.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Degraded | HealthStatus::Unhealthy => {
            tracing::debug!(status = ?health.status, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        },
    }
}

/// Startup probe handler (`/startupz`)
pub async fn startupz_handler(State(state): State<AppState>) -> impl IntoResponse {
    if state.health_tracker.is_startup_complete() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// Detailed health check handler (`/healthz`)
///
/// Always returns a JSON body; the status code is 503 when unhealthy.
pub async fn healthz_handler(State(state): State<AppState>) -> impl IntoResponse {
    let health = state.health_tracker.check_health(&state.store).await;

    match health.status {
        HealthStatus::Healthy | HealthStatus::Degraded => (StatusCode::OK, Json(health)),
        HealthStatus::Unhealthy => (StatusCode::SERVICE_UNAVAILABLE, Json(health)),
    }
}
