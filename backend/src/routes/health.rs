//! Health check endpoints
//!
//! - /health - Basic health check
//! - /health/ready - Readiness check, queries the record store
//! - /health/live - Liveness check

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use fitness_stats_shared::StatsResult;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
    Ready,
    NotReady,
    Alive,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<HealthChecks>,
}

impl HealthResponse {
    fn new(status: HealthStatus) -> Self {
        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            checks: None,
        }
    }
}

/// Individual dependency checks
#[derive(Serialize)]
pub struct HealthChecks {
    pub record_store: CheckStatus,
}

/// Status of an individual check
#[derive(Serialize)]
pub struct CheckStatus {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<StatsResult<()>> for CheckStatus {
    fn from(result: StatsResult<()>) -> Self {
        match result {
            Ok(()) => Self {
                status: HealthStatus::Healthy,
                message: None,
            },
            Err(e) => Self {
                status: HealthStatus::Unhealthy,
                message: Some(e.to_string()),
            },
        }
    }
}

/// Basic health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::new(HealthStatus::Healthy))
}

/// Readiness check; 503 while the record store is unreachable
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let record_store = CheckStatus::from(state.stats().store().health_check().await);
    let ready = record_store.status == HealthStatus::Healthy;

    let response = HealthResponse {
        checks: Some(HealthChecks { record_store }),
        ..HealthResponse::new(if ready {
            HealthStatus::Ready
        } else {
            HealthStatus::NotReady
        })
    };

    if ready {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Liveness check, OK whenever the process is serving
pub async fn liveness_check() -> Json<HealthResponse> {
    Json(HealthResponse::new(HealthStatus::Alive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitness_stats_shared::StatsError;

    #[tokio::test]
    async fn test_health_check_returns_healthy() {
        let response = health_check().await;
        assert_eq!(response.status, HealthStatus::Healthy);
        assert!(!response.version.is_empty());
    }

    #[tokio::test]
    async fn test_liveness_check_returns_alive() {
        let response = liveness_check().await;
        assert_eq!(response.status, HealthStatus::Alive);
    }

    #[test]
    fn test_failed_check_carries_message() {
        let check = CheckStatus::from(Err(StatsError::store_unavailable("connection refused")));
        assert_eq!(check.status, HealthStatus::Unhealthy);
        assert!(check.message.unwrap().contains("connection refused"));
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_value(HealthResponse::new(HealthStatus::NotReady)).unwrap();
        assert_eq!(json["status"], "not_ready");
        assert!(json.get("checks").is_none());
    }
}
