//! Report metrics and the Prometheus recorder

use crate::state::AppState;
use anyhow::Result;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::fmt;
use std::time::Duration;

/// Report computed by the statistics service, used as a metric label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Weekly,
    Monthly,
    Progress,
    Dashboard,
    Workouts,
    Nutrition,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Weekly => "weekly",
            ReportKind::Monthly => "monthly",
            ReportKind::Progress => "progress",
            ReportKind::Dashboard => "dashboard",
            ReportKind::Workouts => "workouts",
            ReportKind::Nutrition => "nutrition",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record the outcome of one report computation.
///
/// - `stats_reports_total`: every computation
/// - `stats_report_duration_seconds`: wall time
/// - `stats_report_failures_total`: failed computations
pub fn record_report(kind: ReportKind, elapsed: Duration, succeeded: bool) {
    counter!("stats_reports_total", "kind" => kind.as_str()).increment(1);
    histogram!("stats_report_duration_seconds", "kind" => kind.as_str())
        .record(elapsed.as_secs_f64());
    if !succeeded {
        counter!("stats_report_failures_total", "kind" => kind.as_str()).increment(1);
    }
}

/// Install the global Prometheus recorder
pub fn init_metrics() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .set_buckets(&[0.001, 0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0])?
        .install_recorder()?;
    Ok(handle)
}

/// `GET /metrics` in Prometheus text format
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.metrics() {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        ),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            [(header::CONTENT_TYPE, "text/plain")],
            "Metrics recorder not installed".to_string(),
        ),
    }
}
