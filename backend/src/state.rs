//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.

use crate::config::AppConfig;
use crate::repositories::{GoalStore, RecordStore};
use crate::services::{Clock, GoalService, StatisticsService};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Shared application state
///
/// Every field is behind an `Arc` (or is a handle that is), so cloning per
/// request is cheap.
#[derive(Clone)]
pub struct AppState {
    pub stats: StatisticsService,
    pub goals: GoalService,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Present when the Prometheus recorder was installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Build state over a single store serving both reads and goal writes
    pub fn new<S>(store: Arc<S>, clock: Arc<dyn Clock>, config: AppConfig) -> Self
    where
        S: RecordStore + GoalStore + 'static,
    {
        Self {
            stats: StatisticsService::new(store.clone(), clock),
            goals: GoalService::new(store),
            config: Arc::new(config),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    #[inline]
    pub fn stats(&self) -> &StatisticsService {
        &self.stats
    }

    #[inline]
    pub fn goals(&self) -> &GoalService {
        &self.goals
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn metrics(&self) -> Option<&PrometheusHandle> {
        self.metrics.as_ref()
    }
}
