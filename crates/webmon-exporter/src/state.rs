use crate::config::ExporterConfig;
use chrono::{DateTime, Utc};
use prometheus::Registry;
use std::sync::Arc;

/// Shared state for the exposition HTTP handlers.
///
/// Handlers only read the registry; all writes happen in the poller
/// task through the registered instruments.
#[derive(Clone)]
pub struct AppState {
    pub registry: Registry,
    pub config: Arc<ExporterConfig>,
    pub start_time: DateTime<Utc>,
}
