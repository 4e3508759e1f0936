#![allow(dead_code)]

use chrono::Utc;
use prometheus::Registry;
use std::sync::Arc;
use webmon_exporter::config::{ExporterConfig, SourceConfig};
use webmon_exporter::metrics::ExporterMetrics;
use webmon_exporter::state::AppState;

pub fn test_config() -> ExporterConfig {
    ExporterConfig {
        listen_port: 9114,
        poll_interval_secs: 15,
        source: SourceConfig::HttpStatus {
            url: "http://localhost:8080/nginx_status".to_string(),
            timeout_secs: 5,
        },
    }
}

pub fn build_test_state() -> (AppState, Arc<ExporterMetrics>) {
    let registry = Registry::new();
    let metrics =
        Arc::new(ExporterMetrics::new(&registry).expect("instruments should register once"));
    let state = AppState {
        registry,
        config: Arc::new(test_config()),
        start_time: Utc::now(),
    };
    (state, metrics)
}
