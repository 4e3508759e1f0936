//! webmon-exporter: polls a web server's status interface and exposes
//! the extracted counters in the Prometheus text format.

pub mod app;
pub mod config;
pub mod metrics;
pub mod poller;
pub mod state;
