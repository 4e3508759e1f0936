//! Prometheus instruments published by the exporter.

use prometheus::{Gauge, IntCounter, IntCounterVec, IntGauge, IntGaugeVec, Opts, Registry};
use webmon_collector::StatusObservation;

/// All instruments the exporter writes, registered against an explicit
/// [`Registry`] and injected into whoever needs them. Only set and
/// increment-by operations are used outside of tests.
pub struct ExporterMetrics {
    /// 1 when the most recent poll succeeded, 0 otherwise.
    pub up: IntGauge,
    pub active_connections: IntGauge,
    pub connections: IntGaugeVec,
    pub accepted_total: IntCounter,
    pub handled_total: IntCounter,
    pub requests_total: IntCounter,
    pub responses_total: IntCounterVec,
    pub scrape_duration: Gauge,
}

impl ExporterMetrics {
    /// Creates and registers every instrument.
    ///
    /// # Errors
    ///
    /// Returns an error if an instrument clashes with one already
    /// registered (duplicate construction against the same registry).
    pub fn new(registry: &Registry) -> prometheus::Result<Self> {
        let up = IntGauge::new(
            "webmon_up",
            "Whether the last poll of the monitored server succeeded (1 up, 0 down)",
        )?;
        let active_connections = IntGauge::new(
            "webmon_active_connections",
            "Active client connections reported by the status page",
        )?;
        let connections = IntGaugeVec::new(
            Opts::new(
                "webmon_connections",
                "Connections per state reported by the status page",
            ),
            &["state"],
        )?;
        let accepted_total = IntCounter::new(
            "webmon_connections_accepted_total",
            "Client connections accepted by the monitored server",
        )?;
        let handled_total = IntCounter::new(
            "webmon_connections_handled_total",
            "Client connections handled by the monitored server",
        )?;
        let requests_total = IntCounter::new(
            "webmon_requests_total",
            "HTTP requests served by the monitored server",
        )?;
        let responses_total = IntCounterVec::new(
            Opts::new(
                "webmon_responses_total",
                "Responses observed in the access log, by status code",
            ),
            &["code"],
        )?;
        let scrape_duration = Gauge::new(
            "webmon_scrape_duration_seconds",
            "Duration of the last status poll",
        )?;

        registry.register(Box::new(up.clone()))?;
        registry.register(Box::new(active_connections.clone()))?;
        registry.register(Box::new(connections.clone()))?;
        registry.register(Box::new(accepted_total.clone()))?;
        registry.register(Box::new(handled_total.clone()))?;
        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(responses_total.clone()))?;
        registry.register(Box::new(scrape_duration.clone()))?;

        Ok(Self {
            up,
            active_connections,
            connections,
            accepted_total,
            handled_total,
            requests_total,
            responses_total,
            scrape_duration,
        })
    }

    /// Applies one tick's observation to the instruments.
    pub fn publish(&self, observation: &StatusObservation) {
        if let Some(active) = observation.active_connections {
            self.active_connections.set(active as i64);
        }
        if let Some(states) = observation.connections {
            self.connections
                .with_label_values(&["reading"])
                .set(states.reading as i64);
            self.connections
                .with_label_values(&["writing"])
                .set(states.writing as i64);
            self.connections
                .with_label_values(&["waiting"])
                .set(states.waiting as i64);
        }

        self.accepted_total.inc_by(observation.accepted_increase);
        self.handled_total.inc_by(observation.handled_increase);
        self.requests_total.inc_by(observation.requests_increase);

        for (code, count) in &observation.responses_by_code {
            self.responses_total
                .with_label_values(&[&code.to_string()])
                .inc_by(*count);
        }
    }
}
