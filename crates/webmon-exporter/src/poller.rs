use crate::metrics::ExporterMetrics;
use std::sync::Arc;
use std::time::Instant;
use tokio::time::{interval, Duration};
use webmon_collector::StatusSource;

/// The tick loop: poll the source, publish the observation, record the
/// outcome in the liveness gauge.
///
/// A failed poll is logged and tolerated; the loop only ends with the
/// process. Ticks never overlap because each poll is awaited before the
/// interval sleeps again.
pub struct Poller {
    source: Box<dyn StatusSource>,
    metrics: Arc<ExporterMetrics>,
    interval_secs: u64,
}

impl Poller {
    pub fn new(
        source: Box<dyn StatusSource>,
        metrics: Arc<ExporterMetrics>,
        interval_secs: u64,
    ) -> Self {
        Self {
            source,
            metrics,
            interval_secs,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(
            source = self.source.name(),
            interval_secs = self.interval_secs,
            "Poller started"
        );

        let mut tick = interval(Duration::from_secs(self.interval_secs));
        loop {
            tick.tick().await;
            self.tick().await;
        }
    }

    /// One iteration of the loop, separated out so tests can drive it.
    pub async fn tick(&mut self) {
        let started = Instant::now();
        match self.source.poll().await {
            Ok(observation) => {
                self.metrics.publish(&observation);
                self.metrics.up.set(1);
                tracing::debug!(
                    source = self.source.name(),
                    requests = observation.requests_increase,
                    codes = observation.responses_by_code.len(),
                    "Poll completed"
                );
            }
            Err(e) => {
                self.metrics.up.set(0);
                tracing::error!(source = self.source.name(), error = %e, "Poll failed");
            }
        }
        self.metrics
            .scrape_duration
            .set(started.elapsed().as_secs_f64());
    }
}
