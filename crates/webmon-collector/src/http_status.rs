//! HTTP stub-status source.

use crate::delta::DeltaTracker;
use crate::error::{Result, SourceError};
use crate::stub_status::parse_stub_status;
use crate::types::{ConnectionStates, StatusObservation};
use crate::StatusSource;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// Polls a stub-status endpoint and derives forward deltas for the
/// cumulative accepted/handled/requests totals.
///
/// The previous-tick counter state lives in this struct, so independent
/// sources never share mutable state.
pub struct HttpStatusSource {
    url: String,
    client: reqwest::Client,
    accepted: DeltaTracker,
    handled: DeltaTracker,
    requests: DeltaTracker,
}

impl HttpStatusSource {
    /// Builds a source for `url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url,
            client,
            accepted: DeltaTracker::new(),
            handled: DeltaTracker::new(),
            requests: DeltaTracker::new(),
        })
    }
}

#[async_trait]
impl StatusSource for HttpStatusSource {
    fn name(&self) -> &str {
        "http_status"
    }

    async fn poll(&mut self) -> Result<StatusObservation> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let snapshot = parse_stub_status(&body)?;

        // Trackers advance only after a clean parse: a malformed payload
        // must leave the previous-tick state untouched.
        Ok(StatusObservation {
            active_connections: Some(snapshot.active_connections),
            connections: Some(ConnectionStates {
                reading: snapshot.reading,
                writing: snapshot.writing,
                waiting: snapshot.waiting,
            }),
            accepted_increase: self.accepted.advance(snapshot.accepted),
            handled_increase: self.handled.advance(snapshot.handled),
            requests_increase: self.requests.advance(snapshot.requests),
            responses_by_code: HashMap::default(),
        })
    }
}
