use std::collections::HashMap;

/// Raw snapshot of one fixed-format stub-status page.
///
/// `accepted`, `handled` and `requests` are cumulative since the
/// upstream server started; everything else is instantaneous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StubStatus {
    pub active_connections: u64,
    pub accepted: u64,
    pub handled: u64,
    pub requests: u64,
    pub reading: u64,
    pub writing: u64,
    pub waiting: u64,
}

/// Per-state connection counts from the last line of the status page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectionStates {
    pub reading: u64,
    pub writing: u64,
    pub waiting: u64,
}

/// What a source hands the poller after one successful poll.
///
/// Gauge-like fields are `None` when the source's format does not expose
/// them; counter increases default to zero and are already forward
/// deltas, never cumulative totals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusObservation {
    pub active_connections: Option<u64>,
    pub connections: Option<ConnectionStates>,
    pub accepted_increase: u64,
    pub handled_increase: u64,
    pub requests_increase: u64,
    /// Response counts per HTTP status code seen since the last poll.
    pub responses_by_code: HashMap<u16, u64>,
}
