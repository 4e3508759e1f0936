//! Status sources for the webmon exporter.
//!
//! Each [`StatusSource`] implementation reads one status interface of a
//! running web server (a stub-status HTTP endpoint or a textual access
//! log) and turns it into a [`StatusObservation`] ready for publishing
//! into the metric registry.

pub mod access_log;
pub mod delta;
pub mod error;
pub mod http_status;
pub mod stub_status;
pub mod types;

#[cfg(test)]
mod tests;

use async_trait::async_trait;

pub use error::{Result, SourceError};
pub use types::{ConnectionStates, StatusObservation, StubStatus};

/// A status source polled by the exporter's tick loop.
///
/// Implementations own whatever state they need between ticks (previous
/// counter values, file cursors) so that several sources could run side
/// by side without interfering. The trait requires `Send + Sync` so a
/// boxed source can live inside a spawned polling task.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Returns the source name (e.g., `"http_status"`), used for logging.
    fn name(&self) -> &str;

    /// Reads the status interface once and produces an observation.
    ///
    /// # Errors
    ///
    /// Returns an error if the interface cannot be reached or its
    /// payload does not match the expected format. A failed poll must
    /// not contribute any counter increases.
    async fn poll(&mut self) -> Result<StatusObservation>;
}
