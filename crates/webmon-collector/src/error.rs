use std::path::PathBuf;

/// Errors that can occur while polling a status source.
///
/// Every variant is non-fatal to the exporter: the poller logs it, sets
/// the liveness gauge to zero and tries again on the next tick.
///
/// # Examples
///
/// ```rust
/// use webmon_collector::error::SourceError;
///
/// let err = SourceError::Http { status: 503 };
/// assert!(err.to_string().contains("503"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The status endpoint could not be reached or the transfer failed.
    #[error("Status fetch failed: {0}")]
    Connect(#[from] reqwest::Error),

    /// The status endpoint answered with a non-success status code.
    #[error("Status endpoint returned HTTP {status}")]
    Http { status: u16 },

    /// The status payload does not match the expected fixed format.
    #[error("Malformed status payload: expected {expected} in line {line:?}")]
    Parse { expected: &'static str, line: String },

    /// The access log could not be opened.
    #[error("Cannot open log file '{}': {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The access log was opened but reading from it failed.
    #[error("Cannot read log file '{}': {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience `Result` alias for source operations.
pub type Result<T> = std::result::Result<T, SourceError>;
