//! Access-log source: counts response status codes per poll.

use crate::error::{Result, SourceError};
use crate::types::StatusObservation;
use crate::StatusSource;
use async_trait::async_trait;
use regex::Regex;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::PathBuf;
use std::sync::LazyLock;

static STATUS_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-5][0-9]{2}$").expect("status token pattern"));

/// Counts response codes in a chunk of access-log text.
///
/// Each line contributes at most one code: the first whitespace-delimited
/// token that is exactly three digits in 100..=599. Lines without such a
/// token are skipped, never an error.
pub fn scan_status_codes(text: &str) -> HashMap<u16, u64> {
    let mut counts = HashMap::new();
    for line in text.lines() {
        let code = line
            .split_whitespace()
            .find(|token| STATUS_TOKEN.is_match(token))
            .and_then(|token| token.parse::<u16>().ok());
        if let Some(code) = code {
            *counts.entry(code).or_insert(0) += 1;
        }
    }
    counts
}

/// Reads a local access log and counts status codes of new lines.
///
/// The byte offset of the last consumed line is kept across polls, so
/// every log line is counted exactly once while the file grows. A file
/// that shrank below the stored offset was rotated or truncated
/// upstream; the cursor resets to the start.
pub struct AccessLogSource {
    path: PathBuf,
    offset: u64,
}

impl AccessLogSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path, offset: 0 }
    }

    fn read_error(&self, source: std::io::Error) -> SourceError {
        SourceError::FileRead {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl StatusSource for AccessLogSource {
    fn name(&self) -> &str {
        "access_log"
    }

    async fn poll(&mut self) -> Result<StatusObservation> {
        let mut file = File::open(&self.path).map_err(|e| SourceError::FileOpen {
            path: self.path.clone(),
            source: e,
        })?;

        let len = file.metadata().map_err(|e| self.read_error(e))?.len();
        if len < self.offset {
            self.offset = 0;
        }
        file.seek(SeekFrom::Start(self.offset))
            .map_err(|e| self.read_error(e))?;

        let mut buf = Vec::new();
        file.read_to_end(&mut buf).map_err(|e| self.read_error(e))?;

        // Consume only complete lines; a partially written tail is left
        // for the next poll.
        let consumed = buf
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |newline| newline + 1);
        self.offset += consumed as u64;
        let text = String::from_utf8_lossy(&buf[..consumed]);

        Ok(StatusObservation {
            responses_by_code: scan_status_codes(&text),
            ..Default::default()
        })
    }
}
