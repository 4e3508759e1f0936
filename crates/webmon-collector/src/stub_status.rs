//! Parser for the fixed-format stub-status page.
//!
//! The page is exactly four lines:
//!
//! ```text
//! Active connections: 291
//! server accepts handled requests
//!  16630948 16630948 31070465
//! Reading: 6 Writing: 179 Waiting: 106
//! ```
//!
//! Any missing literal token or non-numeric field is a hard parse
//! error; the caller discards the whole tick rather than publishing
//! partial counters.

use crate::error::{Result, SourceError};
use crate::types::StubStatus;

fn parse_field(token: &str, expected: &'static str, line: &str) -> Result<u64> {
    token.parse().map_err(|_| SourceError::Parse {
        expected,
        line: line.to_string(),
    })
}

fn next_line<'a>(lines: &mut std::str::Lines<'a>, expected: &'static str) -> Result<&'a str> {
    lines.next().ok_or_else(|| SourceError::Parse {
        expected,
        line: String::new(),
    })
}

/// Parses one stub-status body into a [`StubStatus`] snapshot.
pub fn parse_stub_status(body: &str) -> Result<StubStatus> {
    let mut lines = body.lines();

    let first = next_line(&mut lines, "\"Active connections:\" line")?;
    let active = first
        .strip_prefix("Active connections:")
        .ok_or_else(|| SourceError::Parse {
            expected: "\"Active connections:\" prefix",
            line: first.to_string(),
        })?;
    let active_connections = parse_field(active.trim(), "active connection count", first)?;

    let header = next_line(&mut lines, "\"server accepts handled requests\" header")?;
    if !header.contains("server accepts handled requests") {
        return Err(SourceError::Parse {
            expected: "\"server accepts handled requests\" header",
            line: header.to_string(),
        });
    }

    let totals_line = next_line(&mut lines, "accepts/handled/requests totals line")?;
    let mut totals = totals_line.split_whitespace();
    let mut next_total = |expected: &'static str| -> Result<u64> {
        let token = totals.next().ok_or_else(|| SourceError::Parse {
            expected,
            line: totals_line.to_string(),
        })?;
        parse_field(token, expected, totals_line)
    };
    let accepted = next_total("accepted connections total")?;
    let handled = next_total("handled connections total")?;
    let requests = next_total("requests total")?;

    let states_line = next_line(&mut lines, "\"Reading: R Writing: W Waiting: T\" line")?;
    let tokens: Vec<&str> = states_line.split_whitespace().collect();
    if tokens.len() != 6 || tokens[0] != "Reading:" || tokens[2] != "Writing:" || tokens[4] != "Waiting:" {
        return Err(SourceError::Parse {
            expected: "\"Reading: R Writing: W Waiting: T\" line",
            line: states_line.to_string(),
        });
    }
    let reading = parse_field(tokens[1], "reading connection count", states_line)?;
    let writing = parse_field(tokens[3], "writing connection count", states_line)?;
    let waiting = parse_field(tokens[5], "waiting connection count", states_line)?;

    Ok(StubStatus {
        active_connections,
        accepted,
        handled,
        requests,
        reading,
        writing,
        waiting,
    })
}
