use crate::access_log::{scan_status_codes, AccessLogSource};
use crate::delta::DeltaTracker;
use crate::error::SourceError;
use crate::stub_status::parse_stub_status;
use crate::types::StubStatus;
use crate::StatusSource;
use std::io::Write;

const STATUS_BODY: &str = "Active connections: 3\n\
server accepts handled requests\n\
10 10 20\n\
Reading: 1 Writing: 1 Waiting: 1\n";

#[test]
fn delta_applies_only_forward_increases() {
    let mut tracker = DeltaTracker::new();
    assert_eq!(tracker.advance(100), 0); // baseline
    assert_eq!(tracker.advance(130), 30);
    assert_eq!(tracker.advance(130), 0);
    assert_eq!(tracker.advance(131), 1);
}

#[test]
fn delta_sum_equals_last_minus_first() {
    let readings = [7u64, 7, 12, 40, 40, 41, 90];
    let mut tracker = DeltaTracker::new();
    let applied: u64 = readings.iter().map(|&c| tracker.advance(c)).sum();
    assert_eq!(applied, readings[readings.len() - 1] - readings[0]);
}

#[test]
fn delta_previous_advances_across_a_decrease() {
    let mut tracker = DeltaTracker::new();
    tracker.advance(500);
    // Upstream restart: counter reset to a small value
    assert_eq!(tracker.advance(10), 0);
    // The stored previous moved to 10, so the next reading is a delta
    // against the post-restart value, not the old 500.
    assert_eq!(tracker.advance(25), 15);
}

#[test]
fn parse_stub_status_reads_all_fields() {
    let body = "Active connections: 291 \n\
server accepts handled requests\n\
 16630948 16630948 31070465 \n\
Reading: 6 Writing: 179 Waiting: 106 \n";
    let snapshot = parse_stub_status(body).expect("example body should parse");
    assert_eq!(
        snapshot,
        StubStatus {
            active_connections: 291,
            accepted: 16_630_948,
            handled: 16_630_948,
            requests: 31_070_465,
            reading: 6,
            writing: 179,
            waiting: 106,
        }
    );
}

#[test]
fn parse_stub_status_rejects_missing_active_connections_prefix() {
    let body = STATUS_BODY.replace("Active connections:", "Connections:");
    let err = parse_stub_status(&body).expect_err("missing prefix should fail");
    assert!(matches!(err, SourceError::Parse { .. }));
    assert!(err.to_string().contains("Active connections"));
}

#[test]
fn parse_stub_status_rejects_missing_header_line() {
    let body = STATUS_BODY.replace("server accepts handled requests", "something else");
    assert!(matches!(
        parse_stub_status(&body),
        Err(SourceError::Parse { .. })
    ));
}

#[test]
fn parse_stub_status_rejects_non_numeric_total() {
    let body = STATUS_BODY.replace("10 10 20", "10 ten 20");
    let err = parse_stub_status(&body).expect_err("non-numeric total should fail");
    assert!(err.to_string().contains("handled"));
}

#[test]
fn parse_stub_status_rejects_truncated_body() {
    let body = "Active connections: 3\nserver accepts handled requests\n";
    assert!(matches!(
        parse_stub_status(body),
        Err(SourceError::Parse { .. })
    ));
}

#[test]
fn parse_stub_status_rejects_mangled_state_line() {
    let body = STATUS_BODY.replace("Writing:", "Sending:");
    assert!(matches!(
        parse_stub_status(&body),
        Err(SourceError::Parse { .. })
    ));
}

#[test]
fn scan_counts_one_code_per_line() {
    let text = "GET /a 200 521\nGET /b 404 90\nGET /c 200 13\nPOST /d 500 0\n";
    let counts = scan_status_codes(text);
    assert_eq!(counts.get(&200), Some(&2));
    assert_eq!(counts.get(&404), Some(&1));
    assert_eq!(counts.get(&500), Some(&1));
    assert_eq!(counts.len(), 3);
}

#[test]
fn scan_skips_lines_without_a_status_token() {
    let text = "no code here\n1234 not a code\n99 too short\n\n";
    assert!(scan_status_codes(text).is_empty());
}

#[test]
fn scan_ignores_tokens_outside_status_range() {
    // 999 has three digits but is not a status code; 200 embedded in a
    // longer token is not whitespace-delimited.
    let text = "x 999 y\nbytes=2000 sent\n- 301 -\n";
    let counts = scan_status_codes(text);
    assert_eq!(counts.get(&301), Some(&1));
    assert_eq!(counts.len(), 1);
}

#[tokio::test]
async fn access_log_source_counts_each_line_once() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("access.log");
    std::fs::write(&path, "GET / 200 1\nGET /x 404 2\n").expect("write log");

    let mut source = AccessLogSource::new(path.clone());
    let first = source.poll().await.expect("first poll");
    assert_eq!(first.responses_by_code.get(&200), Some(&1));
    assert_eq!(first.responses_by_code.get(&404), Some(&1));

    // Nothing new: the scanned lines must not be counted again.
    let second = source.poll().await.expect("second poll");
    assert!(second.responses_by_code.is_empty());

    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .open(&path)
        .expect("reopen log");
    writeln!(file, "GET /y 500 3").expect("append line");

    let third = source.poll().await.expect("third poll");
    assert_eq!(third.responses_by_code.get(&500), Some(&1));
    assert_eq!(third.responses_by_code.len(), 1);
}

#[tokio::test]
async fn access_log_source_leaves_partial_tail_for_next_poll() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("access.log");
    std::fs::write(&path, "GET / 200 1\nGET /x 40").expect("write log");

    let mut source = AccessLogSource::new(path.clone());
    let first = source.poll().await.expect("first poll");
    assert_eq!(first.responses_by_code.get(&200), Some(&1));
    assert_eq!(first.responses_by_code.len(), 1);

    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .open(&path)
        .expect("reopen log");
    writeln!(file, "4 2").expect("finish line");

    let second = source.poll().await.expect("second poll");
    assert_eq!(second.responses_by_code.get(&404), Some(&1));
}

#[tokio::test]
async fn access_log_source_resets_cursor_after_truncation() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("access.log");
    std::fs::write(&path, "GET / 200 1\nGET / 200 1\nGET / 200 1\n").expect("write log");

    let mut source = AccessLogSource::new(path.clone());
    let first = source.poll().await.expect("first poll");
    assert_eq!(first.responses_by_code.get(&200), Some(&3));

    // Rotation: the file is replaced by a shorter one.
    std::fs::write(&path, "GET / 302 1\n").expect("truncate log");
    let second = source.poll().await.expect("second poll");
    assert_eq!(second.responses_by_code.get(&302), Some(&1));
    assert_eq!(second.responses_by_code.len(), 1);
}

#[tokio::test]
async fn access_log_source_missing_file_is_open_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut source = AccessLogSource::new(dir.path().join("absent.log"));
    let err = source.poll().await.expect_err("missing file should fail");
    assert!(matches!(err, SourceError::FileOpen { .. }));
}
