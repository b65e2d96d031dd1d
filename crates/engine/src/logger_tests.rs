// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::NaiveDate;
use mqlog_core::{FakeClock, Qos};

const HEADER: &str = "timestamp,topic,payload,qos,retain,mid,user_properties\n";

fn clock() -> FakeClock {
    FakeClock::at(
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap(),
    )
}

fn message(topic: &str, payload: &[u8], mid: u16) -> InboundMessage {
    InboundMessage {
        topic: topic.to_string(),
        payload: payload.to_vec(),
        qos: Qos::AtLeastOnce,
        retain: false,
        message_id: mid,
        user_properties: Vec::new(),
    }
}

/// A console that refuses every write
struct BrokenConsole;

impl Write for BrokenConsole {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn example_scenario_writes_expected_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.csv");

    let mut logger = EventLogger::initialize(&path, "qa", clock(), Vec::new()).unwrap();
    let sub = logger.on_connected("Success");
    assert_eq!(sub.filter, "qa/#");
    assert_eq!(sub.qos, Qos::AtLeastOnce);

    let seq = logger.capture(message("qa/sensors/temp", b"21.5", 7)).unwrap();
    assert_eq!(seq, 1);

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        format!("{}2026-10-19T14:30:00,qa/sensors/temp,21.5,1,0,7,\n", HEADER)
    );
}

#[test]
fn console_echoes_connection_and_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.csv");

    let mut logger = EventLogger::initialize(&path, "u01", clock(), Vec::new()).unwrap();
    let sub = logger.on_connected("Success");
    logger.subscribed(&sub);
    logger.capture(message("u01/door", b"open", 3)).unwrap();

    let console = String::from_utf8(logger.into_console()).unwrap();
    assert_eq!(
        console,
        "[2026-10-19T14:30:00] CONNECTED rc=Success\n\
         [2026-10-19T14:30:00] SUBSCRIBED to u01/#\n\
         [2026-10-19T14:30:00] RX u01/door: open (qos=1, retain=0)\n"
    );
}

#[test]
fn events_land_in_arrival_order_with_capture_time() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.csv");
    let clock = clock();

    let mut logger = EventLogger::initialize(&path, "u01", clock.clone(), Vec::new()).unwrap();
    for i in 0..10u16 {
        logger
            .capture(message(&format!("u01/n/{}", i), i.to_string().as_bytes(), i))
            .unwrap();
        clock.advance_secs(1);
    }
    drop(logger);

    let records = CsvLog::replay(&path).unwrap();
    assert_eq!(records.len(), 10);
    for (i, r) in records.iter().enumerate() {
        assert_eq!(r.topic(), format!("u01/n/{}", i));
        assert_eq!(r.payload(), i.to_string());
        assert_eq!(r.message_id() as usize, i);
        assert_eq!(
            format_timestamp(r.timestamp()),
            format!("2026-10-19T14:30:{:02}", i)
        );
    }
}

#[test]
fn reinitializing_appends_under_a_single_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.csv");

    for run in 0..3u16 {
        let mut logger = EventLogger::initialize(&path, "u01", clock(), Vec::new()).unwrap();
        assert_eq!(logger.sequence(), u64::from(run));
        logger.capture(message("u01/x", b"v", run)).unwrap();
    }

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.matches(HEADER).count(), 1);
    assert_eq!(CsvLog::replay(&path).unwrap().len(), 3);
}

#[test]
fn invalid_payload_bytes_become_replacement_characters() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.csv");

    let mut logger = EventLogger::initialize(&path, "u01", clock(), Vec::new()).unwrap();
    logger.capture(message("u01/raw", b"\xFFok\xFE", 1)).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains(",\u{FFFD}ok\u{FFFD},"), "got: {}", content);
}

#[test]
fn annotations_are_written_as_key_value_pairs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.csv");

    let mut logger = EventLogger::initialize(&path, "u01", clock(), Vec::new()).unwrap();
    let mut msg = message("u01/x", b"v", 1);
    msg.user_properties = vec![
        ("a".to_string(), "1".to_string()),
        ("b".to_string(), "2".to_string()),
    ];
    logger.capture(msg).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.ends_with(",1,0,1,a=1;b=2\n"), "got: {}", content);
}

#[test]
fn broken_console_does_not_lose_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.csv");

    let mut logger = EventLogger::initialize(&path, "u01", clock(), BrokenConsole).unwrap();
    assert_eq!(logger.capture(message("u01/x", b"v", 1)).unwrap(), 1);
    assert_eq!(CsvLog::replay(&path).unwrap().len(), 1);
}

#[test]
fn initialize_unwritable_path_fails() {
    let result = EventLogger::initialize(
        Path::new("/nonexistent/dir/log.csv"),
        "u01",
        clock(),
        Vec::new(),
    );
    assert!(matches!(result, Err(EngineError::Storage(_))));
}
