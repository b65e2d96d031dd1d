// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The event logger: durable log plus operator console

use crate::EngineError;
use chrono::NaiveDateTime;
use mqlog_core::{format_timestamp, Clock, EventRecord, InboundMessage, Subscription};
use mqlog_storage::CsvLog;
use std::fmt;
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// Appends every received event to the log in arrival order and echoes a
/// line per event to the console.
///
/// Owns its log handle; the file is closed when the logger is dropped.
pub struct EventLogger<C, W> {
    log: CsvLog,
    team: String,
    clock: C,
    console: W,
}

impl<C: Clock, W: Write> EventLogger<C, W> {
    /// Open (or create) the log at `path` for a logger scoped to `team`
    pub fn initialize(path: &Path, team: &str, clock: C, console: W) -> Result<Self, EngineError> {
        let log = CsvLog::open(path)?;
        debug!(path = %path.display(), existing = log.sequence(), "event log ready");
        Ok(Self::new(log, team, clock, console))
    }

    /// Wrap an already opened log
    pub fn new(log: CsvLog, team: &str, clock: C, console: W) -> Self {
        Self {
            log,
            team: team.to_string(),
            clock,
            console,
        }
    }

    pub fn team(&self) -> &str {
        &self.team
    }

    /// Records in the log across all runs
    pub fn sequence(&self) -> u64 {
        self.log.sequence()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// A session was established: decide what to subscribe to
    pub fn on_connected(&mut self, code: &str) -> Subscription {
        let now = self.clock.now();
        self.say(now, format_args!("CONNECTED rc={}", code));
        Subscription::for_team(&self.team)
    }

    /// The transport accepted the subscription request
    pub fn subscribed(&mut self, subscription: &Subscription) {
        let now = self.clock.now();
        self.say(now, format_args!("SUBSCRIBED to {}", subscription.filter));
    }

    /// Timestamp an inbound delivery and record it
    pub fn capture(&mut self, message: InboundMessage) -> Result<u64, EngineError> {
        let record = EventRecord::capture(message, self.clock.now());
        self.record(&record)
    }

    /// Append `record` durably, then echo it to the console.
    ///
    /// Returns the record's sequence number.
    pub fn record(&mut self, record: &EventRecord) -> Result<u64, EngineError> {
        let seq = self.log.append(record)?;
        self.echo(&record.summary_line());
        Ok(seq)
    }

    /// Write an operator line stamped with `timestamp`
    pub fn say(&mut self, timestamp: NaiveDateTime, text: fmt::Arguments<'_>) {
        let line = format!("[{}] {}", format_timestamp(timestamp), text);
        self.echo(&line);
    }

    /// Hand back the console, closing the log
    pub fn into_console(self) -> W {
        self.console
    }

    fn echo(&mut self, line: &str) {
        // The row is already durable; a broken console must not stop logging
        if let Err(e) = writeln!(self.console, "{}", line).and_then(|()| self.console.flush()) {
            warn!(error = %e, "console write failed");
        }
    }
}

#[cfg(test)]
#[path = "logger_tests.rs"]
mod tests;
