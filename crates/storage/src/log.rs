// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only CSV event log with per-record durability

use crate::csv;
use mqlog_core::{EventRecord, RecordError, COLUMNS};
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

const LF: &str = "\n";
const CRLF: &str = "\r\n";

/// Errors that can occur in log operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("{path} does not start with the event log header (found {found:?})")]
    HeaderMismatch { path: PathBuf, found: String },
    #[error("malformed row {row}: {source}")]
    Record {
        row: usize,
        #[source]
        source: RecordError,
    },
}

/// Append-only event log.
///
/// The file always begins with exactly one header row. Every append is
/// synced before it returns.
pub struct CsvLog {
    file: File,
    path: PathBuf,
    sequence: u64,
    /// Row terminator, kept from an existing file so appends match it
    line_end: &'static str,
}

impl CsvLog {
    /// Open or create a log at the given path
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .read(true)
            .open(path)?;

        let mut existing = Vec::new();
        file.read_to_end(&mut existing)?;

        let lf_header = header_row();
        let crlf_header = lf_header.replace('\n', CRLF);
        let fresh = existing.is_empty()
            || is_torn_header(&existing, &lf_header)
            || is_torn_header(&existing, &crlf_header);

        let (sequence, line_end) = if fresh {
            if !existing.is_empty() {
                warn!(path = %path.display(), "discarding incomplete header");
                file.set_len(0)?;
            }
            file.write_all(lf_header.as_bytes())?;
            file.sync_all()?;
            info!(path = %path.display(), "created event log");
            (0, LF)
        } else {
            let (header, line_end) = if existing.starts_with(lf_header.as_bytes()) {
                (&lf_header, LF)
            } else if existing.starts_with(crlf_header.as_bytes()) {
                (&crlf_header, CRLF)
            } else {
                let first = String::from_utf8_lossy(&existing);
                return Err(StorageError::HeaderMismatch {
                    path: path.to_path_buf(),
                    found: first.lines().next().unwrap_or_default().to_string(),
                });
            };

            // A crash mid-append can leave a partial row behind
            let valid = csv::complete_len(&existing);
            if valid < existing.len() {
                warn!(
                    path = %path.display(),
                    dropped_bytes = existing.len() - valid,
                    "dropping incomplete trailing row"
                );
                file.set_len(valid as u64)?;
                file.sync_all()?;
            }

            let body = String::from_utf8_lossy(&existing[header.len()..valid]);
            (csv::parse_rows(&body).len() as u64, line_end)
        };

        Ok(Self {
            file,
            path: path.to_path_buf(),
            sequence,
            line_end,
        })
    }

    /// Append a record and force it to disk, returning its sequence number
    pub fn append(&mut self, record: &EventRecord) -> Result<u64, StorageError> {
        let mut row = csv::encode_row(&record.to_fields());
        if self.line_end == CRLF {
            row.pop();
            row.push_str(CRLF);
        }
        self.file.write_all(row.as_bytes())?;
        self.file.sync_data()?;
        self.sequence += 1;
        Ok(self.sequence)
    }

    /// Number of records in the file, across all runs
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read back every complete record in the log
    pub fn replay(path: &Path) -> Result<Vec<EventRecord>, StorageError> {
        let mut file = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        let valid = csv::complete_len(&bytes);
        let text = String::from_utf8_lossy(&bytes[..valid]);

        csv::parse_rows(&text)
            .into_iter()
            .enumerate()
            .skip(1)
            .map(|(row, fields)| {
                EventRecord::from_fields(&fields)
                    .map_err(|source| StorageError::Record { row, source })
            })
            .collect()
    }
}

#[cfg(any(test, feature = "test-support"))]
impl CsvLog {
    /// Open like [`CsvLog::open`] but keep only a read-only handle, so every
    /// append fails with an IO error
    pub fn open_read_only(path: &Path) -> Result<Self, StorageError> {
        let mut log = Self::open(path)?;
        log.file = File::open(path)?;
        Ok(log)
    }
}

/// The literal header row, newline included
pub fn header_row() -> String {
    csv::encode_row(&COLUMNS)
}

fn is_torn_header(existing: &[u8], header: &str) -> bool {
    existing.len() < header.len() && header.as_bytes().starts_with(existing)
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
