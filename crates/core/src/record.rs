// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event records captured from the feed

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::qos::Qos;

/// ISO-8601 local civil time at second resolution, no offset
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Column names of the log file, in row order
pub const COLUMNS: [&str; 7] = [
    "timestamp",
    "topic",
    "payload",
    "qos",
    "retain",
    "mid",
    "user_properties",
];

/// Errors from turning stored fields back into a record
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("expected {expected} fields, got {actual}")]
    FieldCount { expected: usize, actual: usize },
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
    #[error("invalid qos: {0}")]
    InvalidQos(String),
    #[error("invalid retain flag: {0}")]
    InvalidRetain(String),
    #[error("invalid message id: {0}")]
    InvalidMessageId(String),
    #[error("invalid annotation: {0}")]
    InvalidAnnotation(String),
}

/// A raw delivery as handed over by the transport
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InboundMessage {
    pub topic: String,
    pub payload: Vec<u8>,
    pub qos: Qos,
    pub retain: bool,
    /// Packet identifier, 0 for QoS 0
    pub message_id: u16,
    /// MQTT v5 user properties, in the order the sender attached them
    pub user_properties: Vec<(String, String)>,
}

/// One logged event. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    timestamp: NaiveDateTime,
    topic: String,
    payload: String,
    qos: Qos,
    retain: bool,
    message_id: u16,
    annotations: Vec<(String, String)>,
}

impl EventRecord {
    /// Capture a delivery at `timestamp`.
    ///
    /// Payload bytes that are not valid UTF-8 are replaced with U+FFFD.
    pub fn capture(message: InboundMessage, timestamp: NaiveDateTime) -> Self {
        let payload = match String::from_utf8(message.payload) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        };

        Self {
            timestamp,
            topic: message.topic,
            payload,
            qos: message.qos,
            retain: message.retain,
            message_id: message.message_id,
            annotations: message.user_properties,
        }
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn qos(&self) -> Qos {
        self.qos
    }

    pub fn retain(&self) -> bool {
        self.retain
    }

    pub fn message_id(&self) -> u16 {
        self.message_id
    }

    pub fn annotations(&self) -> &[(String, String)] {
        &self.annotations
    }

    /// `a=1;b=2`, or empty when there are no annotations.
    ///
    /// Nothing is escaped, so the field only reads back intact when keys
    /// contain neither `=` nor `;` and values contain no `;`.
    pub fn annotations_field(&self) -> String {
        self.annotations
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Unescaped field values in [`COLUMNS`] order
    pub fn to_fields(&self) -> [String; 7] {
        [
            format_timestamp(self.timestamp),
            self.topic.clone(),
            self.payload.clone(),
            self.qos.to_string(),
            u8::from(self.retain).to_string(),
            self.message_id.to_string(),
            self.annotations_field(),
        ]
    }

    /// Rebuild a record from stored field values
    pub fn from_fields(fields: &[String]) -> Result<Self, RecordError> {
        let [timestamp, topic, payload, qos, retain, mid, annotations] = fields else {
            return Err(RecordError::FieldCount {
                expected: COLUMNS.len(),
                actual: fields.len(),
            });
        };

        let timestamp = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)
            .map_err(|_| RecordError::InvalidTimestamp(timestamp.clone()))?;
        let qos = qos
            .parse::<u8>()
            .map_err(|_| RecordError::InvalidQos(qos.clone()))
            .and_then(Qos::try_from)?;
        let retain = match retain.as_str() {
            "0" => false,
            "1" => true,
            other => return Err(RecordError::InvalidRetain(other.to_string())),
        };
        let message_id = mid
            .parse::<u16>()
            .map_err(|_| RecordError::InvalidMessageId(mid.clone()))?;

        Ok(Self {
            timestamp,
            topic: topic.clone(),
            payload: payload.clone(),
            qos,
            retain,
            message_id,
            annotations: parse_annotations(annotations)?,
        })
    }

    /// Operator console line for this record
    pub fn summary_line(&self) -> String {
        format!(
            "[{}] RX {}: {} (qos={}, retain={})",
            format_timestamp(self.timestamp),
            self.topic,
            self.payload,
            self.qos,
            u8::from(self.retain)
        )
    }
}

pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

fn parse_annotations(field: &str) -> Result<Vec<(String, String)>, RecordError> {
    if field.is_empty() {
        return Ok(Vec::new());
    }

    field
        .split(';')
        .map(|pair| {
            pair.split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .ok_or_else(|| RecordError::InvalidAnnotation(pair.to_string()))
        })
        .collect()
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
