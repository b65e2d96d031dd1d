// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake transport for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{Transport, TransportError};
use async_trait::async_trait;
use mqlog_core::Qos;
use std::sync::{Arc, Mutex};

/// Recorded transport call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCall {
    Subscribe { filter: String, qos: Qos },
}

/// Fake transport for testing.
///
/// Events are injected by the test through the channel it owns; this side
/// only records control calls.
#[derive(Clone, Default)]
pub struct FakeTransport {
    calls: Arc<Mutex<Vec<TransportCall>>>,
    fail_subscribe: Arc<Mutex<Option<String>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<TransportCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Filters subscribed so far, in call order
    pub fn subscriptions(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|call| match call {
                TransportCall::Subscribe { filter, .. } => filter,
            })
            .collect()
    }

    /// Make every later subscribe fail with `reason`
    pub fn fail_subscribe(&self, reason: &str) {
        *self
            .fail_subscribe
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = Some(reason.to_string());
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn subscribe(&self, filter: &str, qos: Qos) -> Result<(), TransportError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(TransportCall::Subscribe {
                filter: filter.to_string(),
                qos,
            });

        match self
            .fail_subscribe
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
        {
            Some(reason) => Err(TransportError::Subscribe {
                filter: filter.to_string(),
                reason,
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
