// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake remote shell for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{RemoteError, RemoteShell, RemoteTarget};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Recorded remote command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCall {
    pub host: String,
    pub user: String,
    pub command: String,
}

/// Fake remote shell returning a canned response
#[derive(Clone)]
pub struct FakeRemoteShell {
    calls: Arc<Mutex<Vec<RemoteCall>>>,
    response: Arc<Mutex<Result<String, RemoteError>>>,
}

impl FakeRemoteShell {
    /// A shell whose commands all print `stdout`
    pub fn answering(stdout: &str) -> Self {
        Self {
            calls: Arc::default(),
            response: Arc::new(Mutex::new(Ok(stdout.to_string()))),
        }
    }

    /// A shell whose commands all fail with `error`
    pub fn failing(error: RemoteError) -> Self {
        Self {
            calls: Arc::default(),
            response: Arc::new(Mutex::new(Err(error))),
        }
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<RemoteCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Default for FakeRemoteShell {
    fn default() -> Self {
        Self::answering("active")
    }
}

#[async_trait]
impl RemoteShell for FakeRemoteShell {
    async fn exec(&self, target: &RemoteTarget, command: &str) -> Result<String, RemoteError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RemoteCall {
                host: target.host.clone(),
                user: target.user.clone(),
                command: command.to_string(),
            });

        let response = self.response.lock().unwrap_or_else(|e| e.into_inner());
        match &*response {
            Ok(stdout) => Ok(stdout.trim().to_string()),
            Err(e) => Err(e.clone()),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
