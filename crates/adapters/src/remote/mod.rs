// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote command execution adapters

mod ssh;

pub use ssh::SshAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeRemoteShell, RemoteCall};

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Errors from remote command execution
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    #[error("cannot open remote session to {host}: {reason}")]
    Connection { host: String, reason: String },
    #[error("authentication rejected for {user}@{host}")]
    Auth { user: String, host: String },
    #[error("remote command failed (exit {code:?}): {stderr}")]
    CommandFailed { code: Option<i32>, stderr: String },
}

/// Where and as whom to run a remote command
#[derive(Clone, PartialEq, Eq)]
pub struct RemoteTarget {
    pub host: String,
    pub user: String,
    /// `None` means key-based authentication
    pub password: Option<String>,
}

impl fmt::Debug for RemoteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteTarget")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Adapter for running one command on a remote host
#[async_trait]
pub trait RemoteShell: Clone + Send + Sync + 'static {
    /// Run `command` on `target`, returning its stdout trimmed of
    /// surrounding whitespace
    async fn exec(&self, target: &RemoteTarget, command: &str) -> Result<String, RemoteError>;
}
