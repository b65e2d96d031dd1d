// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Startup and runtime failures as the operator sees them.
//!
//! Each failure prints one `error:` line, any detail lines from the
//! underlying error, and numbered suggestions for getting past it.

use mqlog_adapters::{RemoteError, TransportError};
use mqlog_engine::EngineError;
use mqlog_storage::StorageError;
use std::fmt;
use std::path::Path;

/// A failure reported on stderr before exiting non-zero
#[derive(Debug)]
pub struct CliError {
    message: String,
    details: Vec<String>,
    hints: Vec<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: Vec::new(),
            hints: Vec::new(),
        }
    }

    /// Add a line of detail, usually the underlying error
    pub fn detail(mut self, detail: impl fmt::Display) -> Self {
        self.details.push(detail.to_string());
        self
    }

    /// Add a suggestion; suggestions print numbered in insertion order
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    /// The event log could not be opened or written.
    pub fn log_unwritable(path: &Path, reason: impl fmt::Display) -> Self {
        CliError::new(format!("cannot open event log {}", path.display()))
            .detail(reason)
            .hint("Check that the parent directory exists and is writable")
            .hint("Pick another location with --csv <path>")
    }

    /// The target file exists but is not an event log.
    pub fn log_not_ours(path: &Path, found: &str) -> Self {
        CliError::new(format!("{} is not an mqlog event log", path.display()))
            .detail(format!("First line is {:?}", found))
            .hint("Pick another location with --csv <path>")
    }

    /// The broker refused or never answered.
    pub fn broker_unreachable(addr: &str, reason: &str) -> Self {
        CliError::new(format!("cannot reach broker at {}", addr))
            .detail(reason)
            .hint("Check that the broker is running: systemctl status mosquitto")
            .hint("Verify --host and --port")
    }

    /// The pre-check could not open a remote session.
    pub fn remote_unreachable(host: &str, reason: &str) -> Self {
        CliError::new(format!("cannot open SSH session to {}", host))
            .detail(reason)
            .hint("Check that sshd is running on the remote host")
            .hint("Password logins need sshpass installed locally")
            .hint("Skip the pre-check by omitting --ssh-host")
    }

    /// The pre-check credentials were rejected.
    pub fn auth_rejected(user: &str, host: &str) -> Self {
        CliError::new(format!("SSH authentication rejected for {}@{}", user, host))
            .hint("Check --ssh-user and the password")
            .hint("Leave the password prompt empty to use key-based auth")
    }

    /// The remote dependency is not in the required state.
    pub fn precheck_failed(expected: &str, actual: &str) -> Self {
        CliError::new("remote pre-check failed")
            .detail(format!(
                "Expected '{}', remote reported '{}'",
                expected, actual
            ))
            .hint("Start the service on the remote host")
            .hint("Drop --require-precheck to log a warning instead")
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;
        for detail in &self.details {
            writeln!(f, "  -> {}", detail)?;
        }

        if !self.hints.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (n, hint) in self.hints.iter().enumerate() {
                writeln!(f, "  {}. {}", n + 1, hint)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for CliError {}

impl From<EngineError> for CliError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Storage(StorageError::HeaderMismatch { path, found }) => {
                CliError::log_not_ours(&path, &found)
            }
            EngineError::Storage(e) => CliError::new("event log write failed").detail(e),
            EngineError::Transport(TransportError::Connect { addr, reason }) => {
                CliError::broker_unreachable(&addr, &reason)
            }
            EngineError::Transport(e) => CliError::new(e.to_string()),
            EngineError::Remote(RemoteError::Connection { host, reason }) => {
                CliError::remote_unreachable(&host, &reason)
            }
            EngineError::Remote(RemoteError::Auth { user, host }) => {
                CliError::auth_rejected(&user, &host)
            }
            EngineError::Remote(e) => CliError::new(e.to_string()),
            EngineError::PrecheckFailed { expected, actual } => {
                CliError::precheck_failed(&expected, &actual)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_and_numbered_hints() {
        let err = CliError::new("cannot open event log x.csv")
            .detail("Permission denied")
            .detail("read-only file system")
            .hint("Check the directory")
            .hint("Use --csv");

        assert_eq!(
            err.to_string(),
            "error: cannot open event log x.csv\n\
             \x20 -> Permission denied\n\
             \x20 -> read-only file system\n\
             \n\
             suggestions:\n\
             \x20 1. Check the directory\n\
             \x20 2. Use --csv\n"
        );
    }

    #[test]
    fn test_message_only() {
        assert_eq!(CliError::new("boom").to_string(), "error: boom\n");
    }

    #[test]
    fn test_broker_unreachable_from_engine() {
        let err = CliError::from(EngineError::Transport(TransportError::Connect {
            addr: "127.0.0.1:1883".to_string(),
            reason: "Connection refused".to_string(),
        }));
        let output = format!("{}", err);
        assert!(output.contains("cannot reach broker at 127.0.0.1:1883"));
        assert!(output.contains("-> Connection refused"));
    }

    #[test]
    fn test_auth_rejected_from_engine() {
        let err = CliError::from(EngineError::Remote(RemoteError::Auth {
            user: "pi".to_string(),
            host: "broker.lan".to_string(),
        }));
        assert!(format!("{}", err).contains("pi@broker.lan"));
    }

    #[test]
    fn test_precheck_failed_from_engine() {
        let err = CliError::from(EngineError::PrecheckFailed {
            expected: "active".to_string(),
            actual: "inactive".to_string(),
        });
        let output = format!("{}", err);
        assert!(output.contains("remote pre-check failed"));
        assert!(output.contains("--require-precheck"));
    }

    #[test]
    fn test_header_mismatch_from_engine() {
        let err = CliError::from(EngineError::Storage(StorageError::HeaderMismatch {
            path: "notes.csv".into(),
            found: "name,price".to_string(),
        }));
        assert!(format!("{}", err).contains("notes.csv is not an mqlog event log"));
    }
}
