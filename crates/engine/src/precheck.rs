// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One-shot remote status check run before the logger starts

use crate::EngineError;
use mqlog_adapters::{RemoteShell, RemoteTarget};
use mqlog_core::{format_timestamp, Clock};
use std::io::Write;
use tracing::warn;

/// What to do when the remote reports an unexpected status.
///
/// Failing to reach or authenticate to the remote is fatal either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrecheckPolicy {
    /// Report the status and carry on
    #[default]
    Warn,
    /// Refuse to start unless the status matches
    Require,
}

/// Result of a pre-check that reached the remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrecheckOutcome {
    Healthy(String),
    Unhealthy(String),
}

/// A remote status check
#[derive(Debug, Clone)]
pub struct Precheck {
    pub target: RemoteTarget,
    pub command: String,
    /// Status the command should print when the dependency is up
    pub expected: String,
    pub policy: PrecheckPolicy,
}

impl Precheck {
    pub const DEFAULT_COMMAND: &'static str = "systemctl is-active mosquitto";
    pub const DEFAULT_EXPECTED: &'static str = "active";

    pub async fn run<R, C, W>(
        &self,
        shell: &R,
        clock: &C,
        console: &mut W,
    ) -> Result<PrecheckOutcome, EngineError>
    where
        R: RemoteShell,
        C: Clock,
        W: Write,
    {
        say(
            console,
            clock,
            &format!(
                "[SSH] Checking '{}' on {} ...",
                self.command, self.target.host
            ),
        );

        let status = shell.exec(&self.target, &self.command).await?;
        say(console, clock, &format!("[SSH] Service state: {}", status));

        if status == self.expected {
            return Ok(PrecheckOutcome::Healthy(status));
        }

        match self.policy {
            PrecheckPolicy::Warn => {
                warn!(
                    host = %self.target.host,
                    expected = %self.expected,
                    actual = %status,
                    "remote dependency is not in the expected state, continuing"
                );
                Ok(PrecheckOutcome::Unhealthy(status))
            }
            PrecheckPolicy::Require => Err(EngineError::PrecheckFailed {
                expected: self.expected.clone(),
                actual: status,
            }),
        }
    }
}

fn say<C: Clock, W: Write>(console: &mut W, clock: &C, text: &str) {
    if let Err(e) = writeln!(console, "[{}] {}", format_timestamp(clock.now()), text) {
        warn!(error = %e, "console write failed");
    }
}

#[cfg(test)]
#[path = "precheck_tests.rs"]
mod tests;
