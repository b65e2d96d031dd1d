// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! OpenSSH remote shell adapter

use super::{RemoteError, RemoteShell, RemoteTarget};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

/// ssh's own exit status for connection-level failures
const SSH_CONNECTION_FAILURE: i32 = 255;
/// sshpass exit status for a rejected password
const SSHPASS_BAD_PASSWORD: i32 = 5;
/// sshpass exit status for an unknown host key it cannot confirm
const SSHPASS_HOST_KEY_UNKNOWN: i32 = 6;

/// Runs commands through the system `ssh` binary.
///
/// Password logins go through `sshpass -e`, so the password travels in the
/// environment and never on a command line.
#[derive(Clone)]
pub struct SshAdapter {
    connect_timeout_secs: u64,
}

impl SshAdapter {
    pub fn new() -> Self {
        Self {
            connect_timeout_secs: 10,
        }
    }
}

impl Default for SshAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteShell for SshAdapter {
    async fn exec(&self, target: &RemoteTarget, command: &str) -> Result<String, RemoteError> {
        let via_sshpass = target.password.is_some();
        let mut cmd = match &target.password {
            Some(password) => {
                let mut c = Command::new("sshpass");
                c.arg("-e").arg("ssh").env("SSHPASS", password);
                c
            }
            None => {
                let mut c = Command::new("ssh");
                c.args(["-o", "BatchMode=yes"]);
                c
            }
        };

        cmd.arg("-o")
            .arg(format!("ConnectTimeout={}", self.connect_timeout_secs))
            .args(["-o", "StrictHostKeyChecking=accept-new"])
            .arg("-l")
            .arg(&target.user)
            .arg(&target.host)
            .arg(command)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = cmd.output().await.map_err(|e| RemoteError::Connection {
            host: target.host.clone(),
            reason: format!(
                "failed to run {}: {}",
                if via_sshpass { "sshpass" } else { "ssh" },
                e
            ),
        })?;

        classify(
            target,
            via_sshpass,
            output.status.code(),
            &String::from_utf8_lossy(&output.stdout),
            &String::from_utf8_lossy(&output.stderr),
        )
    }
}

/// Map an ssh exit to the remote command's answer or an error.
///
/// A non-zero exit with output is still an answer: `systemctl is-active`
/// exits 3 for an inactive unit and prints its state.
pub(crate) fn classify(
    target: &RemoteTarget,
    via_sshpass: bool,
    code: Option<i32>,
    stdout: &str,
    stderr: &str,
) -> Result<String, RemoteError> {
    let auth_rejected = stderr.contains("Permission denied")
        || (via_sshpass && code == Some(SSHPASS_BAD_PASSWORD));
    if auth_rejected {
        return Err(RemoteError::Auth {
            user: target.user.clone(),
            host: target.host.clone(),
        });
    }

    let connection_failed = code == Some(SSH_CONNECTION_FAILURE)
        || (via_sshpass && code == Some(SSHPASS_HOST_KEY_UNKNOWN));
    if connection_failed {
        return Err(RemoteError::Connection {
            host: target.host.clone(),
            reason: stderr.trim().to_string(),
        });
    }

    let answer = stdout.trim();
    if code != Some(0) && answer.is_empty() {
        return Err(RemoteError::CommandFailed {
            code,
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(answer.to_string())
}

#[cfg(test)]
#[path = "ssh_tests.rs"]
mod tests;
