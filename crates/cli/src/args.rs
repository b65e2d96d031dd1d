// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line surface and the settings derived from it

use clap::Parser;
use mqlog_adapters::RemoteTarget;
use mqlog_engine::{Precheck, PrecheckPolicy};
use std::path::PathBuf;

use crate::error::CliError;

#[derive(Parser, Debug)]
#[command(
    name = "mqlog",
    version,
    about = "Log an MQTT v5 topic tree to a crash-safe CSV file"
)]
pub struct Args {
    /// Broker address
    #[arg(long, env = "MQLOG_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Broker port
    #[arg(long, env = "MQLOG_PORT", default_value_t = 1883)]
    pub port: u16,

    /// Topic prefix; the logger subscribes to <team>/#
    #[arg(long, env = "MQLOG_TEAM", default_value = "u01", value_parser = parse_team)]
    pub team: String,

    /// Event log path
    #[arg(long, env = "MQLOG_CSV", default_value = "mqtt_log.csv")]
    pub csv: PathBuf,

    /// Run a remote status check over SSH before connecting
    #[arg(long, env = "MQLOG_SSH_HOST")]
    pub ssh_host: Option<String>,

    /// SSH user (defaults to $USER)
    #[arg(long, env = "MQLOG_SSH_USER")]
    pub ssh_user: Option<String>,

    /// SSH password (prompted when --ssh-host is set and this is omitted)
    #[arg(long, env = "MQLOG_SSH_PASS", hide_env_values = true)]
    pub ssh_pass: Option<String>,

    /// Remote command whose output is the service state
    #[arg(long, default_value = Precheck::DEFAULT_COMMAND)]
    pub ssh_cmd: String,

    /// Service state that counts as healthy
    #[arg(long, default_value = Precheck::DEFAULT_EXPECTED)]
    pub ssh_expect: String,

    /// Refuse to start when the remote state is not --ssh-expect
    #[arg(long)]
    pub require_precheck: bool,
}

impl Args {
    /// Pre-check settings, or `None` when no SSH host was given.
    ///
    /// `prompt` is asked for the password when none was supplied; an empty
    /// answer means key-based authentication.
    pub fn precheck<F>(&self, prompt: F) -> Result<Option<Precheck>, CliError>
    where
        F: FnOnce(&str, &str) -> Result<String, CliError>,
    {
        let Some(host) = &self.ssh_host else {
            return Ok(None);
        };

        let user = match &self.ssh_user {
            Some(user) => user.clone(),
            None => std::env::var("USER").map_err(|_| {
                CliError::new("cannot determine SSH user")
                    .hint("Pass --ssh-user <name>")
            })?,
        };

        let password = match &self.ssh_pass {
            Some(password) => Some(password.clone()),
            None => Some(prompt(&user, host)?).filter(|p| !p.is_empty()),
        };

        Ok(Some(Precheck {
            target: RemoteTarget {
                host: host.clone(),
                user,
                password,
            },
            command: self.ssh_cmd.clone(),
            expected: self.ssh_expect.clone(),
            policy: if self.require_precheck {
                PrecheckPolicy::Require
            } else {
                PrecheckPolicy::Warn
            },
        }))
    }
}

/// A team prefix is one or more literal topic levels: no wildcards, no
/// leading or trailing separator.
fn parse_team(raw: &str) -> Result<String, String> {
    if raw.is_empty() {
        return Err("team prefix must not be empty".to_string());
    }
    if raw.contains(['#', '+']) {
        return Err("team prefix must not contain MQTT wildcards".to_string());
    }
    if raw.starts_with('/') || raw.ends_with('/') {
        return Err("team prefix must not start or end with '/'".to_string());
    }
    Ok(raw.to_string())
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
