// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::remote::{RemoteError, RemoteShell, RemoteTarget};
use crate::transport::{Transport, TransportError};
use async_trait::async_trait;
use mqlog_core::Qos;
use tracing::Instrument;

/// Wrapper that adds tracing to any Transport
#[derive(Clone)]
pub struct TracedTransport<T> {
    inner: T,
}

impl<T> TracedTransport<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<T: Transport> Transport for TracedTransport<T> {
    async fn subscribe(&self, filter: &str, qos: Qos) -> Result<(), TransportError> {
        let span = tracing::info_span!("transport.subscribe", filter, qos = %qos);

        async {
            // Precondition: a filter must name at least one level
            if filter.is_empty() {
                tracing::error!("empty topic filter");
                return Err(TransportError::Subscribe {
                    filter: String::new(),
                    reason: "topic filter is empty".to_string(),
                });
            }

            let result = self.inner.subscribe(filter, qos).await;
            match &result {
                Ok(()) => tracing::info!("subscribe requested"),
                Err(e) => tracing::error!(error = %e, "subscribe failed"),
            }

            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any RemoteShell
#[derive(Clone)]
pub struct TracedRemoteShell<R> {
    inner: R,
}

impl<R> TracedRemoteShell<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<R: RemoteShell> RemoteShell for TracedRemoteShell<R> {
    async fn exec(&self, target: &RemoteTarget, command: &str) -> Result<String, RemoteError> {
        let span = tracing::info_span!(
            "remote.exec",
            host = %target.host,
            user = %target.user,
            password = target.password.is_some()
        );

        async {
            tracing::info!(command, "starting");

            // Precondition: there must be something to run
            if command.trim().is_empty() {
                tracing::error!("empty remote command");
                return Err(RemoteError::CommandFailed {
                    code: None,
                    stderr: "remote command is empty".to_string(),
                });
            }

            let start = std::time::Instant::now();
            let result = self.inner.exec(target, command).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(stdout) => tracing::info!(
                    stdout = %stdout,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "command finished"
                ),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "command failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
