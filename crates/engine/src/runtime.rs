// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-consumer loop between the transport and the logger

use crate::{EngineError, EventLogger};
use mqlog_adapters::{Transport, TransportEvent};
use mqlog_core::Clock;
use std::io::Write;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// What a finished run did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Records appended during this run
    pub recorded: u64,
    /// Sessions established (first connect plus reconnects)
    pub connections: u32,
}

/// Drain `events` into `logger` until shutdown or until the transport goes
/// away.
///
/// Events are handled strictly one at a time, in arrival order. A storage or
/// subscribe failure ends the run with an error; nothing is skipped.
pub async fn run<T, C, W>(
    logger: &mut EventLogger<C, W>,
    transport: &T,
    events: &mut mpsc::Receiver<TransportEvent>,
    shutdown: &CancellationToken,
) -> Result<RunSummary, EngineError>
where
    T: Transport,
    C: Clock,
    W: Write,
{
    let mut summary = RunSummary::default();

    loop {
        let event = tokio::select! {
            biased;
            _ = shutdown.cancelled() => {
                info!("shutdown requested");
                break;
            }
            event = events.recv() => event,
        };

        match event {
            Some(TransportEvent::Connected { code }) => {
                summary.connections += 1;
                let subscription = logger.on_connected(&code);
                transport
                    .subscribe(&subscription.filter, subscription.qos)
                    .await?;
                logger.subscribed(&subscription);
            }
            Some(TransportEvent::Message(message)) => {
                let seq = logger.capture(message)?;
                summary.recorded += 1;
                debug!(seq, "recorded");
            }
            None => {
                info!("transport closed");
                break;
            }
        }
    }

    info!(
        recorded = summary.recorded,
        connections = summary.connections,
        "logger stopped"
    );
    Ok(summary)
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
