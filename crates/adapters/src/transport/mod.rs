// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Publish/subscribe transport adapters

mod mqtt;

pub use mqtt::{MqttConfig, MqttTransport};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeTransport, TransportCall};

use async_trait::async_trait;
use mqlog_core::{InboundMessage, Qos};
use thiserror::Error;

/// Errors from transport operations
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("cannot reach broker at {addr}: {reason}")]
    Connect { addr: String, reason: String },
    #[error("subscribe to '{filter}' failed: {reason}")]
    Subscribe { filter: String, reason: String },
    #[error("transport event channel closed")]
    ChannelClosed,
}

/// What the transport pushes onto the event channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// A session was established (sent again after every reconnect)
    Connected { code: String },
    /// A message arrived on a subscribed topic
    Message(InboundMessage),
}

/// Control surface of an established transport session.
///
/// Inbound traffic does not flow through this trait; it arrives on the
/// event channel handed to the concrete transport at connect time.
#[async_trait]
pub trait Transport: Clone + Send + Sync + 'static {
    /// Request a subscription to `filter`
    async fn subscribe(&self, filter: &str, qos: Qos) -> Result<(), TransportError>;
}
