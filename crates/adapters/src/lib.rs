// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: the broker session, the remote shell, and
//! the raw TCP echo probe

pub mod probe;
pub mod remote;
pub mod traced;
pub mod transport;

pub use probe::ProbeError;
pub use remote::{RemoteError, RemoteShell, RemoteTarget, SshAdapter};
pub use traced::{TracedRemoteShell, TracedTransport};
pub use transport::{MqttConfig, MqttTransport, Transport, TransportError, TransportEvent};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use remote::{FakeRemoteShell, RemoteCall};
#[cfg(any(test, feature = "test-support"))]
pub use transport::{FakeTransport, TransportCall};
