// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the engine

use mqlog_adapters::{RemoteError, TransportError};
use mqlog_storage::StorageError;
use thiserror::Error;

/// Errors that stop the logger
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("event log: {0}")]
    Storage(#[from] StorageError),
    #[error("transport: {0}")]
    Transport(#[from] TransportError),
    #[error("remote pre-check: {0}")]
    Remote(#[from] RemoteError),
    #[error("remote pre-check: expected '{expected}', remote reported '{actual}'")]
    PrecheckFailed { expected: String, actual: String },
}
