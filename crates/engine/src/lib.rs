// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! mqlog engine: drains transport events into the durable event log

mod error;
mod logger;
mod precheck;
mod runtime;

pub use error::EngineError;
pub use logger::EventLogger;
pub use precheck::{Precheck, PrecheckOutcome, PrecheckPolicy};
pub use runtime::{run, RunSummary};
