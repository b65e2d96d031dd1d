// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! mqlog-core: data model for the mqlog event logger
//!
//! This crate provides:
//! - Event records captured from a publish/subscribe feed
//! - Quality-of-service levels and team subscription filters
//! - A clock abstraction for testable capture timestamps

pub mod clock;
pub mod qos;
pub mod record;
pub mod subscription;

pub use clock::{Clock, FakeClock, SystemClock};
pub use qos::Qos;
pub use record::{format_timestamp, EventRecord, InboundMessage, RecordError, COLUMNS};
pub use subscription::{team_filter, Subscription};
