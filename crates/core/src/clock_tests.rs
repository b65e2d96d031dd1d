// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::{NaiveDate, Timelike};

fn noon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

#[test]
fn system_clock_has_second_resolution() {
    let now = SystemClock.now();
    assert_eq!(now.nanosecond(), 0);
}

#[test]
fn fake_clock_can_be_advanced() {
    let clock = FakeClock::at(noon());
    clock.advance_secs(61);
    assert_eq!(clock.now(), noon() + TimeDelta::seconds(61));
}

#[test]
fn fake_clock_truncates_subseconds() {
    let clock = FakeClock::at(noon() + TimeDelta::milliseconds(750));
    assert_eq!(clock.now(), noon());
}

#[test]
fn fake_clock_is_cloneable_and_shared() {
    let clock1 = FakeClock::at(noon());
    let clock2 = clock1.clone();
    clock2.advance_secs(30);
    assert_eq!(clock1.now(), noon() + TimeDelta::seconds(30));

    clock1.set(noon());
    assert_eq!(clock2.now(), noon());
}
