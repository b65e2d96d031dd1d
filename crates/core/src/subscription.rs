// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Topic scoping for the team prefix

use crate::qos::Qos;

/// Multi-level wildcard matching the rest of a topic hierarchy
pub const MULTI_LEVEL_WILDCARD: &str = "#";

/// A subscription request the logger hands to the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub filter: String,
    pub qos: Qos,
}

impl Subscription {
    /// Subscribe to the whole subtree under `team_prefix`, at-least-once.
    pub fn for_team(team_prefix: &str) -> Self {
        Self {
            filter: team_filter(team_prefix),
            qos: Qos::AtLeastOnce,
        }
    }
}

/// `u01` -> `u01/#`
pub fn team_filter(team_prefix: &str) -> String {
    format!("{}/{}", team_prefix, MULTI_LEVEL_WILDCARD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_filter_appends_wildcard() {
        assert_eq!(team_filter("u01"), "u01/#");
        assert_eq!(team_filter("qa"), "qa/#");
    }

    #[test]
    fn team_subscription_is_at_least_once() {
        let sub = Subscription::for_team("u01");
        assert_eq!(sub.filter, "u01/#");
        assert_eq!(sub.qos, Qos::AtLeastOnce);
    }
}
