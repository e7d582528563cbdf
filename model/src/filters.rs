// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Named match lists: route filter lists, community lists and AS-path access lists.
//! All of them are evaluated line by line, first match wins.

use crate::protocol::LineAction;
use prefix::{Prefix, PrefixRange};
use std::fmt::Display;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Community {
    Standard(u16, u16),
    NoAdvertise,
    NoExport,
    NoPeer,
    Blackhole,
    LocalAs,
    GracefulShutdown,
    AcceptOwn,
}

impl Display for Community {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Community::Standard(asn, val) => write!(f, "{asn}:{val}"),
            Community::NoAdvertise => write!(f, "no-advertise"),
            Community::NoExport => write!(f, "no-export"),
            Community::NoPeer => write!(f, "no-peer"),
            Community::Blackhole => write!(f, "blackhole"),
            Community::LocalAs => write!(f, "local-AS"),
            Community::GracefulShutdown => write!(f, "graceful-shutdown"),
            Community::AcceptOwn => write!(f, "accept-own"),
        }
    }
}

/* ===== route filter lists ===== */

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteFilterLine {
    pub action: LineAction,
    pub range: PrefixRange,
}

impl RouteFilterLine {
    #[must_use]
    pub fn new(action: LineAction, range: PrefixRange) -> Self {
        Self { action, range }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteFilterList {
    name: String,
    lines: Vec<RouteFilterLine>,
}

impl RouteFilterList {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            lines: vec![],
        }
    }
    #[must_use]
    pub fn add_line(mut self, line: RouteFilterLine) -> Self {
        self.lines.push(line);
        self
    }
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
    #[must_use]
    pub fn lines(&self) -> &[RouteFilterLine] {
        &self.lines
    }
    /// Tell if the first line matching `prefix` permits it. Unmatched prefixes are denied.
    #[must_use]
    pub fn permits(&self, prefix: &Prefix) -> bool {
        self.lines
            .iter()
            .find(|line| line.range.includes(prefix))
            .is_some_and(|line| line.action == LineAction::Permit)
    }
}

/* ===== community lists ===== */

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommunityListLine {
    pub action: LineAction,
    pub community: Community,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommunityList {
    name: String,
    lines: Vec<CommunityListLine>,
    invert_match: bool,
}

impl CommunityList {
    #[must_use]
    pub fn new(name: &str, lines: Vec<CommunityListLine>, invert_match: bool) -> Self {
        Self {
            name: name.to_owned(),
            lines,
            invert_match,
        }
    }
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
    #[must_use]
    pub fn lines(&self) -> &[CommunityListLine] {
        &self.lines
    }
    #[must_use]
    pub fn invert_match(&self) -> bool {
        self.invert_match
    }
}

/* ===== AS-path access lists ===== */

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AsPathAccessListLine {
    pub action: LineAction,
    pub regex: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AsPathAccessList {
    name: String,
    lines: Vec<AsPathAccessListLine>,
}

impl AsPathAccessList {
    #[must_use]
    pub fn new(name: &str, lines: Vec<AsPathAccessListLine>) -> Self {
        Self {
            name: name.to_owned(),
            lines,
        }
    }
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
    #[must_use]
    pub fn lines(&self) -> &[AsPathAccessListLine] {
        &self.lines
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn route_filter_first_match_wins() {
        let agg = Prefix::expect_from("10.0.0.0/8");
        let rfl = RouteFilterList::new("rfl")
            .add_line(RouteFilterLine::new(
                LineAction::Deny,
                PrefixRange::exact(Prefix::expect_from("10.1.0.0/16")),
            ))
            .add_line(RouteFilterLine::new(
                LineAction::Permit,
                PrefixRange::more_specific_than(agg),
            ));
        assert!(!rfl.permits(&Prefix::expect_from("10.1.0.0/16")));
        assert!(rfl.permits(&Prefix::expect_from("10.2.0.0/16")));
        assert!(!rfl.permits(&agg));
        assert!(!rfl.permits(&Prefix::expect_from("192.168.0.0/16")));
    }
}
