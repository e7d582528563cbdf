// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Prefix ranges and prefix spaces, as used by route filters and
//! destination-network matches.

use crate::prefix::Prefix;
use std::collections::BTreeSet;
use std::fmt::Display;

/// A set of prefixes described by a covering prefix and a range of admissible
/// lengths. A range whose minimum length exceeds its maximum matches nothing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrefixRange {
    pub prefix: Prefix,
    pub min_len: u8,
    pub max_len: u8,
}

impl PrefixRange {
    #[must_use]
    pub fn new(prefix: Prefix, min_len: u8, max_len: u8) -> Self {
        Self {
            prefix,
            min_len,
            max_len,
        }
    }

    /// The range containing exactly `prefix`
    #[must_use]
    pub fn exact(prefix: Prefix) -> Self {
        Self::new(prefix, prefix.length(), prefix.length())
    }

    /// The range of all prefixes strictly more specific than `prefix`
    #[must_use]
    pub fn more_specific_than(prefix: Prefix) -> Self {
        Self::new(prefix, prefix.length() + 1, Prefix::MAX_LEN)
    }

    /// Tell if `other` belongs to this range
    #[must_use]
    pub fn includes(&self, other: &Prefix) -> bool {
        let len = other.length();
        self.min_len <= len && len <= self.max_len && self.prefix.covers(other)
    }
}

impl Display for PrefixRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}-{}", self.prefix, self.min_len, self.max_len)
    }
}

/// A union of prefix ranges
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrefixSpace(BTreeSet<PrefixRange>);

impl PrefixSpace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    #[must_use]
    pub fn from_range(range: PrefixRange) -> Self {
        let mut space = Self::new();
        space.add_range(range);
        space
    }
    pub fn add_range(&mut self, range: PrefixRange) {
        self.0.insert(range);
    }
    pub fn add_prefix(&mut self, prefix: Prefix) {
        self.add_range(PrefixRange::exact(prefix));
    }
    #[must_use]
    pub fn contains_prefix(&self, prefix: &Prefix) -> bool {
        self.0.iter().any(|range| range.includes(prefix))
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn ranges(&self) -> impl Iterator<Item = &PrefixRange> {
        self.0.iter()
    }
}

impl Display for PrefixSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ranges: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{{{}}}", ranges.join(", "))
    }
}
