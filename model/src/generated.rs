// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Generated routes: routes installed when their generation policy matches
//! some other route in the RIB (e.g. aggregates, default-originate).

use prefix::Prefix;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratedRoute {
    pub network: Prefix,
    pub admin: u32,
    pub discard: bool,
    pub generation_policy: Option<String>,
}

impl GeneratedRoute {
    #[must_use]
    pub fn new(network: Prefix, admin: u32) -> Self {
        Self {
            network,
            admin,
            discard: false,
            generation_policy: None,
        }
    }
    #[must_use]
    pub fn set_discard(mut self, value: bool) -> Self {
        self.discard = value;
        self
    }
    #[must_use]
    pub fn set_generation_policy(mut self, policy: &str) -> Self {
        self.generation_policy = Some(policy.to_owned());
        self
    }
}
