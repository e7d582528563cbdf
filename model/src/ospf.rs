// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Vendor-independent model: OSPF

use std::collections::{BTreeMap, BTreeSet};
use std::net::Ipv4Addr;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OspfNetworkType {
    Broadcast,
    PointToPoint,
}

/// OSPF settings of an interface
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OspfInterfaceSettings {
    pub passive: bool,
    pub area: u32,
    pub network_type: Option<OspfNetworkType>,
    pub dead_interval: u32,
    pub hello_interval: u32,
    pub process: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OspfArea {
    pub number: u32,
    pub interfaces: BTreeSet<String>,
}

impl OspfArea {
    #[must_use]
    pub fn new(number: u32) -> Self {
        Self {
            number,
            interfaces: BTreeSet::new(),
        }
    }
    #[must_use]
    pub fn add_interfaces(mut self, interfaces: impl IntoIterator<Item = String>) -> Self {
        self.interfaces.extend(interfaces);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OspfProcess {
    pub process_id: String,
    pub router_id: Ipv4Addr,
    /// bits per second
    pub reference_bandwidth: u64,
    pub areas: BTreeMap<u32, OspfArea>,
}

impl OspfProcess {
    #[must_use]
    pub fn new(process_id: &str, router_id: Ipv4Addr, reference_bandwidth: u64) -> Self {
        Self {
            process_id: process_id.to_owned(),
            router_id,
            reference_bandwidth,
            areas: BTreeMap::new(),
        }
    }
    pub fn set_areas(&mut self, areas: BTreeMap<u32, OspfArea>) {
        self.areas = areas;
    }
}
