// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Vendor-independent model: EVPN address family and VNIs

use crate::bgp::AddressFamilyCapabilities;
use std::collections::BTreeSet;
use std::fmt::Display;
use std::net::Ipv4Addr;

/// Type-1 route distinguisher (ip:index)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteDistinguisher {
    pub ip: Ipv4Addr,
    pub index: u32,
}

impl RouteDistinguisher {
    #[must_use]
    pub fn new(ip: Ipv4Addr, index: u32) -> Self {
        Self { ip, index }
    }
}

impl Display for RouteDistinguisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.ip, self.index)
    }
}

/// Route-target extended community (asn:value)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteTarget {
    pub asn: u16,
    pub value: u32,
}

impl RouteTarget {
    /// Route target for a VNI. Only the lower 2 bytes of 4-byte AS numbers are kept.
    #[must_use]
    pub fn for_vni(asn: u32, vni: u32) -> Self {
        let [_, _, hi, lo] = asn.to_be_bytes();
        Self {
            asn: u16::from_be_bytes([hi, lo]),
            value: vni,
        }
    }
}

impl Display for RouteTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.asn, self.value)
    }
}

/// Regex matching route targets for `vni` from any AS
#[must_use]
pub fn import_rt_pattern_for_any_as(vni: u32) -> String {
    format!("^\\d+:{vni}$")
}

/// A bridged overlay segment present in a VRF
#[derive(Clone, Debug, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layer2Vni {
    pub vni: u32,
    pub vrf: String,
    pub source_address: Option<Ipv4Addr>,
}

impl Layer2Vni {
    #[must_use]
    pub fn new(vni: u32, vrf: &str) -> Self {
        Self {
            vni,
            vrf: vrf.to_owned(),
            source_address: None,
        }
    }
    #[must_use]
    pub fn set_source_address(mut self, source_address: Option<Ipv4Addr>) -> Self {
        self.source_address = source_address;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layer2VniConfig {
    pub vni: u32,
    pub vrf: String,
    pub rd: RouteDistinguisher,
    pub rt: RouteTarget,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layer3VniConfig {
    pub vni: u32,
    pub vrf: String,
    pub rd: RouteDistinguisher,
    pub rt: RouteTarget,
    pub import_route_target: String,
    pub advertise_v4_unicast: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvpnAddressFamily {
    pub l2_vnis: BTreeSet<Layer2VniConfig>,
    pub l3_vnis: BTreeSet<Layer3VniConfig>,
    pub propagate_unmatched: bool,
    pub capabilities: AddressFamilyCapabilities,
    pub route_reflector_client: bool,
    pub export_policy: String,
}
