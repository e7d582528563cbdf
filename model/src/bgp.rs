// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Vendor-independent model: BGP processes and peers

use crate::errors::{ModelError, ModelResult};
use crate::evpn::EvpnAddressFamily;
use crate::generated::GeneratedRoute;
use prefix::{Prefix, PrefixSpace};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use std::net::Ipv4Addr;

/* ===== AS number spaces ===== */

/// A set of AS numbers, kept as sorted, disjoint, non-adjacent inclusive ranges
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AsnSpace(Vec<(u32, u32)>);

impl AsnSpace {
    /// Every valid AS number: [1, 2^32 - 1]
    #[must_use]
    pub fn all() -> Self {
        Self(vec![(1, u32::MAX)])
    }
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
    #[must_use]
    pub fn singleton(asn: u32) -> Self {
        Self(vec![(asn, asn)])
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    #[must_use]
    pub fn contains(&self, asn: u32) -> bool {
        self.0.iter().any(|(lo, hi)| *lo <= asn && asn <= *hi)
    }
    #[must_use]
    pub fn ranges(&self) -> &[(u32, u32)] {
        &self.0
    }
    /// Number of AS numbers in the space
    #[must_use]
    pub fn size(&self) -> u64 {
        self.0
            .iter()
            .map(|(lo, hi)| u64::from(*hi) - u64::from(*lo) + 1)
            .sum()
    }
    /// The AS numbers of `self` that are not in `other`
    #[must_use]
    pub fn difference(&self, other: &AsnSpace) -> AsnSpace {
        let mut result = self.0.clone();
        for &(olo, ohi) in &other.0 {
            result = result
                .into_iter()
                .flat_map(|(lo, hi)| {
                    if ohi < lo || olo > hi {
                        return vec![(lo, hi)];
                    }
                    let mut pieces = Vec::with_capacity(2);
                    if olo > lo {
                        pieces.push((lo, olo - 1));
                    }
                    if ohi < hi {
                        pieces.push((ohi + 1, hi));
                    }
                    pieces
                })
                .collect();
        }
        AsnSpace(result)
    }
}

impl Display for AsnSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ranges: Vec<String> = self
            .0
            .iter()
            .map(|(lo, hi)| {
                if lo == hi {
                    lo.to_string()
                } else {
                    format!("{lo}-{hi}")
                }
            })
            .collect();
        write!(f, "{{{}}}", ranges.join(","))
    }
}

/* ===== address families ===== */

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AddressFamilyCapabilities {
    pub send_community: bool,
    pub send_extended_community: bool,
    pub allow_local_as_in: bool,
}

impl AddressFamilyCapabilities {
    /// Send both standard and extended communities
    #[must_use]
    pub fn send_communities() -> Self {
        Self {
            send_community: true,
            send_extended_community: true,
            allow_local_as_in: false,
        }
    }
    #[must_use]
    pub fn set_allow_local_as_in(mut self, value: bool) -> Self {
        self.allow_local_as_in = value;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ipv4UnicastAddressFamily {
    pub capabilities: AddressFamilyCapabilities,
    pub export_policy: String,
    /// No import policy means every route is accepted
    pub import_policy: Option<String>,
    pub route_reflector_client: bool,
}

/* ===== peers ===== */

/// How a peer is identified within its BGP process
#[derive(Clone, Debug, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BgpPeerId {
    /// a peer with a known address
    Address(Ipv4Addr),
    /// an unnumbered peer, reached over the named interface
    Interface(String),
}

impl Display for BgpPeerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BgpPeerId::Address(a) => write!(f, "{a}"),
            BgpPeerId::Interface(ifname) => write!(f, "{ifname}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BgpPeerConfig {
    pub id: BgpPeerId,
    pub local_ip: Option<Ipv4Addr>,
    pub description: Option<String>,
    pub group: Option<String>,
    pub local_as: Option<u32>,
    pub remote_asns: AsnSpace,
    pub confederation: Option<u32>,
    pub ebgp_multihop: bool,
    pub generated_routes: BTreeSet<GeneratedRoute>,
    pub ipv4_unicast: Option<Ipv4UnicastAddressFamily>,
    pub evpn: Option<EvpnAddressFamily>,
}

impl BgpPeerConfig {
    #[must_use]
    pub fn new(id: BgpPeerId) -> Self {
        Self {
            id,
            local_ip: None,
            description: None,
            group: None,
            local_as: None,
            remote_asns: AsnSpace::empty(),
            confederation: None,
            ebgp_multihop: false,
            generated_routes: BTreeSet::new(),
            ipv4_unicast: None,
            evpn: None,
        }
    }
    #[must_use]
    pub fn set_local_ip(mut self, local_ip: Option<Ipv4Addr>) -> Self {
        self.local_ip = local_ip;
        self
    }
    #[must_use]
    pub fn set_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }
    #[must_use]
    pub fn set_group(mut self, group: Option<String>) -> Self {
        self.group = group;
        self
    }
    #[must_use]
    pub fn set_local_as(mut self, local_as: Option<u32>) -> Self {
        self.local_as = local_as;
        self
    }
    #[must_use]
    pub fn set_remote_asns(mut self, remote_asns: AsnSpace) -> Self {
        self.remote_asns = remote_asns;
        self
    }
    #[must_use]
    pub fn set_confederation(mut self, confederation: Option<u32>) -> Self {
        self.confederation = confederation;
        self
    }
    #[must_use]
    pub fn set_ebgp_multihop(mut self, value: bool) -> Self {
        self.ebgp_multihop = value;
        self
    }
    #[must_use]
    pub fn add_generated_route(mut self, route: GeneratedRoute) -> Self {
        self.generated_routes.insert(route);
        self
    }
    #[must_use]
    pub fn set_ipv4_unicast(mut self, af: Option<Ipv4UnicastAddressFamily>) -> Self {
        self.ipv4_unicast = af;
        self
    }
    #[must_use]
    pub fn set_evpn(mut self, af: Option<EvpnAddressFamily>) -> Self {
        self.evpn = af;
        self
    }
}

/* ===== processes ===== */

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MultipathMatchMode {
    /// paths must have identical AS paths
    #[default]
    ExactPath,
    /// paths must have AS paths of the same length
    PathLength,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BgpConfederation {
    pub id: u32,
    pub members: BTreeSet<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BgpProcess {
    pub router_id: Ipv4Addr,
    pub ebgp_admin: u32,
    pub ibgp_admin: u32,
    pub multipath_ebgp: bool,
    pub multipath_ibgp: bool,
    pub multipath_match_mode: MultipathMatchMode,
    pub confederation: Option<BgpConfederation>,
    pub origination_space: PrefixSpace,
    pub active_peers: BTreeMap<Ipv4Addr, BgpPeerConfig>,
    pub interface_peers: BTreeMap<String, BgpPeerConfig>,
}

impl BgpProcess {
    #[must_use]
    pub fn new(router_id: Ipv4Addr, ebgp_admin: u32, ibgp_admin: u32) -> Self {
        Self {
            router_id,
            ebgp_admin,
            ibgp_admin,
            multipath_ebgp: false,
            multipath_ibgp: false,
            multipath_match_mode: MultipathMatchMode::default(),
            confederation: None,
            origination_space: PrefixSpace::new(),
            active_peers: BTreeMap::new(),
            interface_peers: BTreeMap::new(),
        }
    }
    #[must_use]
    pub fn set_multipath_ebgp(mut self, value: bool) -> Self {
        self.multipath_ebgp = value;
        self
    }
    #[must_use]
    pub fn set_multipath_ibgp(mut self, value: bool) -> Self {
        self.multipath_ibgp = value;
        self
    }
    #[must_use]
    pub fn set_multipath_match_mode(mut self, mode: MultipathMatchMode) -> Self {
        self.multipath_match_mode = mode;
        self
    }
    #[must_use]
    pub fn set_confederation(mut self, confederation: Option<BgpConfederation>) -> Self {
        self.confederation = confederation;
        self
    }
    pub fn add_to_origination_space(&mut self, prefix: Prefix) {
        self.origination_space.add_prefix(prefix);
    }

    /// Register a peer, keyed by its address or its interface
    pub fn add_peer(&mut self, peer: BgpPeerConfig) -> ModelResult {
        match &peer.id {
            BgpPeerId::Address(address) => {
                if self.active_peers.contains_key(address) {
                    return Err(ModelError::duplicate("BGP peer", address.to_string()));
                }
                self.active_peers.insert(*address, peer);
            }
            BgpPeerId::Interface(ifname) => {
                if self.interface_peers.contains_key(ifname) {
                    return Err(ModelError::duplicate("BGP peer", ifname.clone()));
                }
                self.interface_peers.insert(ifname.clone(), peer);
            }
        }
        Ok(())
    }
    /// Iterate over all peers, active ones first
    pub fn peers(&self) -> impl Iterator<Item = &BgpPeerConfig> {
        self.active_peers
            .values()
            .chain(self.interface_peers.values())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn asn_space_difference() {
        let external = AsnSpace::all().difference(&AsnSpace::singleton(65000));
        assert_eq!(external.ranges(), &[(1, 64999), (65001, u32::MAX)]);
        assert!(!external.contains(65000));
        assert!(external.contains(1));
        assert!(external.contains(u32::MAX));
        assert!(!external.contains(0));
        assert_eq!(external.size(), u64::from(u32::MAX) - 1);
        assert_eq!(external.to_string(), "{1-64999,65001-4294967295}");
    }

    #[test]
    fn asn_space_difference_at_edges() {
        let space = AsnSpace::all().difference(&AsnSpace::singleton(1));
        assert_eq!(space.ranges(), &[(2, u32::MAX)]);
        let space = space.difference(&AsnSpace::singleton(u32::MAX));
        assert_eq!(space.ranges(), &[(2, u32::MAX - 1)]);
        assert!(AsnSpace::singleton(7).difference(&AsnSpace::singleton(7)).is_empty());
    }

    #[test]
    fn duplicate_peers_are_rejected() {
        let mut process = BgpProcess::new(Ipv4Addr::new(1, 1, 1, 1), 20, 200);
        let address = Ipv4Addr::new(10, 0, 0, 2);
        assert!(process
            .add_peer(BgpPeerConfig::new(BgpPeerId::Address(address)))
            .is_ok());
        assert!(process
            .add_peer(BgpPeerConfig::new(BgpPeerId::Interface("swp1".to_owned())))
            .is_ok());
        assert!(process
            .add_peer(BgpPeerConfig::new(BgpPeerId::Address(address)))
            .is_err());
        assert_eq!(process.peers().count(), 2);
    }
}
