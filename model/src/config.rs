// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! The vendor-independent configuration of a device

use crate::errors::{ModelError, ModelResult};
use crate::filters::{AsPathAccessList, CommunityList, RouteFilterList};
use crate::interface::Interface;
use crate::policy::RoutingPolicy;
use crate::vrf::Vrf;
use std::collections::{BTreeMap, BTreeSet};
use std::net::Ipv4Addr;
use tracing::{debug, error};

pub const DEFAULT_VRF_NAME: &str = "default";

/// Every named object (VRF, interface, policy, list) is inserted at most once.
/// Inserting a name twice is refused with [`ModelError::DuplicateName`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Configuration {
    pub hostname: String,
    vrfs: BTreeMap<String, Vrf>,
    interfaces: BTreeMap<String, Interface>,
    routing_policies: BTreeMap<String, RoutingPolicy>,
    route_filter_lists: BTreeMap<String, RouteFilterList>,
    community_lists: BTreeMap<String, CommunityList>,
    as_path_access_lists: BTreeMap<String, AsPathAccessList>,
    pub dns_servers: BTreeSet<Ipv4Addr>,
}

fn insert_unique<T>(
    map: &mut BTreeMap<String, T>,
    kind: &'static str,
    name: &str,
    value: T,
) -> ModelResult {
    if map.contains_key(name) {
        error!("Refusing to add {kind} '{name}': name is already used. This is a bug.");
        return Err(ModelError::duplicate(kind, name));
    }
    debug!("Adding {kind} '{name}'");
    map.insert(name.to_owned(), value);
    Ok(())
}

impl Configuration {
    /// Create a configuration with an empty default VRF
    #[must_use]
    pub fn new(hostname: &str) -> Self {
        let mut vrfs = BTreeMap::new();
        vrfs.insert(DEFAULT_VRF_NAME.to_owned(), Vrf::new(DEFAULT_VRF_NAME));
        Self {
            hostname: hostname.to_owned(),
            vrfs,
            interfaces: BTreeMap::new(),
            routing_policies: BTreeMap::new(),
            route_filter_lists: BTreeMap::new(),
            community_lists: BTreeMap::new(),
            as_path_access_lists: BTreeMap::new(),
            dns_servers: BTreeSet::new(),
        }
    }

    /* ===== VRFs ===== */
    pub fn add_vrf(&mut self, vrf: Vrf) -> ModelResult {
        let name = vrf.name.clone();
        insert_unique(&mut self.vrfs, "VRF", &name, vrf)
    }
    #[must_use]
    pub fn vrf(&self, name: &str) -> Option<&Vrf> {
        self.vrfs.get(name)
    }
    pub fn vrf_mut(&mut self, name: &str) -> Option<&mut Vrf> {
        self.vrfs.get_mut(name)
    }
    pub fn vrfs(&self) -> impl Iterator<Item = &Vrf> {
        self.vrfs.values()
    }
    #[must_use]
    pub fn default_vrf(&self) -> Option<&Vrf> {
        self.vrf(DEFAULT_VRF_NAME)
    }

    /* ===== interfaces ===== */
    pub fn add_interface(&mut self, interface: Interface) -> ModelResult {
        let name = interface.name.clone();
        insert_unique(&mut self.interfaces, "interface", &name, interface)
    }
    #[must_use]
    pub fn interface(&self, name: &str) -> Option<&Interface> {
        self.interfaces.get(name)
    }
    pub fn interface_mut(&mut self, name: &str) -> Option<&mut Interface> {
        self.interfaces.get_mut(name)
    }
    pub fn interfaces(&self) -> impl Iterator<Item = &Interface> {
        self.interfaces.values()
    }
    /// Iterate over the interfaces of a VRF, in name order
    pub fn interfaces_in_vrf(&self, vrf: &str) -> impl Iterator<Item = &Interface> {
        self.interfaces.values().filter(move |i| i.vrf == vrf)
    }

    /* ===== routing policies ===== */
    pub fn add_routing_policy(&mut self, policy: RoutingPolicy) -> ModelResult {
        let name = policy.name().to_owned();
        insert_unique(&mut self.routing_policies, "routing policy", &name, policy)
    }
    /// Insert a policy unless one with the same name exists. In both cases, the
    /// registered policy is returned.
    pub fn get_or_insert_routing_policy(&mut self, policy: RoutingPolicy) -> &RoutingPolicy {
        self.routing_policies
            .entry(policy.name().to_owned())
            .or_insert(policy)
    }
    #[must_use]
    pub fn routing_policy(&self, name: &str) -> Option<&RoutingPolicy> {
        self.routing_policies.get(name)
    }
    pub fn routing_policies(&self) -> impl Iterator<Item = &RoutingPolicy> {
        self.routing_policies.values()
    }
    /// Names called by some policy that do not resolve to any policy
    #[must_use]
    pub fn undefined_policy_calls(&self) -> BTreeSet<String> {
        self.routing_policies
            .values()
            .flat_map(RoutingPolicy::calls)
            .filter(|name| !self.routing_policies.contains_key(name))
            .collect()
    }

    /* ===== match lists ===== */
    pub fn add_route_filter_list(&mut self, list: RouteFilterList) -> ModelResult {
        let name = list.name().to_owned();
        insert_unique(&mut self.route_filter_lists, "route filter list", &name, list)
    }
    #[must_use]
    pub fn route_filter_list(&self, name: &str) -> Option<&RouteFilterList> {
        self.route_filter_lists.get(name)
    }
    pub fn add_community_list(&mut self, list: CommunityList) -> ModelResult {
        let name = list.name().to_owned();
        insert_unique(&mut self.community_lists, "community list", &name, list)
    }
    #[must_use]
    pub fn community_list(&self, name: &str) -> Option<&CommunityList> {
        self.community_lists.get(name)
    }
    pub fn add_as_path_access_list(&mut self, list: AsPathAccessList) -> ModelResult {
        let name = list.name().to_owned();
        insert_unique(&mut self.as_path_access_lists, "AS-path access list", &name, list)
    }
    #[must_use]
    pub fn as_path_access_list(&self, name: &str) -> Option<&AsPathAccessList> {
        self.as_path_access_lists.get(name)
    }
}
