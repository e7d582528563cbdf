// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Vendor-independent model: VRFs

use crate::bgp::BgpProcess;
use crate::evpn::Layer2Vni;
use crate::generated::GeneratedRoute;
use crate::ospf::OspfProcess;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vrf {
    pub name: String,
    pub bgp: Option<BgpProcess>,
    pub ospf: Option<OspfProcess>,
    pub generated_routes: BTreeSet<GeneratedRoute>,
    pub layer2_vnis: BTreeMap<u32, Layer2Vni>,
}

impl Vrf {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            bgp: None,
            ospf: None,
            generated_routes: BTreeSet::new(),
            layer2_vnis: BTreeMap::new(),
        }
    }
    pub fn set_bgp(&mut self, bgp: BgpProcess) -> &Self {
        self.bgp = Some(bgp);
        self
    }
    pub fn set_ospf(&mut self, ospf: OspfProcess) -> &Self {
        self.ospf = Some(ospf);
        self
    }
    pub fn add_generated_route(&mut self, route: GeneratedRoute) {
        self.generated_routes.insert(route);
    }
    pub fn add_layer2_vni(&mut self, vni: Layer2Vni) {
        self.layer2_vnis.insert(vni.vni, vni);
    }
}
