// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! L2VPN EVPN address family of BGP peers

use crate::warnings::Warnings;
use model::Configuration;
use model::bgp::AddressFamilyCapabilities;
use model::evpn::{
    EvpnAddressFamily, Layer2VniConfig, Layer3VniConfig, RouteDistinguisher, RouteTarget,
    import_rt_pattern_for_any_as,
};
use std::collections::{BTreeMap, BTreeSet};
use std::net::Ipv4Addr;
use tracing::debug;
use vendor::VendorConfig;
use vendor::bgp::BgpVrf;
use vendor::neighbor::NeighborSettings;
use vendor::vxlan::Vxlan;

/// Route distinguisher index of each VNI: its rank among the distinct VXLAN ids,
/// in ascending order. VXLANs without an id are ignored.
#[must_use]
pub fn vni_index<'a>(vxlans: impl IntoIterator<Item = &'a Vxlan>) -> BTreeMap<u32, u32> {
    let ids: BTreeSet<u32> = vxlans.into_iter().filter_map(|vxlan| vxlan.id).collect();
    ids.into_iter().zip(0..).collect()
}

fn layer2_vnis(
    bgp_vrf: &BgpVrf,
    local_as: u32,
    router_id: Ipv4Addr,
    index: &BTreeMap<u32, u32>,
    config: &Configuration,
    warnings: &mut Warnings,
) -> BTreeSet<Layer2VniConfig> {
    let mut l2_vnis = BTreeSet::new();
    let Some(vrf) = config.vrf(&bgp_vrf.vrf_name) else {
        return l2_vnis;
    };
    for vni in vrf.layer2_vnis.keys() {
        let Some(rd_index) = index.get(vni) else {
            warnings.red_flag_once(format!(
                "Skipping L2 VNI {vni}: no VXLAN device has that id"
            ));
            continue;
        };
        l2_vnis.insert(Layer2VniConfig {
            vni: *vni,
            vrf: bgp_vrf.vrf_name.clone(),
            rd: RouteDistinguisher::new(router_id, *rd_index),
            rt: RouteTarget::for_vni(local_as, *vni),
        });
    }
    l2_vnis
}

/// L3 VNIs of all the VRFs, whether they run BGP or not
fn layer3_vnis(
    vendor: &VendorConfig,
    local_as: u32,
    router_id: Ipv4Addr,
    index: &BTreeMap<u32, u32>,
    config: &Configuration,
    warnings: &mut Warnings,
) -> BTreeSet<Layer3VniConfig> {
    let mut l3_vnis = BTreeSet::new();
    for vrf_cfg in vendor.vrfs.l3vni_vrfs() {
        let Some(vni) = vrf_cfg.vni else {
            continue;
        };
        let Some(rd_index) = index.get(&vni) else {
            warnings.red_flag_once(format!(
                "Skipping L3 VNI {vni} of vrf {}: no VXLAN device has that id",
                vrf_cfg.name
            ));
            continue;
        };
        let rd_ip = config
            .vrf(&vrf_cfg.name)
            .and_then(|vrf| vrf.bgp.as_ref())
            .map_or(router_id, |bgp| bgp.router_id);
        let advertise_v4_unicast = vendor
            .bgp
            .as_ref()
            .and_then(|bgp| bgp.vrf(&vrf_cfg.name))
            .and_then(|bgp_vrf| bgp_vrf.af_l2vpnevpn.as_ref())
            .is_some_and(|af| af.adv_ipv4_unicast);
        l3_vnis.insert(Layer3VniConfig {
            vni,
            vrf: vrf_cfg.name.clone(),
            rd: RouteDistinguisher::new(rd_ip, *rd_index),
            rt: RouteTarget::for_vni(local_as, vni),
            import_route_target: import_rt_pattern_for_any_as(vni),
            advertise_v4_unicast,
        });
    }
    l3_vnis
}

/// EVPN address family of a peer. It exists only if the instance has an L2VPN EVPN
/// address family and a local AS, and the neighbor explicitly activated it.
/// `router_id` is the one of the process the peer belongs to.
#[must_use]
pub fn evpn_address_family(
    vendor: &VendorConfig,
    bgp_vrf: &BgpVrf,
    settings: &NeighborSettings,
    router_id: Ipv4Addr,
    export_policy: &str,
    config: &Configuration,
    warnings: &mut Warnings,
) -> Option<EvpnAddressFamily> {
    let evpn = bgp_vrf.af_l2vpnevpn.as_ref()?;
    let local_as = bgp_vrf.asn?;
    let neighbor_af = settings.l2vpn_evpn.as_ref()?;
    if !neighbor_af.activated.unwrap_or(false) {
        return None;
    }
    debug!("Building EVPN address family for BGP neighbor {}", settings.name);

    let index = vni_index(vendor.vxlans.values());
    let l2_vnis = if evpn.adv_all_vni {
        layer2_vnis(bgp_vrf, local_as, router_id, &index, config, warnings)
    } else {
        BTreeSet::new()
    };
    let l3_vnis = layer3_vnis(vendor, local_as, router_id, &index, config, warnings);

    Some(EvpnAddressFamily {
        l2_vnis,
        l3_vnis,
        propagate_unmatched: true,
        capabilities: AddressFamilyCapabilities::send_communities(),
        route_reflector_client: neighbor_af.route_reflector_client.unwrap_or(false),
        export_policy: export_policy.to_owned(),
    })
}
