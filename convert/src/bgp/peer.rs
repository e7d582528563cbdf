// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Second BGP conversion phase: the neighbors of every BGP instance become peers
//! of the process of their VRF.

use crate::bgp::evpn::evpn_address_family;
use crate::bgp::export::{default_originate, generate_peer_export_policy, generate_peer_import_policy};
use crate::bgp::process::ProcessesBuilt;
use crate::errors::{ConvertError, ConvertResult};
use crate::params::ConvertParams;
use crate::warnings::Warnings;
use model::bgp::{
    AddressFamilyCapabilities, AsnSpace, BgpPeerConfig, BgpPeerId, Ipv4UnicastAddressFamily,
};
use model::generated::GeneratedRoute;
use model::{Configuration, ModelError};
use prefix::Prefix;
use std::net::Ipv4Addr;
use tracing::{debug, error};
use vendor::VendorConfig;
use vendor::bgp::BgpVrf;
use vendor::neighbor::{BgpNeighbor, BgpUpdateSource, IpNeighbor, NeighborSettings, RemoteAsType};

/// Local address of unnumbered BGP sessions
pub const BGP_UNNUMBERED_IP: Ipv4Addr = Ipv4Addr::new(169, 254, 0, 1);

/// The AS numbers a neighbor may have, given its remote-as statement and the local AS
pub fn compute_remote_asns(
    settings: &NeighborSettings,
    local_as: Option<u32>,
) -> ConvertResult<AsnSpace> {
    match (settings.remote_as_type, local_as) {
        (Some(RemoteAsType::Explicit), _) => Ok(settings
            .remote_as
            .map_or_else(AsnSpace::empty, AsnSpace::singleton)),
        (_, None) => Ok(AsnSpace::empty()),
        (Some(RemoteAsType::External), Some(local)) => {
            Ok(AsnSpace::all().difference(&AsnSpace::singleton(local)))
        }
        (Some(RemoteAsType::Internal), Some(local)) => Ok(AsnSpace::singleton(local)),
        (None, Some(_)) => {
            error!(
                "BGP neighbor {} has a remote AS but no remote AS type",
                settings.name
            );
            Err(ConvertError::InvalidRemoteAsType(settings.name.clone()))
        }
    }
}

/// A neighbor with neither a remote AS nor a remote AS type can't be a peer
fn is_valid(settings: &NeighborSettings) -> bool {
    settings.remote_as.is_some() || settings.remote_as_type.is_some()
}

fn resolve_update_source(
    source: &BgpUpdateSource,
    neighbor: &str,
    config: &Configuration,
    warnings: &mut Warnings,
) -> Option<Ipv4Addr> {
    match source {
        BgpUpdateSource::Address(address) => Some(*address),
        BgpUpdateSource::Interface(ifname) => {
            let Some(interface) = config.interface(ifname) else {
                warnings.red_flag(format!(
                    "Cannot find interface named {ifname} for update-source of BGP neighbor {neighbor}"
                ));
                return None;
            };
            let Some(primary) = interface.primary else {
                warnings.red_flag(format!(
                    "Cannot find an address for interface named {ifname} for update-source of BGP neighbor {neighbor}"
                ));
                return None;
            };
            Some(primary.address)
        }
    }
}

/// First local address, in the VRF of the peer, sharing a subnet with the peer
fn local_ip_for_peer(config: &Configuration, vrf: &str, peer_ip: Ipv4Addr) -> Option<Ipv4Addr> {
    config
        .interfaces_in_vrf(vrf)
        .flat_map(|interface| interface.all_addresses())
        .find(|address| address.prefix().covers_addr(&peer_ip) && address.address != peer_ip)
        .map(|address| address.address)
}

/// IPv4 unicast address family of a peer, if activated
fn ipv4_unicast_af(
    settings: &NeighborSettings,
    bgp_vrf: &BgpVrf,
    export_policy: &str,
    import_policy: Option<String>,
) -> Option<Ipv4UnicastAddressFamily> {
    let af = settings.ipv4_unicast.clone().unwrap_or_default();
    if !af.activated.unwrap_or(bgp_vrf.default_ipv4_unicast) {
        return None;
    }
    let allow_local_as_in = af.allowas_in.is_some_and(|count| count > 0);
    Some(Ipv4UnicastAddressFamily {
        capabilities: AddressFamilyCapabilities::send_communities()
            .set_allow_local_as_in(allow_local_as_in),
        export_policy: export_policy.to_owned(),
        import_policy,
        route_reflector_client: af.route_reflector_client.unwrap_or(false),
    })
}

/// What the peers of one BGP instance share
struct PeerBuilder<'a> {
    vendor: &'a VendorConfig,
    bgp_vrf: &'a BgpVrf,
    params: &'a ConvertParams,
    router_id: Ipv4Addr,
}

impl PeerBuilder<'_> {
    fn build(
        &self,
        id: BgpPeerId,
        local_ip: Option<Ipv4Addr>,
        settings: &NeighborSettings,
        config: &mut Configuration,
        warnings: &mut Warnings,
    ) -> ConvertResult<BgpPeerConfig> {
        let bgp_vrf = self.bgp_vrf;
        let remote_asns = compute_remote_asns(settings, bgp_vrf.asn)?;
        let route_maps = &self.vendor.route_maps;
        let export_policy =
            generate_peer_export_policy(settings, bgp_vrf, route_maps, config, warnings)?;
        let import_policy =
            generate_peer_import_policy(settings, bgp_vrf, route_maps, config, warnings)?;

        let mut peer = BgpPeerConfig::new(id)
            .set_local_ip(local_ip)
            .set_description(settings.description.clone())
            .set_group(settings.peer_group.clone())
            .set_local_as(bgp_vrf.asn)
            .set_remote_asns(remote_asns)
            .set_confederation(bgp_vrf.confederation_id)
            .set_ebgp_multihop(settings.ebgp_multihop.is_some())
            .set_ipv4_unicast(ipv4_unicast_af(
                settings,
                bgp_vrf,
                &export_policy,
                import_policy,
            ));
        if default_originate(settings) {
            peer = peer.add_generated_route(GeneratedRoute::new(
                Prefix::root(),
                self.params.default_route_admin,
            ));
        }
        let evpn = evpn_address_family(
            self.vendor,
            bgp_vrf,
            settings,
            self.router_id,
            &export_policy,
            config,
            warnings,
        );
        Ok(peer.set_evpn(evpn))
    }

    fn interface_peer(
        &self,
        settings: &NeighborSettings,
        config: &mut Configuration,
        warnings: &mut Warnings,
    ) -> ConvertResult<Option<BgpPeerConfig>> {
        if !is_valid(settings) {
            warnings.red_flag(format!(
                "Skipping invalidly configured BGP peer {}",
                settings.name
            ));
            return Ok(None);
        }
        let id = BgpPeerId::Interface(settings.name.clone());
        let peer = self.build(id, Some(BGP_UNNUMBERED_IP), settings, config, warnings)?;
        Ok(Some(peer))
    }

    fn ip_peer(
        &self,
        neighbor: &IpNeighbor,
        config: &mut Configuration,
        warnings: &mut Warnings,
    ) -> ConvertResult<Option<BgpPeerConfig>> {
        let settings = &neighbor.settings;
        let Some(peer_ip) = neighbor.peer_ip.filter(|_| is_valid(settings)) else {
            warnings.red_flag(format!(
                "Skipping invalidly configured BGP peer {}",
                settings.name
            ));
            return Ok(None);
        };
        let local_ip = settings
            .update_source
            .as_ref()
            .and_then(|source| resolve_update_source(source, &settings.name, config, warnings))
            .or_else(|| local_ip_for_peer(config, &self.bgp_vrf.vrf_name, peer_ip));
        let id = BgpPeerId::Address(peer_ip);
        let peer = self.build(id, local_ip, settings, config, warnings)?;
        Ok(Some(peer))
    }
}

/// Turn the neighbors of every BGP instance into peers of the BGP process of
/// their VRF. Requires the processes of all the VRFs to exist. Peer groups are
/// templates and never become peers.
#[allow(clippy::needless_pass_by_value)]
pub fn attach_neighbors(
    vendor: &VendorConfig,
    bgp: &vendor::bgp::BgpProcess,
    params: &ConvertParams,
    config: &mut Configuration,
    warnings: &mut Warnings,
    _built: ProcessesBuilt,
) -> ConvertResult {
    for bgp_vrf in bgp.all_vrfs() {
        let vrf_name = &bgp_vrf.vrf_name;
        let Some(router_id) = config
            .vrf(vrf_name)
            .and_then(|vrf| vrf.bgp.as_ref())
            .map(|process| process.router_id)
        else {
            /* already reported while building the processes */
            continue;
        };
        debug!("Attaching BGP neighbors in vrf {vrf_name}");
        let builder = PeerBuilder {
            vendor,
            bgp_vrf,
            params,
            router_id,
        };

        for neighbor in bgp_vrf.neighbors.values() {
            let peer = match neighbor {
                BgpNeighbor::PeerGroup(_) => continue,
                BgpNeighbor::Interface(settings) => builder.interface_peer(
                    &settings.resolve(&bgp_vrf.neighbors),
                    config,
                    warnings,
                )?,
                BgpNeighbor::Ip(ip) => {
                    builder.ip_peer(&ip.resolve(&bgp_vrf.neighbors), config, warnings)?
                }
            };
            let Some(peer) = peer else {
                continue;
            };
            config
                .vrf_mut(vrf_name)
                .and_then(|vrf| vrf.bgp.as_mut())
                .ok_or_else(|| ModelError::NoSuchVrf(vrf_name.clone()))?
                .add_peer(peer)?;
        }
    }
    Ok(())
}
