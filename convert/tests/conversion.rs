// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Conversion of complete device configurations

use model::bgp::{BgpPeerId, MultipathMatchMode};
use model::evpn::{RouteDistinguisher, RouteTarget};
use model::policy::Statement;
use model::{Configuration, LineAction};
use pretty_assertions::assert_eq;
use prefix::{InterfaceAddress, Prefix};
use routeconv_convert::{
    BasicRouteMapCompiler, ConvertError, ConvertParamsBuilder, convert, convert_configuration,
};
use std::net::Ipv4Addr;
use vendor::VendorConfig;
use vendor::bgp::{AfIpv4Ucast, AfL2vpnEvpn, BgpProcess, BgpVrf, Redistribute, RedistributeProtocol};
use vendor::interface::{Interface, Loopback};
use vendor::lists::{IpPrefixList, IpPrefixListLine};
use vendor::neighbor::{BgpNeighbor, NeighborIpv4Unicast, NeighborL2vpnEvpn, RemoteAsType};
use vendor::ospf::{OspfInterface, OspfNetwork, OspfProcess, OspfVrf};
use vendor::routemap::{RouteMap, RouteMapEntry, RouteMapMatch};
use vendor::vrf::VrfConfig;
use vendor::vxlan::Vxlan;

const ASN: u32 = 65001;
const LOOPBACK_IP: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 1);

fn loopbacks_route_map() -> (IpPrefixList, RouteMap) {
    let mut plist = IpPrefixList::new("LOOPBACKS");
    plist
        .add_line(
            None,
            IpPrefixListLine::new(LineAction::Permit, Prefix::expect_from("10.0.0.0/24"))
                .set_ge(32),
        )
        .unwrap();
    let mut rmap = RouteMap::new("LOOPBACKS");
    rmap.add_entry(
        None,
        RouteMapEntry::new(LineAction::Permit)
            .add_match(RouteMapMatch::Ipv4AddressPrefixList("LOOPBACKS".to_owned())),
    )
    .unwrap();
    (plist, rmap)
}

/// An EVPN leaf with unnumbered uplinks, one L3 VNI VRF running BGP and
/// another one that does not
fn evpn_leaf() -> VendorConfig {
    let (plist, rmap) = loopbacks_route_map();
    let default_vrf = BgpVrf::new("default")
        .set_asn(ASN)
        .set_af_ipv4unicast(
            AfIpv4Ucast::new()
                .add_network(Prefix::expect_from("10.0.0.1/32"))
                .add_aggregate(Prefix::expect_from("10.1.0.0/16"), true)
                .redistribute(Redistribute::new(
                    RedistributeProtocol::Connected,
                    Some("LOOPBACKS"),
                )),
        )
        .set_af_l2vpnevpn(AfL2vpnEvpn::new().set_adv_all_vni(true))
        .add_neighbor(BgpNeighbor::new_peer_group("fabric", |s| {
            s.set_remote_as_type(RemoteAsType::External)
                .set_l2vpn_evpn(NeighborL2vpnEvpn::new().activate(true))
        }))
        .add_neighbor(BgpNeighbor::new_interface("swp1", |s| {
            s.set_peer_group("fabric")
        }))
        .add_neighbor(BgpNeighbor::new_interface("swp2", |s| {
            s.set_peer_group("fabric")
        }));
    let red = BgpVrf::new("red")
        .set_asn(ASN)
        .set_router_id(Ipv4Addr::new(10, 0, 0, 101))
        .set_af_l2vpnevpn(AfL2vpnEvpn::new().set_adv_ipv4_unicast(true));

    let mut vendor = VendorConfig::new("leaf1")
        .set_loopback(
            Loopback::new([InterfaceAddress::expect_from("10.0.0.1/32")])
                .set_ospf(OspfInterface::new(0).set_passive(true)),
        )
        .add_interface(
            Interface::new("swp1").set_ospf(OspfInterface::new(0).set_network(OspfNetwork::Point2Point)),
        )
        .add_interface(Interface::new("swp2"))
        .add_interface(
            Interface::new("vlan10")
                .set_vrf("red")
                .add_address(InterfaceAddress::expect_from("192.168.10.1/24")),
        )
        .add_vxlan(Vxlan::new("vni20", Some(20)).set_local_tunnel_ip(LOOPBACK_IP))
        .add_vxlan(Vxlan::new("vni10", Some(10)).set_local_tunnel_ip(LOOPBACK_IP))
        .add_vxlan(Vxlan::new("vni10100", Some(10100)))
        .add_vxlan(Vxlan::new("vni10200", Some(10200)))
        .add_prefix_list(plist)
        .add_route_map(rmap)
        .add_nameserver(Ipv4Addr::new(9, 9, 9, 9))
        .set_bgp(BgpProcess::new(default_vrf).add_vrf(red))
        .set_ospf(OspfProcess::new(OspfVrf::new("default")));
    vendor.add_vrf(VrfConfig::new("red", Some(10100))).unwrap();
    vendor.add_vrf(VrfConfig::new("blue", Some(10200))).unwrap();
    vendor
}

#[test]
fn evpn_leaf_conversion() {
    let conversion = convert(&evpn_leaf()).unwrap();
    let config = &conversion.configuration;
    assert!(conversion.warnings.is_empty(), "{}", conversion.warnings);

    /* processes */
    let default_bgp = config.default_vrf().unwrap().bgp.as_ref().unwrap();
    assert_eq!(default_bgp.router_id, LOOPBACK_IP);
    assert_eq!(default_bgp.multipath_match_mode, MultipathMatchMode::ExactPath);
    let red_bgp = config.vrf("red").unwrap().bgp.as_ref().unwrap();
    assert_eq!(red_bgp.router_id, Ipv4Addr::new(10, 0, 0, 101));
    let blue_bgp = config.vrf("blue").unwrap().bgp.as_ref().unwrap();
    assert_eq!(blue_bgp.router_id, LOOPBACK_IP);
    assert!(blue_bgp.peers().next().is_none());

    /* peers */
    let ids: Vec<_> = default_bgp.peers().map(|peer| peer.id.clone()).collect();
    assert_eq!(
        ids,
        vec![
            BgpPeerId::Interface("swp1".to_owned()),
            BgpPeerId::Interface("swp2".to_owned())
        ]
    );
    let swp1 = &default_bgp.interface_peers["swp1"];
    assert_eq!(swp1.group.as_deref(), Some("fabric"));
    assert!(!swp1.remote_asns.contains(ASN));
    let evpn = swp1.evpn.as_ref().unwrap();
    let l2: Vec<_> = evpn.l2_vnis.iter().map(|l2| (l2.vni, l2.rd)).collect();
    assert_eq!(
        l2,
        vec![
            (10, RouteDistinguisher::new(LOOPBACK_IP, 0)),
            (20, RouteDistinguisher::new(LOOPBACK_IP, 1)),
        ]
    );
    let l3: Vec<_> = evpn
        .l3_vnis
        .iter()
        .map(|l3| (l3.vrf.as_str(), l3.rd, l3.advertise_v4_unicast))
        .collect();
    assert_eq!(
        l3,
        vec![
            ("red", RouteDistinguisher::new(Ipv4Addr::new(10, 0, 0, 101), 2), true),
            ("blue", RouteDistinguisher::new(LOOPBACK_IP, 3), false),
        ]
    );
    assert!(evpn.l3_vnis.iter().all(|l3| l3.rt == RouteTarget::for_vni(ASN, l3.vni)));

    /* policies */
    let common = config
        .routing_policy("~BGP_COMMON_EXPORT_POLICY:default~")
        .unwrap();
    let Statement::If(suppress) = &common.statements()[0] else {
        panic!("suppression must come first");
    };
    assert_eq!(suppress.true_statements, vec![Statement::SUPPRESS]);
    assert!(common.calls().contains("LOOPBACKS"));
    assert!(config.routing_policy("LOOPBACKS").is_some());
    assert!(config.route_filter_list("LOOPBACKS").is_some());
    assert!(
        config
            .routing_policy("~AGGREGATE_ROUTE_GEN:default:10.1.0.0/16~")
            .is_some()
    );
    assert!(config.undefined_policy_calls().is_empty());

    /* OSPF */
    let ospf = config.default_vrf().unwrap().ospf.as_ref().unwrap();
    assert_eq!(
        ospf.areas[&0].interfaces.iter().collect::<Vec<_>>(),
        vec!["lo", "swp1"]
    );
    assert_eq!(
        config.dns_servers.iter().copied().collect::<Vec<_>>(),
        vec![Ipv4Addr::new(9, 9, 9, 9)]
    );
}

#[test]
fn conversion_is_deterministic() {
    let first = convert(&evpn_leaf()).unwrap();
    let second = convert(&evpn_leaf()).unwrap();
    assert_eq!(first.configuration, second.configuration);
    assert_eq!(first.warnings, second.warnings);
}

fn policy_names(config: &Configuration) -> Vec<String> {
    config
        .routing_policies()
        .map(|policy| policy.name().to_owned())
        .collect()
}

#[test]
fn default_route_policies_per_peer() {
    let originate = NeighborIpv4Unicast::new().set_default_originate(true);
    let default_vrf = BgpVrf::new("default")
        .set_asn(ASN)
        .add_neighbor(BgpNeighbor::new_ip(Ipv4Addr::new(10, 1, 0, 0), |s| {
            s.set_remote_as(65002).set_ipv4_unicast(originate.clone())
        }))
        .add_neighbor(BgpNeighbor::new_ip(Ipv4Addr::new(10, 1, 0, 2), |s| {
            s.set_remote_as(65003).set_ipv4_unicast(originate.clone())
        }));
    let vendor = VendorConfig::new("border1")
        .add_interface(
            Interface::new("swp1").add_address(InterfaceAddress::expect_from("10.1.0.1/31")),
        )
        .add_interface(
            Interface::new("swp2").add_address(InterfaceAddress::expect_from("10.1.0.3/31")),
        )
        .set_bgp(BgpProcess::new(default_vrf));
    let conversion = convert(&vendor).unwrap();
    let config = &conversion.configuration;

    let names = policy_names(config);
    for peer in ["10.1.0.0", "10.1.0.2"] {
        let name = format!("~BGP_DEFAULT_ROUTE_PEER_EXPORT_POLICY:IPv4:default:{peer}~");
        assert_eq!(names.iter().filter(|n| **n == name).count(), 1);
    }
    let bgp = config.default_vrf().unwrap().bgp.as_ref().unwrap();
    let local_ips: Vec<_> = bgp.peers().map(|peer| peer.local_ip).collect();
    assert_eq!(
        local_ips,
        vec![
            Some(Ipv4Addr::new(10, 1, 0, 1)),
            Some(Ipv4Addr::new(10, 1, 0, 3))
        ]
    );
    /* router-id falls back to the largest interface address */
    assert_eq!(bgp.router_id, Ipv4Addr::new(10, 1, 0, 3));
}

#[test]
fn malformed_neighbor_does_not_abort() {
    let default_vrf = BgpVrf::new("default")
        .set_asn(ASN)
        .add_neighbor(BgpNeighbor::new_interface("swp1", |s| s))
        .add_neighbor(BgpNeighbor::new_interface("swp2", |s| s.set_remote_as(65002)));
    let vendor = VendorConfig::new("leaf1").set_bgp(BgpProcess::new(default_vrf));
    let conversion = convert(&vendor).unwrap();
    assert_eq!(conversion.warnings.len(), 1);
    assert!(conversion.warnings.contains("swp1"));
    let bgp = conversion
        .configuration
        .default_vrf()
        .and_then(|vrf| vrf.bgp.as_ref())
        .unwrap();
    assert_eq!(bgp.peers().count(), 1);
}

#[test]
fn remote_as_without_type_aborts() {
    let mut settings = vendor::neighbor::NeighborSettings::new("swp1");
    settings.remote_as = Some(65002);
    let default_vrf = BgpVrf::new("default")
        .set_asn(ASN)
        .add_neighbor(BgpNeighbor::Interface(settings));
    let vendor = VendorConfig::new("leaf1").set_bgp(BgpProcess::new(default_vrf));
    assert_eq!(
        convert(&vendor).unwrap_err(),
        ConvertError::InvalidRemoteAsType("swp1".to_owned())
    );
}

#[test]
fn custom_parameters() {
    let params = ConvertParamsBuilder::default()
        .ebgp_admin(30u32)
        .ospf_process("underlay")
        .build()
        .unwrap();
    let conversion = convert_configuration(&evpn_leaf(), &params, &BasicRouteMapCompiler).unwrap();
    let config = &conversion.configuration;
    let bgp = config.default_vrf().unwrap().bgp.as_ref().unwrap();
    assert_eq!((bgp.ebgp_admin, bgp.ibgp_admin), (30, 200));
    let ospf = config.default_vrf().unwrap().ospf.as_ref().unwrap();
    assert_eq!(ospf.process_id, "underlay");
    assert_eq!(
        config.interface("swp1").unwrap().ospf.as_ref().unwrap().process,
        "underlay"
    );
}
