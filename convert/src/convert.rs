// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Conversion of a whole device configuration

use crate::bgp::convert_bgp;
use crate::errors::{ConvertError, ConvertResult};
use crate::lists::convert_lists;
use crate::ospf::convert_ospf;
use crate::params::ConvertParams;
use crate::routemap::{BasicRouteMapCompiler, RouteMapCompiler};
use crate::warnings::Warnings;
use model::evpn::Layer2Vni;
use model::interface::Interface;
use model::vrf::Vrf;
use model::{Configuration, DEFAULT_VRF_NAME, ModelError};
use tracing::{debug, error};
use vendor::VendorConfig;

/// Name of the loopback interface
pub const LOOPBACK_INTERFACE: &str = "lo";

/// The outcome of a successful conversion
#[derive(Debug)]
pub struct Conversion {
    pub configuration: Configuration,
    pub warnings: Warnings,
}

/// VRFs, interfaces, L2 VNIs and name servers: everything protocols build on
fn build_skeleton(
    vendor: &VendorConfig,
    config: &mut Configuration,
    warnings: &mut Warnings,
) -> ConvertResult {
    for vrf in vendor.vrfs.all_vrfs() {
        if vrf.name != DEFAULT_VRF_NAME {
            config.add_vrf(Vrf::new(&vrf.name))?;
        }
    }

    for iface in vendor.interfaces.values() {
        let vrf = iface.vrf.as_deref().unwrap_or(DEFAULT_VRF_NAME);
        if config.vrf(vrf).is_none() {
            warnings.red_flag(format!(
                "Interface {} is in undefined vrf {vrf}",
                iface.name
            ));
        }
        config.add_interface(
            Interface::new(&iface.name)
                .set_vrf(vrf)
                .set_addresses(iface.addresses.iter().copied()),
        )?;
    }
    if vendor.loopback.configured && config.interface(LOOPBACK_INTERFACE).is_none() {
        config.add_interface(
            Interface::new(LOOPBACK_INTERFACE)
                .set_addresses(vendor.loopback.addresses.iter().copied()),
        )?;
    }

    let default_vrf = config
        .vrf_mut(DEFAULT_VRF_NAME)
        .ok_or_else(|| ModelError::NoSuchVrf(DEFAULT_VRF_NAME.to_owned()))?;
    for vxlan in vendor.vxlans.values() {
        let Some(vni) = vxlan.id else {
            continue;
        };
        if vendor.vrfs.is_l3vni(vni) {
            continue;
        }
        debug!("VXLAN {} carries L2 VNI {vni}", vxlan.name);
        default_vrf.add_layer2_vni(
            Layer2Vni::new(vni, DEFAULT_VRF_NAME).set_source_address(vxlan.local_tunnel_ip),
        );
    }

    config.dns_servers.extend(vendor.ipv4_nameservers.iter().copied());
    Ok(())
}

/// Compile every route-map into a policy named after it
fn compile_route_maps(
    vendor: &VendorConfig,
    compiler: &dyn RouteMapCompiler,
    config: &mut Configuration,
    warnings: &mut Warnings,
) -> ConvertResult {
    for route_map in vendor.route_maps.values() {
        let policy = compiler.compile(vendor, route_map, warnings)?;
        if policy.name() != route_map.name {
            return Err(ConvertError::RouteMapCompile {
                name: route_map.name.clone(),
                reason: format!("compiled into a policy named {}", policy.name()),
            });
        }
        config.add_routing_policy(policy)?;
    }
    Ok(())
}

fn run(
    vendor: &VendorConfig,
    params: &ConvertParams,
    compiler: &dyn RouteMapCompiler,
    config: &mut Configuration,
    warnings: &mut Warnings,
) -> ConvertResult {
    build_skeleton(vendor, config, warnings)?;
    convert_lists(vendor, config)?;
    convert_bgp(vendor, params, config, warnings)?;
    convert_ospf(vendor, params, config, warnings)?;
    compile_route_maps(vendor, compiler, config, warnings)?;
    for name in config.undefined_policy_calls() {
        debug!("Routing policy {name} is called but not defined");
    }
    Ok(())
}

/// Convert the configuration of a device. Any error aborts the conversion of the
/// device; problems that are not fatal are reported as warnings.
pub fn convert_configuration(
    vendor: &VendorConfig,
    params: &ConvertParams,
    compiler: &dyn RouteMapCompiler,
) -> ConvertResult<Conversion> {
    debug!("Converting configuration of {} with {params}", vendor.hostname);
    let mut configuration = Configuration::new(&vendor.hostname);
    let mut warnings = Warnings::new();
    if let Err(e) = run(vendor, params, compiler, &mut configuration, &mut warnings) {
        error!("Failed to convert configuration of {}: {e}", vendor.hostname);
        return Err(e);
    }
    debug!(
        "Converted configuration of {} with {} warnings",
        vendor.hostname,
        warnings.len()
    );
    Ok(Conversion {
        configuration,
        warnings,
    })
}

/// Convert the configuration of a device with the default parameters and
/// route-map compiler
pub fn convert(vendor: &VendorConfig) -> ConvertResult<Conversion> {
    convert_configuration(vendor, &ConvertParams::default(), &BasicRouteMapCompiler)
}

#[cfg(test)]
mod test {
    use super::*;
    use model::policy::RoutingPolicy;
    use pretty_assertions::assert_eq;
    use prefix::InterfaceAddress;
    use std::net::Ipv4Addr;
    use tracing_test::traced_test;
    use vendor::interface::{Interface as VendorInterface, Loopback};
    use vendor::routemap::RouteMap;
    use vendor::vrf::VrfConfig;
    use vendor::vxlan::Vxlan;

    fn vendor() -> VendorConfig {
        let mut vendor = VendorConfig::new("leaf1")
            .set_loopback(Loopback::new([InterfaceAddress::expect_from("10.0.0.1/32")]))
            .add_interface(
                VendorInterface::new("swp1")
                    .add_address(InterfaceAddress::expect_from("10.1.0.1/31"))
                    .add_address(InterfaceAddress::expect_from("10.2.0.1/24")),
            )
            .add_interface(VendorInterface::new("vlan10").set_vrf("red"))
            .add_vxlan(Vxlan::new("vni10", Some(10)).set_local_tunnel_ip(Ipv4Addr::new(10, 0, 0, 1)))
            .add_vxlan(Vxlan::new("vni10100", Some(10100)))
            .add_vxlan(Vxlan::new("vxlan-down", None))
            .add_nameserver(Ipv4Addr::new(8, 8, 8, 8))
            .add_nameserver(Ipv4Addr::new(1, 1, 1, 1))
            .add_nameserver(Ipv4Addr::new(8, 8, 8, 8));
        vendor.add_vrf(VrfConfig::new("red", Some(10100))).unwrap();
        vendor
    }

    #[test]
    fn skeleton() {
        let conversion = convert(&vendor()).unwrap();
        let config = &conversion.configuration;
        assert_eq!(config.hostname, "leaf1");
        assert_eq!(
            config.vrfs().map(|vrf| vrf.name.as_str()).collect::<Vec<_>>(),
            vec!["default", "red"]
        );

        let swp1 = config.interface("swp1").unwrap();
        assert_eq!(swp1.vrf, "default");
        assert_eq!(swp1.primary, Some(InterfaceAddress::expect_from("10.1.0.1/31")));
        assert_eq!(swp1.secondaries, vec![InterfaceAddress::expect_from("10.2.0.1/24")]);
        assert_eq!(config.interface("vlan10").unwrap().vrf, "red");
        assert_eq!(
            config.interface("lo").unwrap().primary,
            Some(InterfaceAddress::expect_from("10.0.0.1/32"))
        );

        let l2_vnis = &config.default_vrf().unwrap().layer2_vnis;
        assert_eq!(l2_vnis.keys().copied().collect::<Vec<_>>(), vec![10]);
        assert_eq!(l2_vnis[&10].source_address, Some(Ipv4Addr::new(10, 0, 0, 1)));

        assert_eq!(
            config.dns_servers.iter().copied().collect::<Vec<_>>(),
            vec![Ipv4Addr::new(1, 1, 1, 1), Ipv4Addr::new(8, 8, 8, 8)]
        );
        assert!(conversion.warnings.is_empty());
    }

    #[test]
    fn interface_in_undefined_vrf() {
        let vendor = VendorConfig::new("leaf1")
            .add_interface(VendorInterface::new("swp1").set_vrf("ghost"));
        let conversion = convert(&vendor).unwrap();
        assert!(conversion.warnings.contains("swp1 is in undefined vrf ghost"));
    }

    struct FailingCompiler;
    impl RouteMapCompiler for FailingCompiler {
        fn compile(
            &self,
            _vendor: &VendorConfig,
            route_map: &RouteMap,
            _warnings: &mut Warnings,
        ) -> ConvertResult<RoutingPolicy> {
            Err(ConvertError::RouteMapCompile {
                name: route_map.name.clone(),
                reason: "unsupported".to_owned(),
            })
        }
    }

    struct RenamingCompiler;
    impl RouteMapCompiler for RenamingCompiler {
        fn compile(
            &self,
            _vendor: &VendorConfig,
            route_map: &RouteMap,
            _warnings: &mut Warnings,
        ) -> ConvertResult<RoutingPolicy> {
            Ok(RoutingPolicy::new(&format!("{}-renamed", route_map.name)))
        }
    }

    #[test]
    #[traced_test]
    fn route_map_compilation_failures_are_fatal() {
        let vendor = VendorConfig::new("leaf1").add_route_map(RouteMap::new("RM"));
        let params = ConvertParams::default();
        let err = convert_configuration(&vendor, &params, &FailingCompiler).unwrap_err();
        assert_eq!(
            err,
            ConvertError::RouteMapCompile {
                name: "RM".to_owned(),
                reason: "unsupported".to_owned()
            }
        );
        assert!(logs_contain("Failed to convert configuration of leaf1"));

        let err = convert_configuration(&vendor, &params, &RenamingCompiler).unwrap_err();
        assert!(matches!(err, ConvertError::RouteMapCompile { name, .. } if name == "RM"));
    }

    #[test]
    fn route_maps_are_registered() {
        let vendor = VendorConfig::new("leaf1").add_route_map(RouteMap::new("RM"));
        let conversion = convert(&vendor).unwrap();
        assert!(conversion.configuration.routing_policy("RM").is_some());
    }
}
