// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! OSPF conversion: one process per OSPF VRF, with the settings of the interfaces
//! that run OSPF and the areas they belong to.

use crate::convert::LOOPBACK_INTERFACE;
use crate::errors::ConvertResult;
use crate::params::ConvertParams;
use crate::router_id::infer_router_id;
use crate::warnings::Warnings;
use model::ospf::{OspfArea, OspfInterfaceSettings, OspfNetworkType, OspfProcess};
use model::{Configuration, ModelError};
use std::collections::BTreeMap;
use std::iter::once;
use tracing::debug;
use vendor::VendorConfig;
use vendor::ospf::{
    DEFAULT_OSPF_DEAD_INTERVAL, DEFAULT_OSPF_HELLO_INTERVAL, OspfInterface, OspfNetwork, OspfVrf,
};

/// Vendor OSPF settings of an interface. `lo` is the loopback, if configured.
fn vendor_ospf_settings<'a>(vendor: &'a VendorConfig, ifname: &str) -> Option<&'a OspfInterface> {
    if ifname == LOOPBACK_INTERFACE && vendor.loopback.configured {
        return vendor.loopback.ospf.as_ref();
    }
    vendor.interfaces.get(ifname)?.ospf.as_ref()
}

fn network_type(
    ifname: &str,
    network: Option<OspfNetwork>,
    warnings: &mut Warnings,
) -> Option<OspfNetworkType> {
    match network? {
        OspfNetwork::Broadcast => Some(OspfNetworkType::Broadcast),
        OspfNetwork::Point2Point => Some(OspfNetworkType::PointToPoint),
        other => {
            warnings.red_flag(format!(
                "Conversion of OSPF network type '{other}' on interface {ifname} is not handled."
            ));
            None
        }
    }
}

/// Set the OSPF settings of the interfaces of a VRF and group them by area
fn configure_interfaces(
    vendor: &VendorConfig,
    vrf: &str,
    process_id: &str,
    config: &mut Configuration,
    warnings: &mut Warnings,
) -> BTreeMap<u32, OspfArea> {
    let mut areas: BTreeMap<u32, OspfArea> = BTreeMap::new();
    let ifnames: Vec<String> = config
        .interfaces_in_vrf(vrf)
        .map(|iface| iface.name.clone())
        .collect();

    for ifname in ifnames {
        let Some(ospf) = vendor_ospf_settings(vendor, &ifname) else {
            continue;
        };
        let Some(area) = ospf.area else {
            continue;
        };
        let settings = OspfInterfaceSettings {
            passive: ospf.passive.unwrap_or(false),
            area,
            network_type: network_type(&ifname, ospf.network, warnings),
            dead_interval: ospf.dead_interval.unwrap_or(DEFAULT_OSPF_DEAD_INTERVAL),
            hello_interval: ospf.hello_interval.unwrap_or(DEFAULT_OSPF_HELLO_INTERVAL),
            process: process_id.to_owned(),
        };
        if let Some(iface) = config.interface_mut(&ifname) {
            debug!("Interface {ifname} runs OSPF in area {area}");
            iface.set_ospf(settings);
        }
        areas
            .entry(area)
            .or_insert_with(|| OspfArea::new(area))
            .interfaces
            .insert(ifname);
    }
    areas
}

fn convert_ospf_vrf(
    vendor: &VendorConfig,
    ospf_vrf: &OspfVrf,
    params: &ConvertParams,
    config: &mut Configuration,
    warnings: &mut Warnings,
) -> ConvertResult {
    let name = &ospf_vrf.vrf_name;
    if config.vrf(name).is_none() {
        warnings.red_flag(format!("Vrf {name} is not found."));
        return Ok(());
    }
    debug!("Building OSPF process for vrf {name}");
    let router_id = ospf_vrf
        .router_id
        .unwrap_or_else(|| infer_router_id(&vendor.loopback, &vendor.interfaces));
    let mut process = OspfProcess::new(
        &params.ospf_process,
        router_id,
        params.ospf_reference_bandwidth,
    );
    process.set_areas(configure_interfaces(
        vendor,
        name,
        &params.ospf_process,
        config,
        warnings,
    ));
    config
        .vrf_mut(name)
        .ok_or_else(|| ModelError::NoSuchVrf(name.clone()))?
        .set_ospf(process);
    Ok(())
}

/// Convert the OSPF configuration of a device, if it has any: the default VRF
/// first, then every OSPF VRF.
pub fn convert_ospf(
    vendor: &VendorConfig,
    params: &ConvertParams,
    config: &mut Configuration,
    warnings: &mut Warnings,
) -> ConvertResult {
    let Some(ospf) = &vendor.ospf else {
        debug!("No OSPF configuration");
        return Ok(());
    };
    for ospf_vrf in once(&ospf.default_vrf).chain(ospf.vrfs.values()) {
        convert_ospf_vrf(vendor, ospf_vrf, params, config, warnings)?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use model::interface::Interface;
    use pretty_assertions::assert_eq;
    use prefix::InterfaceAddress;
    use std::net::Ipv4Addr;
    use tracing_test::traced_test;
    use vendor::interface::{Interface as VendorInterface, Loopback};
    use vendor::ospf::OspfProcess as VendorOspf;

    fn vi_config(vendor: &VendorConfig) -> Configuration {
        let mut config = Configuration::new("leaf1");
        for iface in vendor.interfaces.values() {
            let vrf = iface.vrf.as_deref().unwrap_or(model::DEFAULT_VRF_NAME);
            config
                .add_interface(
                    Interface::new(&iface.name)
                        .set_vrf(vrf)
                        .set_addresses(iface.addresses.iter().copied()),
                )
                .unwrap();
        }
        if vendor.loopback.configured {
            config
                .add_interface(
                    Interface::new(LOOPBACK_INTERFACE)
                        .set_addresses(vendor.loopback.addresses.iter().copied()),
                )
                .unwrap();
        }
        config
    }

    fn vendor() -> VendorConfig {
        VendorConfig::new("leaf1")
            .set_loopback(
                Loopback::new([InterfaceAddress::expect_from("10.0.0.1/32")])
                    .set_ospf(OspfInterface::new(0).set_passive(true)),
            )
            .add_interface(
                VendorInterface::new("swp1")
                    .add_address(InterfaceAddress::expect_from("10.1.0.1/31"))
                    .set_ospf(
                        OspfInterface::new(0)
                            .set_network(OspfNetwork::Point2Point)
                            .set_hello_interval(5)
                            .set_dead_interval(20),
                    ),
            )
            .add_interface(
                VendorInterface::new("swp2")
                    .set_ospf(OspfInterface::new(1).set_network(OspfNetwork::NonBroadcast)),
            )
            .add_interface(VendorInterface::new("swp3"))
            .set_ospf(VendorOspf::new(OspfVrf::new("default")))
    }

    #[test]
    fn interface_settings_and_areas() {
        let vendor = vendor();
        let mut config = vi_config(&vendor);
        let mut warnings = Warnings::new();
        convert_ospf(&vendor, &ConvertParams::default(), &mut config, &mut warnings).unwrap();

        let process = config.default_vrf().unwrap().ospf.as_ref().unwrap();
        assert_eq!(process.process_id, "default");
        assert_eq!(process.router_id, Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(process.reference_bandwidth, 100_000_000);
        assert_eq!(
            process.areas.values().cloned().collect::<Vec<_>>(),
            vec![
                OspfArea::new(0).add_interfaces(["lo".to_owned(), "swp1".to_owned()]),
                OspfArea::new(1).add_interfaces(["swp2".to_owned()]),
            ]
        );

        assert_eq!(
            config.interface("swp1").unwrap().ospf,
            Some(OspfInterfaceSettings {
                passive: false,
                area: 0,
                network_type: Some(OspfNetworkType::PointToPoint),
                dead_interval: 20,
                hello_interval: 5,
                process: "default".to_owned(),
            })
        );
        let lo = config.interface("lo").unwrap().ospf.as_ref().unwrap();
        assert!(lo.passive);
        assert_eq!((lo.dead_interval, lo.hello_interval), (40, 10));
        assert_eq!(lo.network_type, None);
        assert!(config.interface("swp3").unwrap().ospf.is_none());
    }

    #[test]
    #[traced_test]
    fn unhandled_network_type() {
        let vendor = vendor();
        let mut config = vi_config(&vendor);
        let mut warnings = Warnings::new();
        convert_ospf(&vendor, &ConvertParams::default(), &mut config, &mut warnings).unwrap();

        let swp2 = config.interface("swp2").unwrap().ospf.as_ref().unwrap();
        assert_eq!(swp2.network_type, None);
        assert_eq!(warnings.len(), 1);
        assert!(warnings.contains("'non-broadcast'"));
        assert!(logs_contain("Conversion of OSPF network type 'non-broadcast'"));
    }

    #[test]
    fn vrfs() {
        let vendor = VendorConfig::new("leaf1")
            .add_interface(
                VendorInterface::new("swp1")
                    .set_vrf("red")
                    .set_ospf(OspfInterface::new(0)),
            )
            .add_interface(VendorInterface::new("swp2").set_ospf(OspfInterface::new(0)))
            .set_ospf(
                VendorOspf::new(OspfVrf::new("default"))
                    .add_vrf(OspfVrf::new("red").set_router_id(Ipv4Addr::new(7, 7, 7, 7)))
                    .add_vrf(OspfVrf::new("ghost")),
            );
        let mut config = vi_config(&vendor);
        config.add_vrf(model::vrf::Vrf::new("red")).unwrap();
        let mut warnings = Warnings::new();
        convert_ospf(&vendor, &ConvertParams::default(), &mut config, &mut warnings).unwrap();

        let red = config.vrf("red").unwrap().ospf.as_ref().unwrap();
        assert_eq!(red.router_id, Ipv4Addr::new(7, 7, 7, 7));
        assert_eq!(
            red.areas[&0].interfaces.iter().collect::<Vec<_>>(),
            vec!["swp1"]
        );
        let default = config.default_vrf().unwrap().ospf.as_ref().unwrap();
        assert_eq!(default.router_id, Ipv4Addr::UNSPECIFIED);
        assert_eq!(
            default.areas[&0].interfaces.iter().collect::<Vec<_>>(),
            vec!["swp2"]
        );
        assert!(warnings.contains("Vrf ghost is not found."));
    }

    #[test]
    fn no_ospf() {
        let vendor = VendorConfig::new("leaf1");
        let mut config = vi_config(&vendor);
        let mut warnings = Warnings::new();
        convert_ospf(&vendor, &ConvertParams::default(), &mut config, &mut warnings).unwrap();
        assert!(config.default_vrf().unwrap().ospf.is_none());
    }
}
