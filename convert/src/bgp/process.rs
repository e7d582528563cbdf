// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! First BGP conversion phase: one process per VRF, with its aggregates and
//! its common export policy. Peers are attached in a second phase, once every
//! process exists.

use crate::aggregate::generate_aggregate_routes;
use crate::bgp::export::generate_common_export_policy;
use crate::errors::ConvertResult;
use crate::params::ConvertParams;
use crate::router_id::infer_router_id;
use crate::warnings::Warnings;
use model::bgp::{BgpConfederation, BgpProcess, MultipathMatchMode};
use model::{Configuration, ModelError};
use std::collections::BTreeSet;
use tracing::debug;
use vendor::VendorConfig;
use vendor::bgp::BgpVrf;

/// Proof that the BGP processes of all the VRFs are in place. Only
/// [`build_processes`] produces it, and attaching neighbors requires it.
#[derive(Debug)]
#[must_use]
pub struct ProcessesBuilt {
    _private: (),
}

/// The process of a BGP instance, without peers
fn to_bgp_process(
    vendor: &VendorConfig,
    bgp_vrf: &BgpVrf,
    default_vrf: &BgpVrf,
    params: &ConvertParams,
) -> BgpProcess {
    let router_id = bgp_vrf
        .router_id
        .unwrap_or_else(|| infer_router_id(&vendor.loopback, &vendor.interfaces));
    let match_mode = if bgp_vrf.as_path_multipath_relax {
        MultipathMatchMode::PathLength
    } else {
        MultipathMatchMode::ExactPath
    };
    let confederation = default_vrf
        .confederation_id
        .zip(default_vrf.asn)
        .map(|(id, asn)| BgpConfederation {
            id,
            members: BTreeSet::from([asn]),
        });

    /* multipath is on by default */
    let mut process = BgpProcess::new(router_id, params.ebgp_admin, params.ibgp_admin)
        .set_multipath_ebgp(true)
        .set_multipath_ibgp(true)
        .set_multipath_match_mode(match_mode)
        .set_confederation(confederation);

    if let Some(af) = &bgp_vrf.af_ipv4unicast {
        af.networks
            .iter()
            .for_each(|network| process.add_to_origination_space(*network));
    }
    process
}

/// VRFs with an L3 VNI need a BGP process for their RIBs. Give one to those that
/// have none, if the default VRF runs BGP.
fn install_dud_processes(vendor: &VendorConfig, params: &ConvertParams, config: &mut Configuration) {
    let Some(router_id) = config
        .default_vrf()
        .and_then(|vrf| vrf.bgp.as_ref())
        .map(|bgp| bgp.router_id)
    else {
        return;
    };
    let duds: Vec<String> = config
        .vrfs()
        .filter(|vrf| vrf.bgp.is_none())
        .filter(|vrf| vendor.vrfs.lookup(&vrf.name).is_some_and(|v| v.vni.is_some()))
        .map(|vrf| vrf.name.clone())
        .collect();
    for name in duds {
        debug!("Installing BGP process for L3 VNI vrf {name}");
        if let Some(vrf) = config.vrf_mut(&name) {
            vrf.set_bgp(BgpProcess::new(router_id, params.ebgp_admin, params.ibgp_admin));
        }
    }
}

/// Build the BGP process of the default VRF and of every BGP VRF, then the processes
/// of the L3 VNI VRFs lacking one. BGP VRFs whose VRF does not exist are skipped.
pub fn build_processes(
    vendor: &VendorConfig,
    bgp: &vendor::bgp::BgpProcess,
    params: &ConvertParams,
    config: &mut Configuration,
    warnings: &mut Warnings,
) -> ConvertResult<ProcessesBuilt> {
    for bgp_vrf in bgp.all_vrfs() {
        let name = &bgp_vrf.vrf_name;
        if config.vrf(name).is_none() {
            warnings.red_flag(format!("Skipping BGP instance of unknown vrf {name}"));
            continue;
        }
        debug!("Building BGP process for vrf {name}");
        let process = to_bgp_process(vendor, bgp_vrf, &bgp.default_vrf, params);
        if let Some(af) = &bgp_vrf.af_ipv4unicast {
            generate_aggregate_routes(name, &af.aggregates, params.aggregate_admin, config)?;
        }
        generate_common_export_policy(bgp_vrf, &vendor.route_maps, config, warnings)?;
        config
            .vrf_mut(name)
            .ok_or_else(|| ModelError::NoSuchVrf(name.clone()))?
            .set_bgp(process);
    }
    install_dud_processes(vendor, params, config);
    Ok(ProcessesBuilt { _private: () })
}
