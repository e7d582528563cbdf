// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! BGP conversion. Processes are built for all the VRFs first, and only then are
//! the neighbors attached, since a peer may need the process of another VRF.

pub mod evpn;
pub mod export;
pub mod peer;
pub mod process;

pub use peer::attach_neighbors; // re-export
pub use process::{ProcessesBuilt, build_processes}; // re-export

use crate::errors::ConvertResult;
use crate::params::ConvertParams;
use crate::warnings::Warnings;
use model::Configuration;
use tracing::debug;
use vendor::VendorConfig;

/// Convert the BGP configuration of a device, if it has any
pub fn convert_bgp(
    vendor: &VendorConfig,
    params: &ConvertParams,
    config: &mut Configuration,
    warnings: &mut Warnings,
) -> ConvertResult {
    let Some(bgp) = &vendor.bgp else {
        debug!("No BGP configuration");
        return Ok(());
    };
    let built = build_processes(vendor, bgp, params, config, warnings)?;
    attach_neighbors(vendor, bgp, params, config, warnings, built)
}
