// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Platform constants used by the conversion

use derive_builder::Builder;
use model::RoutingProtocol;
use std::fmt::Display;

/// Administrative distance of generated aggregate routes
pub const AGGREGATE_ROUTE_ADMIN: u32 = 200;
/// Administrative distance of the default route generated for `default-originate`
pub const DEFAULT_ROUTE_ADMIN: u32 = 32767;
/// OSPF reference bandwidth, in bps
pub const OSPF_REFERENCE_BANDWIDTH: u64 = 100_000_000;
pub const DEFAULT_OSPF_PROCESS_NAME: &str = "default";

/// Conversion parameters. N.B we derive a builder type `ConvertParamsBuilder`
/// and provide defaults for each field.
#[derive(Builder, Clone, Debug, PartialEq, Eq)]
pub struct ConvertParams {
    #[builder(default = RoutingProtocol::Bgp.default_admin_distance())]
    pub ebgp_admin: u32,

    #[builder(default = RoutingProtocol::Ibgp.default_admin_distance())]
    pub ibgp_admin: u32,

    #[builder(default = AGGREGATE_ROUTE_ADMIN)]
    pub aggregate_admin: u32,

    #[builder(default = DEFAULT_ROUTE_ADMIN)]
    pub default_route_admin: u32,

    #[builder(default = OSPF_REFERENCE_BANDWIDTH)]
    pub ospf_reference_bandwidth: u64,

    #[builder(setter(into), default = DEFAULT_OSPF_PROCESS_NAME.to_owned())]
    pub ospf_process: String,
}

impl Default for ConvertParams {
    fn default() -> Self {
        Self {
            ebgp_admin: RoutingProtocol::Bgp.default_admin_distance(),
            ibgp_admin: RoutingProtocol::Ibgp.default_admin_distance(),
            aggregate_admin: AGGREGATE_ROUTE_ADMIN,
            default_route_admin: DEFAULT_ROUTE_ADMIN,
            ospf_reference_bandwidth: OSPF_REFERENCE_BANDWIDTH,
            ospf_process: DEFAULT_OSPF_PROCESS_NAME.to_owned(),
        }
    }
}

impl Display for ConvertParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        writeln!(f, "Conversion parameters")?;
        writeln!(f, "  BGP distances : ebgp {} ibgp {}", self.ebgp_admin, self.ibgp_admin)?;
        writeln!(f, "  aggregates    : {}", self.aggregate_admin)?;
        writeln!(f, "  default route : {}", self.default_route_admin)?;
        writeln!(
            f,
            "  OSPF          : process {} ref-bw {}",
            self.ospf_process, self.ospf_reference_bandwidth
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builder_defaults_match_platform() {
        let params = ConvertParamsBuilder::default().build().unwrap();
        assert_eq!(params, ConvertParams::default());
        assert_eq!((params.ebgp_admin, params.ibgp_admin), (20, 200));

        let params = ConvertParamsBuilder::default()
            .ospf_process("main")
            .ebgp_admin(30)
            .build()
            .unwrap();
        assert_eq!(params.ospf_process, "main");
        assert_eq!(params.ebgp_admin, 30);
        assert_eq!(params.default_route_admin, 32767);
    }
}
