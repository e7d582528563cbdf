// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Names of the routing policies and lists synthesized by the conversion.
//! `~` delimits generated names and `:` separates their fields. Neither appears
//! in VRF names, and free-form fields (peers, prefixes) only come last, so
//! distinct inputs never produce the same name.

use std::fmt::Display;
use vendor::bgp::BgpVrf;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IpVersion {
    V4,
    V6,
}

impl Display for IpVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IpVersion::V4 => write!(f, "IPv4"),
            IpVersion::V6 => write!(f, "IPv6"),
        }
    }
}

#[must_use]
pub fn common_export_policy(vrf: &str) -> String {
    format!("~BGP_COMMON_EXPORT_POLICY:{vrf}~")
}

#[must_use]
pub fn peer_export_policy(vrf: &str, peer: &str) -> String {
    format!("~BGP_PEER_EXPORT_POLICY:{vrf}:{peer}~")
}

#[must_use]
pub fn peer_import_policy(vrf: &str, peer: &str) -> String {
    format!("~BGP_PEER_IMPORT_POLICY:{vrf}:{peer}~")
}

#[must_use]
pub fn default_route_export_policy(version: IpVersion, vrf: &str, peer: &str) -> String {
    format!("~BGP_DEFAULT_ROUTE_PEER_EXPORT_POLICY:{version}:{vrf}:{peer}~")
}

#[must_use]
pub fn aggregate_generation_policy(version: IpVersion, vrf: &str, prefix: &str) -> String {
    let kind = match version {
        IpVersion::V4 => "AGGREGATE_ROUTE_GEN",
        IpVersion::V6 => "AGGREGATE_ROUTE6_GEN",
    };
    format!("~{kind}:{vrf}:{prefix}~")
}

#[must_use]
pub fn suppressed_summary_only(vrf: &str) -> String {
    format!("~MATCH_SUPPRESSED_SUMMARY_ONLY:{vrf}~")
}

////////////////////////////////////////////////////////////////////////
/// Convenience trait to generate the policy names of a BGP instance
////////////////////////////////////////////////////////////////////////
pub(crate) trait BgpPolicyNames {
    fn common_export_policy(&self) -> String;
    fn peer_export_policy(&self, peer: &str) -> String;
    fn peer_import_policy(&self, peer: &str) -> String;
    fn default_route_export_policy(&self, peer: &str) -> String;
    fn suppressed_summary_only(&self) -> String;
}

impl BgpPolicyNames for BgpVrf {
    fn common_export_policy(&self) -> String {
        common_export_policy(&self.vrf_name)
    }
    fn peer_export_policy(&self, peer: &str) -> String {
        peer_export_policy(&self.vrf_name, peer)
    }
    fn peer_import_policy(&self, peer: &str) -> String {
        peer_import_policy(&self.vrf_name, peer)
    }
    fn default_route_export_policy(&self, peer: &str) -> String {
        default_route_export_policy(IpVersion::V4, &self.vrf_name, peer)
    }
    fn suppressed_summary_only(&self) -> String {
        suppressed_summary_only(&self.vrf_name)
    }
}
