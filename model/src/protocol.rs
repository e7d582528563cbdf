// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Route sources, BGP origin types and list actions

use std::fmt::Display;

/// Protocol a candidate route was learnt from
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoutingProtocol {
    Aggregate,
    Bgp,
    Ibgp,
    Connected,
    Local,
    Kernel,
    Static,
    Ospf,
    OspfIa,
    OspfE1,
    OspfE2,
    Isis,
    Rip,
}

impl RoutingProtocol {
    /// Administrative distance a FRR-based platform assigns to routes of this protocol
    #[must_use]
    pub fn default_admin_distance(&self) -> u32 {
        match self {
            RoutingProtocol::Connected | RoutingProtocol::Local | RoutingProtocol::Kernel => 0,
            RoutingProtocol::Static => 1,
            RoutingProtocol::Bgp => 20,
            RoutingProtocol::Ospf
            | RoutingProtocol::OspfIa
            | RoutingProtocol::OspfE1
            | RoutingProtocol::OspfE2 => 110,
            RoutingProtocol::Isis => 115,
            RoutingProtocol::Rip => 120,
            RoutingProtocol::Ibgp | RoutingProtocol::Aggregate => 200,
        }
    }
}

impl Display for RoutingProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RoutingProtocol::Aggregate => "aggregate",
            RoutingProtocol::Bgp => "bgp",
            RoutingProtocol::Ibgp => "ibgp",
            RoutingProtocol::Connected => "connected",
            RoutingProtocol::Local => "local",
            RoutingProtocol::Kernel => "kernel",
            RoutingProtocol::Static => "static",
            RoutingProtocol::Ospf => "ospf",
            RoutingProtocol::OspfIa => "ospfIA",
            RoutingProtocol::OspfE1 => "ospfE1",
            RoutingProtocol::OspfE2 => "ospfE2",
            RoutingProtocol::Isis => "isis",
            RoutingProtocol::Rip => "rip",
        };
        write!(f, "{name}")
    }
}

/// BGP origin attribute
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OriginType {
    Igp,
    Egp,
    Incomplete,
}

impl Display for OriginType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OriginType::Igp => write!(f, "igp"),
            OriginType::Egp => write!(f, "egp"),
            OriginType::Incomplete => write!(f, "incomplete"),
        }
    }
}

/// Action of a line in a match list
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineAction {
    Permit,
    Deny,
}

impl Display for LineAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineAction::Permit => write!(f, "permit"),
            LineAction::Deny => write!(f, "deny"),
        }
    }
}
