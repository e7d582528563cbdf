// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! BGP export and import policies: the common export policy of a VRF and the
//! per-peer export, import and default-route policies.

use crate::aggregate::{export_aggregate_conditions, suppress_summarized_prefixes};
use crate::builders::bgp_redistribute_with_environment;
use crate::errors::ConvertResult;
use crate::namegen::BgpPolicyNames;
use crate::warnings::Warnings;
use model::policy::{BooleanExpr, If, NextHopExpr, RoutingPolicy, Statement};
use model::{Configuration, OriginType, RoutingProtocol};
use prefix::{PrefixRange, PrefixSpace};
use std::collections::BTreeMap;
use tracing::debug;
use vendor::bgp::{BgpVrf, RedistributeProtocol};
use vendor::neighbor::NeighborSettings;
use vendor::routemap::RouteMap;

/// Protocols of the routes redistributed for a vendor protocol keyword
#[must_use]
pub fn redistributed_protocols(protocol: RedistributeProtocol) -> Vec<RoutingProtocol> {
    match protocol {
        RedistributeProtocol::Connected => vec![RoutingProtocol::Connected],
        RedistributeProtocol::Kernel => vec![RoutingProtocol::Kernel],
        RedistributeProtocol::Static => vec![RoutingProtocol::Static],
        RedistributeProtocol::Ospf => vec![
            RoutingProtocol::Ospf,
            RoutingProtocol::OspfIa,
            RoutingProtocol::OspfE1,
            RoutingProtocol::OspfE2,
        ],
    }
}

/// Conditions to export the routes that are not aggregates
fn export_conditions(
    bgp_vrf: &BgpVrf,
    route_maps: &BTreeMap<String, RouteMap>,
    warnings: &mut Warnings,
) -> Vec<BooleanExpr> {
    let mut conditions = vec![BooleanExpr::match_protocols([
        RoutingProtocol::Bgp,
        RoutingProtocol::Ibgp,
    ])];

    /* without an IPv4 unicast AF nothing but BGP routes can be exported */
    let Some(af) = &bgp_vrf.af_ipv4unicast else {
        return conditions;
    };

    for redistribute in af.redistribute.values() {
        let protocol = redistribute.protocol;
        let interior = match &redistribute.route_map {
            Some(rmap) if route_maps.contains_key(rmap) => BooleanExpr::call(rmap),
            Some(rmap) => {
                warnings.red_flag(format!(
                    "Ignoring undefined route-map {rmap} for redistribution of {protocol} routes in vrf {}",
                    bgp_vrf.vrf_name
                ));
                BooleanExpr::True
            }
            None => BooleanExpr::True,
        };
        conditions.push(BooleanExpr::conjunction_with_comment(
            vec![
                BooleanExpr::match_protocols(redistributed_protocols(protocol)),
                bgp_redistribute_with_environment(interior, OriginType::Incomplete),
            ],
            &format!("Redistribute {protocol} routes into BGP"),
        ));
    }

    for network in &af.networks {
        /* BGP routes were already matched by the first disjunct */
        conditions.push(BooleanExpr::conjunction(vec![
            BooleanExpr::match_destination(PrefixSpace::from_range(PrefixRange::exact(*network))),
            BooleanExpr::negate(BooleanExpr::match_protocol(RoutingProtocol::Aggregate)),
            bgp_redistribute_with_environment(BooleanExpr::True, OriginType::Igp),
        ]));
    }
    conditions
}

/// Build and register the export policy shared by all the peers of a VRF. It
/// suppresses the networks summarized by summary-only aggregates, and accepts
/// BGP routes, redistributed routes, network statements and aggregates.
pub fn generate_common_export_policy(
    bgp_vrf: &BgpVrf,
    route_maps: &BTreeMap<String, RouteMap>,
    config: &mut Configuration,
    warnings: &mut Warnings,
) -> ConvertResult {
    let vrf = &bgp_vrf.vrf_name;
    debug!("Building common BGP export policy for vrf {vrf}");
    let mut statements = vec![];

    if let Some(af) = &bgp_vrf.af_ipv4unicast {
        if let Some(suppress) =
            suppress_summarized_prefixes(vrf, af.summary_only_aggregates(), config)?
        {
            statements.push(suppress);
        }
    }

    let mut conditions = export_conditions(bgp_vrf, route_maps, warnings);
    if let Some(af) = &bgp_vrf.af_ipv4unicast {
        conditions.push(export_aggregate_conditions(&af.aggregates));
    }
    statements.push(
        If::new(
            BooleanExpr::disjunction(conditions),
            vec![Statement::RETURN_TRUE],
        )
        .set_false_statements(vec![Statement::RETURN_FALSE])
        .into(),
    );

    let policy = RoutingPolicy::new(&bgp_vrf.common_export_policy()).add_statements(statements);
    config.add_routing_policy(policy)?;
    Ok(())
}

/// Tell if a default route is originated towards the neighbor
#[must_use]
pub fn default_originate(settings: &NeighborSettings) -> bool {
    settings
        .ipv4_unicast
        .as_ref()
        .and_then(|af| af.default_originate)
        .unwrap_or(false)
}

/// Next-hop-self only applies to iBGP peers
#[must_use]
pub fn set_next_hop(settings: &NeighborSettings, bgp_vrf: &BgpVrf) -> Option<Statement> {
    let (Some(remote_as), Some(local_as)) = (settings.remote_as, bgp_vrf.asn) else {
        return None;
    };
    if remote_as != local_as {
        return None;
    }
    settings
        .ipv4_unicast
        .as_ref()
        .and_then(|af| af.next_hop_self)
        .unwrap_or(false)
        .then_some(Statement::SetNextHop(NextHopExpr::SelfNextHop))
}

fn warn_undefined_route_map(
    rmap: &str,
    settings: &NeighborSettings,
    route_maps: &BTreeMap<String, RouteMap>,
    warnings: &mut Warnings,
) {
    if !route_maps.contains_key(rmap) {
        warnings.red_flag(format!(
            "Undefined route-map {rmap} is used by BGP neighbor {}",
            settings.name
        ));
    }
}

/// Default-route export policy. It is identical for all the peers of a VRF.
fn default_route_export_policy(name: &str) -> RoutingPolicy {
    RoutingPolicy::new(name)
        .add_statement(If::new(
            BooleanExpr::conjunction(vec![
                BooleanExpr::match_default_route(),
                BooleanExpr::match_protocol(RoutingProtocol::Aggregate),
            ]),
            vec![
                Statement::SetOrigin(OriginType::Incomplete),
                Statement::RETURN_TRUE,
            ],
        ))
        .add_statement(Statement::RETURN_FALSE)
}

/// Build and register the export policy of a peer, and the default-route policy it
/// calls if the peer has default-originate. Returns the name of the export policy.
pub fn generate_peer_export_policy(
    settings: &NeighborSettings,
    bgp_vrf: &BgpVrf,
    route_maps: &BTreeMap<String, RouteMap>,
    config: &mut Configuration,
    warnings: &mut Warnings,
) -> ConvertResult<String> {
    let peer = &settings.name;
    let name = bgp_vrf.peer_export_policy(peer);
    let mut policy = RoutingPolicy::new(&name);

    if default_originate(settings) {
        let default_policy = bgp_vrf.default_route_export_policy(peer);
        config.get_or_insert_routing_policy(default_route_export_policy(&default_policy));
        policy = policy.add_statement(
            If::new(
                BooleanExpr::call(&default_policy),
                vec![Statement::RETURN_TRUE],
            )
            .set_comment("Export default route from peer with default-originate configured"),
        );
    }

    /* default routes are never advertised, even if present in the RIB */
    policy = policy.add_statement(If::new(
        BooleanExpr::match_default_route(),
        vec![Statement::RETURN_FALSE],
    ));

    let common = BooleanExpr::call(&bgp_vrf.common_export_policy());
    let route_map_out = settings
        .ipv4_unicast
        .as_ref()
        .and_then(|af| af.route_map_out.as_deref());
    let conditions = match route_map_out {
        Some(rmap) => {
            warn_undefined_route_map(rmap, settings, route_maps, warnings);
            BooleanExpr::conjunction(vec![common, BooleanExpr::call(rmap)])
        }
        None => common,
    };
    let mut accept = vec![];
    accept.extend(set_next_hop(settings, bgp_vrf));
    accept.push(Statement::EXIT_ACCEPT);

    policy = policy.add_statement(
        If::new(conditions, accept)
            .set_false_statements(vec![Statement::EXIT_REJECT])
            .set_comment(
                "peer-export policy main conditional: exitAccept if true / exitReject if false",
            ),
    );
    config.add_routing_policy(policy)?;
    Ok(name)
}

/// Build and register the import policy of a peer. Peers without an inbound
/// route-map have no import policy and accept every route.
pub fn generate_peer_import_policy(
    settings: &NeighborSettings,
    bgp_vrf: &BgpVrf,
    route_maps: &BTreeMap<String, RouteMap>,
    config: &mut Configuration,
    warnings: &mut Warnings,
) -> ConvertResult<Option<String>> {
    let Some(rmap) = settings
        .ipv4_unicast
        .as_ref()
        .and_then(|af| af.route_map_in.as_deref())
    else {
        return Ok(None);
    };
    warn_undefined_route_map(rmap, settings, route_maps, warnings);
    let name = bgp_vrf.peer_import_policy(&settings.name);
    let policy = RoutingPolicy::new(&name).add_statement(
        If::new(BooleanExpr::call(rmap), vec![Statement::EXIT_ACCEPT])
            .set_false_statements(vec![Statement::EXIT_REJECT])
            .set_comment(
                "peer-import policy main conditional: exitAccept if true / exitReject if false",
            ),
    );
    config.add_routing_policy(policy)?;
    Ok(Some(name))
}
