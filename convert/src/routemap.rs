// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Route-map compilation into routing policies

use crate::bgp::export::redistributed_protocols;
use crate::errors::ConvertResult;
use crate::warnings::Warnings;
use model::LineAction;
use model::policy::{BooleanExpr, If, RoutingPolicy, Statement};
use tracing::debug;
use vendor::VendorConfig;
use vendor::routemap::{RouteMap, RouteMapEntry, RouteMapMatch, RouteMapSetAction};

/// Turns a vendor route-map into a routing policy with the same name. The policy
/// returns true for the routes the route-map permits.
pub trait RouteMapCompiler {
    fn compile(
        &self,
        vendor: &VendorConfig,
        route_map: &RouteMap,
        warnings: &mut Warnings,
    ) -> ConvertResult<RoutingPolicy>;
}

/// Compiles each entry into a conditional, in sequence order. The first entry
/// whose matches all hold decides. Routes matched by no entry are denied.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicRouteMapCompiler;

/// Tell if the list a match refers to is defined, and name its kind
fn undefined_list(vendor: &VendorConfig, m: &RouteMapMatch) -> Option<(&'static str, String)> {
    match m {
        RouteMapMatch::Ipv4AddressPrefixList(name) if !vendor.prefix_lists.contains_key(name) => {
            Some(("prefix-list", name.clone()))
        }
        RouteMapMatch::CommunityList(name) if !vendor.community_lists.contains_key(name) => {
            Some(("community-list", name.clone()))
        }
        RouteMapMatch::AsPathList(name) if !vendor.as_path_lists.contains_key(name) => {
            Some(("as-path access-list", name.clone()))
        }
        _ => None,
    }
}

fn match_expr(m: &RouteMapMatch) -> BooleanExpr {
    match m {
        RouteMapMatch::Ipv4AddressPrefixList(name) => BooleanExpr::match_destination_list(name),
        RouteMapMatch::CommunityList(name) => BooleanExpr::MatchCommunities(name.clone()),
        RouteMapMatch::AsPathList(name) => BooleanExpr::MatchAsPath(name.clone()),
        RouteMapMatch::Tag(tag) => BooleanExpr::MatchTag(*tag),
        RouteMapMatch::SourceProtocol(protocol) => {
            BooleanExpr::match_protocols(redistributed_protocols(*protocol))
        }
    }
}

fn set_statement(action: &RouteMapSetAction) -> Statement {
    match action {
        RouteMapSetAction::Tag(tag) => Statement::SetTag(*tag),
        RouteMapSetAction::Metric(metric) => Statement::SetMetric(*metric),
        RouteMapSetAction::Weight(weight) => Statement::SetWeight(*weight),
        RouteMapSetAction::LocalPreference(pref) => Statement::SetLocalPreference(*pref),
        RouteMapSetAction::Community(communities, additive) => Statement::SetCommunities {
            communities: communities.iter().copied().collect(),
            additive: *additive,
        },
    }
}

impl BasicRouteMapCompiler {
    fn compile_entry(
        vendor: &VendorConfig,
        route_map: &str,
        seq: u32,
        entry: &RouteMapEntry,
        warnings: &mut Warnings,
    ) -> If {
        let guard = entry
            .matches
            .iter()
            .map(|m| {
                if let Some((kind, name)) = undefined_list(vendor, m) {
                    /* nothing matches a list that does not exist */
                    warnings.red_flag(format!(
                        "Route-map {route_map} entry {seq} refers to undefined {kind} {name}"
                    ));
                    BooleanExpr::False
                } else {
                    match_expr(m)
                }
            })
            .collect();
        let statements = match entry.action {
            LineAction::Permit => entry
                .actions
                .iter()
                .map(set_statement)
                .chain([Statement::RETURN_TRUE])
                .collect(),
            LineAction::Deny => vec![Statement::RETURN_FALSE],
        };
        If::new(BooleanExpr::conjunction(guard), statements)
            .set_comment(&format!("route-map {route_map} seq {seq}"))
    }
}

impl RouteMapCompiler for BasicRouteMapCompiler {
    fn compile(
        &self,
        vendor: &VendorConfig,
        route_map: &RouteMap,
        warnings: &mut Warnings,
    ) -> ConvertResult<RoutingPolicy> {
        debug!("Compiling route-map {}", route_map.name);
        let policy = route_map
            .entries
            .iter()
            .map(|(seq, entry)| Self::compile_entry(vendor, &route_map.name, *seq, entry, warnings))
            .fold(RoutingPolicy::new(&route_map.name), RoutingPolicy::add_statement);
        Ok(policy.add_statement(Statement::RETURN_FALSE))
    }
}
