// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Aggregate routes: their generation, their export and the suppression of the
//! more specific networks of summary-only aggregates.

use crate::builders::bgp_redistribute_with_environment;
use crate::errors::ConvertResult;
use crate::namegen::{IpVersion, aggregate_generation_policy, suppressed_summary_only};
use model::filters::{RouteFilterLine, RouteFilterList};
use model::generated::GeneratedRoute;
use model::policy::{BooleanExpr, If, RoutingPolicy, Statement};
use model::{Configuration, LineAction, ModelError, OriginType, RoutingProtocol};
use prefix::{Prefix, PrefixRange, PrefixSpace};
use std::collections::BTreeMap;
use tracing::debug;
use vendor::bgp::AggregateNetwork;

/// Policy that holds for the routes more specific than `prefix`
fn generation_policy(vrf: &str, prefix: Prefix) -> RoutingPolicy {
    let name = aggregate_generation_policy(IpVersion::V4, vrf, &prefix.to_string());
    let more_specific = PrefixSpace::from_range(PrefixRange::more_specific_than(prefix));
    RoutingPolicy::new(&name).add_statement(
        If::new(
            BooleanExpr::match_destination(more_specific),
            vec![Statement::RETURN_TRUE],
        )
        .set_false_statements(vec![Statement::RETURN_FALSE]),
    )
}

/// Register a generation policy and a discard generated route per aggregate of a VRF
pub fn generate_aggregate_routes(
    vrf: &str,
    aggregates: &BTreeMap<Prefix, AggregateNetwork>,
    admin: u32,
    config: &mut Configuration,
) -> ConvertResult {
    for prefix in aggregates.keys() {
        debug!("Generating aggregate route {prefix} in vrf {vrf}");
        let policy = generation_policy(vrf, *prefix);
        let route = GeneratedRoute::new(*prefix, admin)
            .set_discard(true)
            .set_generation_policy(policy.name());
        config.add_routing_policy(policy)?;
        config
            .vrf_mut(vrf)
            .ok_or_else(|| ModelError::NoSuchVrf(vrf.to_owned()))?
            .add_generated_route(route);
    }
    Ok(())
}

/// Build the statement suppressing the networks covered by summary-only aggregates,
/// along with the route filter list it matches on. Nothing is built if no
/// aggregate is summary-only.
pub fn suppress_summarized_prefixes<'a>(
    vrf: &str,
    summary_only: impl IntoIterator<Item = &'a Prefix>,
    config: &mut Configuration,
) -> ConvertResult<Option<Statement>> {
    let name = suppressed_summary_only(vrf);
    let match_longer = summary_only
        .into_iter()
        .map(|p| RouteFilterLine::new(LineAction::Permit, PrefixRange::more_specific_than(*p)))
        .fold(RouteFilterList::new(&name), RouteFilterList::add_line);
    if match_longer.lines().is_empty() {
        return Ok(None);
    }
    config.add_route_filter_list(match_longer)?;
    Ok(Some(
        If::new(
            BooleanExpr::match_destination_list(&name),
            vec![Statement::SUPPRESS],
        )
        .set_comment("Suppress more specific networks for summary-only aggregate-address networks")
        .into(),
    ))
}

/// Disjunction holding for the aggregate routes generated in a VRF
#[must_use]
pub fn export_aggregate_conditions(aggregates: &BTreeMap<Prefix, AggregateNetwork>) -> BooleanExpr {
    BooleanExpr::disjunction(
        aggregates
            .keys()
            .map(|prefix| {
                BooleanExpr::conjunction(vec![
                    BooleanExpr::match_destination(PrefixSpace::from_range(PrefixRange::exact(
                        *prefix,
                    ))),
                    BooleanExpr::match_protocol(RoutingProtocol::Aggregate),
                    bgp_redistribute_with_environment(BooleanExpr::True, OriginType::Igp),
                ])
            })
            .collect(),
    )
}
