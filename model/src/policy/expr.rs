// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Boolean expressions evaluated against a candidate route

use super::statement::Statement;
use crate::protocol::RoutingProtocol;
use prefix::{Prefix, PrefixRange, PrefixSpace};
use std::collections::BTreeSet;
use std::fmt::Display;

/// A set of destination prefixes, given inline or by the name of a route filter list
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrefixSetExpr {
    Explicit(PrefixSpace),
    Named(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Junction {
    pub exprs: Vec<BooleanExpr>,
    pub comment: Option<String>,
}

/// A boolean test scoped by statements run before and after it. The statements in
/// `post_true` only run when the test evaluates to true.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WithEnvironment {
    pub expr: BooleanExpr,
    pub pre: Vec<Statement>,
    pub post: Vec<Statement>,
    pub post_true: Vec<Statement>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BooleanExpr {
    True,
    False,
    MatchProtocol(BTreeSet<RoutingProtocol>),
    /// match on the destination network of the route
    MatchPrefixSet(PrefixSetExpr),
    /// match on a named community list
    MatchCommunities(String),
    /// match on a named AS-path access list
    MatchAsPath(String),
    MatchTag(u32),
    Not(Box<BooleanExpr>),
    Conjunction(Junction),
    Disjunction(Junction),
    /// evaluate the named routing policy
    Call(String),
    WithEnvironment(Box<WithEnvironment>),
}

impl BooleanExpr {
    #[must_use]
    pub fn match_protocol(protocol: RoutingProtocol) -> Self {
        Self::match_protocols([protocol])
    }
    #[must_use]
    pub fn match_protocols(protocols: impl IntoIterator<Item = RoutingProtocol>) -> Self {
        BooleanExpr::MatchProtocol(protocols.into_iter().collect())
    }
    #[must_use]
    pub fn match_destination(space: PrefixSpace) -> Self {
        BooleanExpr::MatchPrefixSet(PrefixSetExpr::Explicit(space))
    }
    #[must_use]
    pub fn match_destination_list(name: &str) -> Self {
        BooleanExpr::MatchPrefixSet(PrefixSetExpr::Named(name.to_owned()))
    }
    /// Match 0.0.0.0/0 exactly
    #[must_use]
    pub fn match_default_route() -> Self {
        Self::match_destination(PrefixSpace::from_range(PrefixRange::exact(Prefix::root())))
    }
    #[must_use]
    pub fn conjunction(exprs: Vec<BooleanExpr>) -> Self {
        BooleanExpr::Conjunction(Junction {
            exprs,
            comment: None,
        })
    }
    #[must_use]
    pub fn conjunction_with_comment(exprs: Vec<BooleanExpr>, comment: &str) -> Self {
        BooleanExpr::Conjunction(Junction {
            exprs,
            comment: Some(comment.to_owned()),
        })
    }
    #[must_use]
    pub fn disjunction(exprs: Vec<BooleanExpr>) -> Self {
        BooleanExpr::Disjunction(Junction {
            exprs,
            comment: None,
        })
    }
    #[must_use]
    pub fn negate(expr: BooleanExpr) -> Self {
        BooleanExpr::Not(Box::new(expr))
    }
    #[must_use]
    pub fn call(policy: &str) -> Self {
        BooleanExpr::Call(policy.to_owned())
    }
    #[must_use]
    pub fn with_environment(env: WithEnvironment) -> Self {
        BooleanExpr::WithEnvironment(Box::new(env))
    }

    /// Collect the names of the routing policies this expression calls, at any depth
    pub fn collect_calls(&self, calls: &mut BTreeSet<String>) {
        match self {
            BooleanExpr::Call(name) => {
                calls.insert(name.clone());
            }
            BooleanExpr::Not(inner) => inner.collect_calls(calls),
            BooleanExpr::Conjunction(j) | BooleanExpr::Disjunction(j) => {
                j.exprs.iter().for_each(|e| e.collect_calls(calls));
            }
            BooleanExpr::WithEnvironment(env) => {
                env.expr.collect_calls(calls);
                env.pre
                    .iter()
                    .chain(env.post.iter())
                    .chain(env.post_true.iter())
                    .for_each(|s| s.collect_calls(calls));
            }
            _ => {}
        }
    }
}

fn join<T: Display>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Display for PrefixSetExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrefixSetExpr::Explicit(space) => write!(f, "{space}"),
            PrefixSetExpr::Named(name) => write!(f, "list {name}"),
        }
    }
}

impl Display for BooleanExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BooleanExpr::True => write!(f, "true"),
            BooleanExpr::False => write!(f, "false"),
            BooleanExpr::MatchProtocol(protocols) => write!(f, "protocol in {{{}}}", join(protocols)),
            BooleanExpr::MatchPrefixSet(set) => write!(f, "destination in {set}"),
            BooleanExpr::MatchCommunities(name) => write!(f, "community-list {name}"),
            BooleanExpr::MatchAsPath(name) => write!(f, "as-path-list {name}"),
            BooleanExpr::MatchTag(tag) => write!(f, "tag {tag}"),
            BooleanExpr::Not(inner) => write!(f, "not({inner})"),
            BooleanExpr::Conjunction(j) => write!(f, "and({})", join(&j.exprs)),
            BooleanExpr::Disjunction(j) => write!(f, "or({})", join(&j.exprs)),
            BooleanExpr::Call(name) => write!(f, "call {name}"),
            BooleanExpr::WithEnvironment(env) => write!(
                f,
                "with-env[{}]({})[{}][{}]",
                join(&env.pre),
                env.expr,
                join(&env.post),
                join(&env.post_true)
            ),
        }
    }
}
