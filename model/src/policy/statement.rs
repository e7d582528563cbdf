// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Statements of routing policies

use super::expr::BooleanExpr;
use crate::filters::Community;
use crate::protocol::OriginType;
use std::collections::BTreeSet;
use std::fmt::Display;
use std::net::Ipv4Addr;

/// Statements without arguments
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StaticStatement {
    /* terminate the current policy with a verdict */
    ReturnTrue,
    ReturnFalse,
    /* terminate policy evaluation altogether with a verdict */
    ExitAccept,
    ExitReject,
    /* mark the route as suppressed, without terminating */
    Suppress,
    /* intermediate BGP attributes */
    SetWriteIntermediateBgpAttributes,
    UnsetWriteIntermediateBgpAttributes,
    SetReadIntermediateBgpAttributes,
}

impl Display for StaticStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StaticStatement::ReturnTrue => "return-true",
            StaticStatement::ReturnFalse => "return-false",
            StaticStatement::ExitAccept => "exit-accept",
            StaticStatement::ExitReject => "exit-reject",
            StaticStatement::Suppress => "suppress",
            StaticStatement::SetWriteIntermediateBgpAttributes => "set-write-intermediate-bgp",
            StaticStatement::UnsetWriteIntermediateBgpAttributes => "unset-write-intermediate-bgp",
            StaticStatement::SetReadIntermediateBgpAttributes => "set-read-intermediate-bgp",
        };
        write!(f, "{s}")
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NextHopExpr {
    SelfNextHop,
    Address(Ipv4Addr),
}

impl Display for NextHopExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NextHopExpr::SelfNextHop => write!(f, "self"),
            NextHopExpr::Address(a) => write!(f, "{a}"),
        }
    }
}

/// A conditional statement
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct If {
    pub comment: Option<String>,
    pub guard: BooleanExpr,
    pub true_statements: Vec<Statement>,
    pub false_statements: Vec<Statement>,
}

impl If {
    #[must_use]
    pub fn new(guard: BooleanExpr, true_statements: Vec<Statement>) -> Self {
        Self {
            comment: None,
            guard,
            true_statements,
            false_statements: vec![],
        }
    }
    #[must_use]
    pub fn set_false_statements(mut self, false_statements: Vec<Statement>) -> Self {
        self.false_statements = false_statements;
        self
    }
    #[must_use]
    pub fn set_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_owned());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Statement {
    If(If),
    /// run the statements of the named policy
    Call(String),
    SetOrigin(OriginType),
    SetNextHop(NextHopExpr),
    SetLocalPreference(u32),
    SetMetric(u32),
    SetTag(u32),
    SetWeight(u32),
    SetCommunities {
        communities: BTreeSet<Community>,
        additive: bool,
    },
    Static(StaticStatement),
}

impl From<StaticStatement> for Statement {
    fn from(value: StaticStatement) -> Self {
        Statement::Static(value)
    }
}
impl From<If> for Statement {
    fn from(value: If) -> Self {
        Statement::If(value)
    }
}

impl Statement {
    pub const RETURN_TRUE: Statement = Statement::Static(StaticStatement::ReturnTrue);
    pub const RETURN_FALSE: Statement = Statement::Static(StaticStatement::ReturnFalse);
    pub const EXIT_ACCEPT: Statement = Statement::Static(StaticStatement::ExitAccept);
    pub const EXIT_REJECT: Statement = Statement::Static(StaticStatement::ExitReject);
    pub const SUPPRESS: Statement = Statement::Static(StaticStatement::Suppress);

    /// Collect the names of the routing policies this statement calls, at any depth
    pub fn collect_calls(&self, calls: &mut BTreeSet<String>) {
        match self {
            Statement::If(stmt) => {
                stmt.guard.collect_calls(calls);
                stmt.true_statements
                    .iter()
                    .chain(stmt.false_statements.iter())
                    .for_each(|s| s.collect_calls(calls));
            }
            Statement::Call(name) => {
                calls.insert(name.clone());
            }
            _ => {}
        }
    }
}

/// Display for single-line statements. Conditionals are laid out by the policy renderer.
impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Statement::If(stmt) => write!(f, "if {} {{..}}", stmt.guard),
            Statement::Call(name) => write!(f, "call {name}"),
            Statement::SetOrigin(origin) => write!(f, "set origin {origin}"),
            Statement::SetNextHop(nh) => write!(f, "set next-hop {nh}"),
            Statement::SetLocalPreference(lp) => write!(f, "set local-preference {lp}"),
            Statement::SetMetric(metric) => write!(f, "set metric {metric}"),
            Statement::SetTag(tag) => write!(f, "set tag {tag}"),
            Statement::SetWeight(weight) => write!(f, "set weight {weight}"),
            Statement::SetCommunities {
                communities,
                additive,
            } => {
                write!(f, "set community")?;
                for c in communities {
                    write!(f, " {c}")?;
                }
                if *additive {
                    write!(f, " additive")?;
                }
                Ok(())
            }
            Statement::Static(s) => write!(f, "{s}"),
        }
    }
}
