// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Routing policies: named, ordered lists of statements over route attributes.
//! Policies refer to each other by name only, through [`BooleanExpr::Call`] and
//! [`Statement::Call`].

pub mod expr;
pub mod render;
pub mod statement;

pub use expr::{BooleanExpr, Junction, PrefixSetExpr, WithEnvironment}; // re-export
pub use statement::{If, NextHopExpr, Statement, StaticStatement}; // re-export

use std::collections::BTreeSet;

/// A named routing policy. Once built, a policy can only be read.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutingPolicy {
    name: String,
    statements: Vec<Statement>,
}

impl RoutingPolicy {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            statements: vec![],
        }
    }
    #[must_use]
    pub fn add_statement(mut self, statement: impl Into<Statement>) -> Self {
        self.statements.push(statement.into());
        self
    }
    #[must_use]
    pub fn add_statements(mut self, statements: impl IntoIterator<Item = Statement>) -> Self {
        self.statements.extend(statements);
        self
    }
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }
    /// The names of the policies called from this one
    #[must_use]
    pub fn calls(&self) -> BTreeSet<String> {
        let mut calls = BTreeSet::new();
        self.statements
            .iter()
            .for_each(|s| s.collect_calls(&mut calls));
        calls
    }
}
