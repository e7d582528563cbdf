// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Textual rendering of routing policies, mostly for diagnostics

use super::RoutingPolicy;
use super::statement::{If, Statement};
use std::fmt::Display;
use std::ops::AddAssign;

const INDENT: &str = "  ";

#[derive(Debug, Default)]
/// Accumulates indented lines
pub struct PolicyWriter {
    lines: Vec<String>,
}

impl PolicyWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AddAssign<String> for PolicyWriter {
    fn add_assign(&mut self, rhs: String) {
        self.lines.push(rhs);
    }
}
impl AddAssign<Self> for PolicyWriter {
    fn add_assign(&mut self, mut rhs: Self) {
        self.lines.append(&mut rhs.lines);
    }
}

impl Display for PolicyWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Render an object into a [`PolicyWriter`] given a nesting depth
pub trait Render {
    fn render(&self, depth: usize) -> PolicyWriter;
}

impl Render for If {
    fn render(&self, depth: usize) -> PolicyWriter {
        let pad = INDENT.repeat(depth);
        let mut out = PolicyWriter::new();
        if let Some(comment) = &self.comment {
            out += format!("{pad}# {comment}");
        }
        out += format!("{pad}if {}", self.guard);
        out += self.true_statements.render(depth + 1);
        if !self.false_statements.is_empty() {
            out += format!("{pad}else");
            out += self.false_statements.render(depth + 1);
        }
        out
    }
}

impl Render for Statement {
    fn render(&self, depth: usize) -> PolicyWriter {
        match self {
            Statement::If(stmt) => stmt.render(depth),
            other => {
                let mut out = PolicyWriter::new();
                out += format!("{}{other}", INDENT.repeat(depth));
                out
            }
        }
    }
}

impl Render for Vec<Statement> {
    fn render(&self, depth: usize) -> PolicyWriter {
        let mut out = PolicyWriter::new();
        self.iter().for_each(|s| out += s.render(depth));
        out
    }
}

impl Render for RoutingPolicy {
    fn render(&self, depth: usize) -> PolicyWriter {
        let mut out = PolicyWriter::new();
        out += format!("{}policy {}", INDENT.repeat(depth), self.name());
        self.statements()
            .iter()
            .for_each(|s| out += s.render(depth + 1));
        out
    }
}

impl Display for RoutingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(0))
    }
}
