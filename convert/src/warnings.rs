// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Non-fatal conversion diagnostics

use std::fmt::Display;
use tracing::warn;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Ordered list of the problems found while converting a device. Recording a
/// warning never changes the outcome of a conversion.
pub struct Warnings {
    entries: Vec<String>,
}

impl Warnings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    /// Record a warning, and log it
    pub fn red_flag(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{message}");
        self.entries.push(message);
    }
    /// Record a warning unless the same one was already recorded
    pub fn red_flag_once(&mut self, message: impl Into<String>) {
        let message = message.into();
        if !self.entries.contains(&message) {
            self.red_flag(message);
        }
    }
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    /// Tell if some warning contains `needle`
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|w| w.contains(needle))
    }
}

impl Display for Warnings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for entry in &self.entries {
            writeln!(f, "warning: {entry}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    #[test]
    #[traced_test]
    fn red_flags_are_kept_in_order_and_logged() {
        let mut warnings = Warnings::new();
        warnings.red_flag("first");
        warnings.red_flag(format!("second {}", 2));
        assert_eq!(warnings.entries(), ["first".to_owned(), "second 2".to_owned()]);
        assert!(warnings.contains("cond 2"));
        assert_eq!(warnings.to_string(), "warning: first\nwarning: second 2\n");
        assert!(logs_contain("second 2"));
    }

    #[test]
    fn red_flag_once_skips_repeats() {
        let mut warnings = Warnings::new();
        warnings.red_flag_once("vni 10");
        warnings.red_flag_once("vni 20");
        warnings.red_flag_once("vni 10");
        assert_eq!(warnings.entries(), ["vni 10".to_owned(), "vni 20".to_owned()]);
    }
}
