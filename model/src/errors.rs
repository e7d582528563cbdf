// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Errors raised while populating a vendor-independent configuration

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("A {kind} named '{name}' already exists")]
    DuplicateName { kind: &'static str, name: String },
    #[error("No such VRF '{0}'")]
    NoSuchVrf(String),
}

impl ModelError {
    pub(crate) fn duplicate(kind: &'static str, name: impl Into<String>) -> Self {
        ModelError::DuplicateName {
            kind,
            name: name.into(),
        }
    }
}

/// Result-like type for configuration model operations
pub type ModelResult<T = ()> = Result<T, ModelError>;
