// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Fatal conversion errors. Anything that is not fatal is recorded in [`crate::Warnings`].

use model::ModelError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    #[error("Invalid remote-as type for BGP neighbor {0}: remote AS is set without a type")]
    InvalidRemoteAsType(String),
    #[error("Failed to compile route-map {name}: {reason}")]
    RouteMapCompile { name: String, reason: String },
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result-like type for conversion steps
pub type ConvertResult<T = ()> = Result<T, ConvertError>;
