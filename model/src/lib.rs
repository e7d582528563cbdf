// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Vendor-independent routing configuration model. A [`Configuration`] owns
//! per-VRF protocol processes, interfaces and a set of named objects (routing
//! policies and match lists) that refer to each other by name only.

#![deny(
    unsafe_code,
    clippy::all,
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::struct_excessive_bools)]

pub mod bgp;
pub mod config;
pub mod errors;
pub mod evpn;
pub mod filters;
pub mod generated;
pub mod interface;
pub mod ospf;
pub mod policy;
pub mod protocol;
pub mod vrf;

pub use config::{Configuration, DEFAULT_VRF_NAME}; // re-export
pub use errors::{ModelError, ModelResult}; // re-export
pub use protocol::{LineAction, OriginType, RoutingProtocol}; // re-export
