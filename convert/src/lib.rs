// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Conversion of a vendor routing configuration into the vendor-independent model.
//!
//! A conversion builds the VRFs and interfaces of a device, translates its match
//! lists, builds its BGP processes and peers with their routing policies, its
//! OSPF processes, and finally compiles its route-maps. Policies refer to each
//! other by name only; the names of the generated ones live in [`namegen`].

#![deny(
    unsafe_code,
    clippy::all,
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::new_without_default)]

pub mod aggregate;
pub mod bgp;
mod builders;
pub mod convert;
pub mod errors;
pub mod lists;
pub mod namegen;
pub mod ospf;
pub mod params;
pub mod router_id;
pub mod routemap;
pub mod warnings;

pub use convert::{Conversion, convert, convert_configuration}; // re-export
pub use errors::{ConvertError, ConvertResult}; // re-export
pub use params::{ConvertParams, ConvertParamsBuilder}; // re-export
pub use routemap::{BasicRouteMapCompiler, RouteMapCompiler}; // re-export
pub use warnings::Warnings; // re-export
