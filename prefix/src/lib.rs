// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! IPv4 prefixes, prefix ranges and interface addresses shared by the vendor
//! and the vendor-independent configuration models.

#![deny(
    unsafe_code,
    clippy::all,
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
#![allow(clippy::missing_errors_doc)]

pub mod address;
pub mod prefix;
pub mod range;

pub use address::InterfaceAddress; // re-export
pub use prefix::{Prefix, PrefixError}; // re-export
pub use range::{PrefixRange, PrefixSpace}; // re-export
