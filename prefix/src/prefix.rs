// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Type to represent IPv4 network prefixes.

use ipnet::Ipv4Net;
use std::fmt::{Debug, Display};
pub use std::net::Ipv4Addr;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PrefixError {
    #[error("Invalid Prefix: {0}")]
    Invalid(String),
    #[error("Mask length {0} is invalid")]
    InvalidLength(u8),
    #[error("Invalid interface address format: {0}")]
    InvalidFormat(String),
}

/// An IPv4 prefix. The host bits of the address are always cleared, so two
/// prefixes that cover the same addresses compare equal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Prefix(Ipv4Net);

impl Prefix {
    pub const MAX_LEN: u8 = 32;

    /// Build a prefix from an address and a mask length, clearing host bits.
    pub fn new(address: Ipv4Addr, length: u8) -> Result<Self, PrefixError> {
        let net = Ipv4Net::new(address, length).map_err(|_| PrefixError::InvalidLength(length))?;
        Ok(Self(net.trunc()))
    }

    /// Build 0.0.0.0/0. "Default" is a very overloaded term. Calling this `root`.
    #[must_use]
    pub fn root() -> Prefix {
        Prefix::new(Ipv4Addr::UNSPECIFIED, 0).unwrap_or_else(|_| unreachable!())
    }

    /// Tell if a prefix is the root prefix
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.length() == 0
    }

    /// Get the network address of the prefix
    #[must_use]
    pub fn network(&self) -> Ipv4Addr {
        self.0.network()
    }

    /// Get prefix length
    #[must_use]
    pub fn length(&self) -> u8 {
        self.0.prefix_len()
    }

    /// Check whether prefix covers a given address
    #[must_use]
    pub fn covers_addr(&self, addr: &Ipv4Addr) -> bool {
        self.0.contains(addr)
    }

    /// Check whether prefix covers another prefix. A prefix covers itself.
    #[must_use]
    pub fn covers(&self, other: &Prefix) -> bool {
        self.0.contains(&other.0)
    }

    /// Tell if prefix is a host
    #[must_use]
    pub fn is_host(&self) -> bool {
        self.length() == Self::MAX_LEN
    }

    #[cfg(any(test, feature = "testing"))]
    #[allow(clippy::missing_panics_doc)]
    #[allow(clippy::expect_used)]
    #[must_use]
    pub fn expect_from(s: &str) -> Self {
        Prefix::from_str(s).expect("Invalid prefix")
    }
}

impl TryFrom<(Ipv4Addr, u8)> for Prefix {
    type Error = PrefixError;

    fn try_from((address, length): (Ipv4Addr, u8)) -> Result<Self, Self::Error> {
        Prefix::new(address, length)
    }
}

impl TryFrom<(&str, u8)> for Prefix {
    type Error = PrefixError;

    fn try_from((addr_str, mask_len): (&str, u8)) -> Result<Self, Self::Error> {
        let address = Ipv4Addr::from_str(addr_str)
            .map_err(|_| PrefixError::Invalid("Invalid address format".to_string()))?;
        Prefix::new(address, mask_len)
    }
}

impl From<Ipv4Net> for Prefix {
    fn from(value: Ipv4Net) -> Self {
        Self(value.trunc())
    }
}

impl From<Prefix> for Ipv4Net {
    fn from(value: Prefix) -> Self {
        value.0
    }
}

impl FromStr for Prefix {
    type Err = PrefixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ipv4Net::from_str(s)
            .map(Prefix::from)
            .map_err(|_| PrefixError::Invalid(s.to_string()))
    }
}

impl Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.network(), self.length())
    }
}
