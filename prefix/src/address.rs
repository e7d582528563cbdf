// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Addresses configured on interfaces

use crate::prefix::{Prefix, PrefixError};
use std::fmt::Display;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// An IPv4 address configured on a local interface, with its mask length.
/// Ordering is by the numeric value of the address, then by mask length.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterfaceAddress {
    pub address: Ipv4Addr,
    pub mask_len: u8,
}

impl InterfaceAddress {
    pub fn new(address: Ipv4Addr, mask_len: u8) -> Result<Self, PrefixError> {
        if mask_len > Prefix::MAX_LEN {
            return Err(PrefixError::InvalidLength(mask_len));
        }
        Ok(Self { address, mask_len })
    }

    /// The prefix of the subnet this address lives in
    #[must_use]
    pub fn prefix(&self) -> Prefix {
        Prefix::new(self.address, self.mask_len).unwrap_or_else(|_| unreachable!())
    }

    #[cfg(any(test, feature = "testing"))]
    #[allow(clippy::missing_panics_doc)]
    #[allow(clippy::expect_used)]
    #[must_use]
    pub fn expect_from(s: &str) -> Self {
        InterfaceAddress::from_str(s).expect("Invalid interface address")
    }
}

impl FromStr for InterfaceAddress {
    type Err = PrefixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        let address_str = parts
            .next()
            .ok_or(PrefixError::InvalidFormat(s.to_string()))?;
        let mask_len_str = parts
            .next()
            .ok_or(PrefixError::InvalidFormat(s.to_string()))?;
        if parts.next().is_some() {
            return Err(PrefixError::InvalidFormat(s.to_string()));
        }
        let address = address_str
            .parse::<Ipv4Addr>()
            .map_err(|e| PrefixError::Invalid(e.to_string()))?;
        let mask_len = mask_len_str
            .parse::<u8>()
            .map_err(|_| PrefixError::InvalidFormat(s.to_string()))?;
        Self::new(address, mask_len)
    }
}

impl Display for InterfaceAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.address, self.mask_len)
    }
}
