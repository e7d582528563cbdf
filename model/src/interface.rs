// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Vendor-independent model: interfaces

use crate::config::DEFAULT_VRF_NAME;
use crate::ospf::OspfInterfaceSettings;
use prefix::InterfaceAddress;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// A layer-3 interface and the VRF it belongs to
pub struct Interface {
    pub name: String, /* key */
    pub vrf: String,
    pub primary: Option<InterfaceAddress>,
    pub secondaries: Vec<InterfaceAddress>,
    pub ospf: Option<OspfInterfaceSettings>,
}

impl Interface {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            vrf: DEFAULT_VRF_NAME.to_owned(),
            primary: None,
            secondaries: vec![],
            ospf: None,
        }
    }
    #[must_use]
    pub fn set_vrf(mut self, vrf: &str) -> Self {
        self.vrf = vrf.to_owned();
        self
    }
    /// Set the addresses of the interface. The first one becomes the primary address.
    #[must_use]
    pub fn set_addresses(mut self, addresses: impl IntoIterator<Item = InterfaceAddress>) -> Self {
        let mut addresses = addresses.into_iter();
        self.primary = addresses.next();
        self.secondaries = addresses.collect();
        self
    }
    pub fn set_ospf(&mut self, settings: OspfInterfaceSettings) {
        self.ospf = Some(settings);
    }
    /// All the addresses of the interface, primary first
    pub fn all_addresses(&self) -> impl Iterator<Item = &InterfaceAddress> {
        self.primary.iter().chain(self.secondaries.iter())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn first_address_is_primary() {
        let iface = Interface::new("swp1").set_addresses([
            InterfaceAddress::expect_from("10.0.0.1/31"),
            InterfaceAddress::expect_from("10.1.0.1/24"),
        ]);
        assert_eq!(iface.vrf, DEFAULT_VRF_NAME);
        assert_eq!(iface.primary, Some(InterfaceAddress::expect_from("10.0.0.1/31")));
        assert_eq!(iface.all_addresses().count(), 2);
    }
}
