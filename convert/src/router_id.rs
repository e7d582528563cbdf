// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Router-id inference, for processes that do not set one

use std::collections::BTreeMap;
use std::net::Ipv4Addr;
use vendor::interface::{Interface, Loopback};

/// The numerically largest loopback address outside 127.0.0.0/8, if the loopback is
/// configured and has one. Otherwise the largest address of any interface. Otherwise
/// 0.0.0.0.
#[must_use]
pub fn infer_router_id(loopback: &Loopback, interfaces: &BTreeMap<String, Interface>) -> Ipv4Addr {
    if loopback.configured {
        let max_lo = loopback
            .addresses
            .iter()
            .filter(|a| !a.address.is_loopback())
            .max();
        if let Some(address) = max_lo {
            return address.address;
        }
    }
    interfaces
        .values()
        .flat_map(|iface| iface.addresses.iter())
        .max()
        .map_or(Ipv4Addr::UNSPECIFIED, |a| a.address)
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use prefix::InterfaceAddress;

    fn interfaces(addresses: &[&str]) -> BTreeMap<String, Interface> {
        addresses
            .iter()
            .enumerate()
            .map(|(n, a)| {
                let name = format!("swp{n}");
                let iface = Interface::new(&name).add_address(InterfaceAddress::expect_from(a));
                (name, iface)
            })
            .collect()
    }

    #[test]
    fn loopback_wins_when_configured() {
        let lo = Loopback::new([
            InterfaceAddress::expect_from("127.0.0.1/8"),
            InterfaceAddress::expect_from("1.1.1.1/32"),
            InterfaceAddress::expect_from("2.2.2.2/32"),
        ]);
        let ifaces = interfaces(&["10.0.0.1/24"]);
        assert_eq!(infer_router_id(&lo, &ifaces), Ipv4Addr::new(2, 2, 2, 2));
    }

    #[test]
    fn only_internal_loopback_addresses() {
        let lo = Loopback::new([InterfaceAddress::expect_from("127.0.0.1/8")]);
        let ifaces = interfaces(&["10.0.0.1/24", "192.168.0.1/24", "172.16.0.1/16"]);
        assert_eq!(infer_router_id(&lo, &ifaces), Ipv4Addr::new(192, 168, 0, 1));
    }

    #[test]
    fn unconfigured_loopback_is_ignored() {
        let mut lo = Loopback::new([InterfaceAddress::expect_from("9.9.9.9/32")]);
        lo.configured = false;
        let ifaces = interfaces(&["10.0.0.1/24"]);
        assert_eq!(infer_router_id(&lo, &ifaces), Ipv4Addr::new(10, 0, 0, 1));
    }

    #[test]
    fn nothing_to_infer_from() {
        assert_eq!(
            infer_router_id(&Loopback::default(), &BTreeMap::new()),
            Ipv4Addr::UNSPECIFIED
        );
    }
}
