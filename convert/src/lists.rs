// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Translation of vendor match lists

use crate::errors::ConvertResult;
use model::Configuration;
use model::filters::{
    AsPathAccessList, AsPathAccessListLine, CommunityList, CommunityListLine, RouteFilterLine,
    RouteFilterList,
};
use prefix::PrefixRange;
use tracing::debug;
use vendor::VendorConfig;
use vendor::lists::{IpAsPathAccessList, IpCommunityList, IpPrefixList, IpPrefixListLine};

/// One literal line per community, all with the action of the list
#[must_use]
pub fn to_community_list(list: &IpCommunityList) -> CommunityList {
    let lines = list
        .communities
        .iter()
        .map(|community| CommunityListLine {
            action: list.action,
            community: *community,
        })
        .collect();
    CommunityList::new(&list.name, lines, false)
}

/// Regex matching AS paths that contain `asn` anywhere
#[must_use]
pub fn as_path_regex(asn: u32) -> String {
    format!("(^| ){asn}($| )")
}

#[must_use]
pub fn to_as_path_access_list(list: &IpAsPathAccessList) -> AsPathAccessList {
    let lines = list
        .lines
        .iter()
        .map(|line| AsPathAccessListLine {
            action: line.action,
            regex: as_path_regex(line.asn),
        })
        .collect();
    AsPathAccessList::new(&list.name, lines)
}

fn to_route_filter_line(line: &IpPrefixListLine) -> RouteFilterLine {
    RouteFilterLine::new(
        line.action,
        PrefixRange::new(line.prefix, line.min_len, line.max_len),
    )
}

/// Lines are kept in sequence order
#[must_use]
pub fn to_route_filter_list(list: &IpPrefixList) -> RouteFilterList {
    list.lines
        .values()
        .map(to_route_filter_line)
        .fold(RouteFilterList::new(&list.name), RouteFilterList::add_line)
}

/// Translate all the match lists of a device
pub fn convert_lists(vendor: &VendorConfig, config: &mut Configuration) -> ConvertResult {
    debug!(
        "Translating {} community lists, {} AS-path lists, {} prefix lists",
        vendor.community_lists.len(),
        vendor.as_path_lists.len(),
        vendor.prefix_lists.len()
    );
    for list in vendor.community_lists.values() {
        config.add_community_list(to_community_list(list))?;
    }
    for list in vendor.as_path_lists.values() {
        config.add_as_path_access_list(to_as_path_access_list(list))?;
    }
    for list in vendor.prefix_lists.values() {
        config.add_route_filter_list(to_route_filter_list(list))?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use model::LineAction;
    use model::filters::Community;
    use pretty_assertions::assert_eq;
    use prefix::Prefix;

    #[test]
    fn community_list_lines() {
        let list = IpCommunityList::new(
            "CL",
            LineAction::Deny,
            vec![Community::Standard(65000, 1), Community::NoExport],
        );
        let converted = to_community_list(&list);
        assert_eq!(converted.name(), "CL");
        assert!(!converted.invert_match());
        assert_eq!(
            converted.lines(),
            [
                CommunityListLine {
                    action: LineAction::Deny,
                    community: Community::Standard(65000, 1)
                },
                CommunityListLine {
                    action: LineAction::Deny,
                    community: Community::NoExport
                }
            ]
        );
    }

    #[test]
    fn as_path_list_regexes() {
        let list = IpAsPathAccessList::new("AL")
            .add_line(LineAction::Permit, 65001)
            .add_line(LineAction::Deny, 4_200_000_000);
        let converted = to_as_path_access_list(&list);
        let regexes: Vec<_> = converted.lines().iter().map(|l| l.regex.as_str()).collect();
        assert_eq!(regexes, vec!["(^| )65001($| )", "(^| )4200000000($| )"]);
        assert_eq!(converted.lines()[1].action, LineAction::Deny);
    }

    #[test]
    fn prefix_list_in_sequence_order() {
        let mut plist = IpPrefixList::new("PL");
        let deny = IpPrefixListLine::new(LineAction::Deny, Prefix::expect_from("10.1.0.0/16"));
        let permit = IpPrefixListLine::new(LineAction::Permit, Prefix::expect_from("10.0.0.0/8"))
            .set_ge(16)
            .set_le(24);
        plist.add_line(Some(20), permit).unwrap();
        plist.add_line(Some(10), deny).unwrap();

        let rfl = to_route_filter_list(&plist);
        assert_eq!(
            rfl.lines(),
            [
                RouteFilterLine::new(
                    LineAction::Deny,
                    PrefixRange::exact(Prefix::expect_from("10.1.0.0/16"))
                ),
                RouteFilterLine::new(
                    LineAction::Permit,
                    PrefixRange::new(Prefix::expect_from("10.0.0.0/8"), 16, 24)
                ),
            ]
        );
        assert!(!rfl.permits(&Prefix::expect_from("10.1.0.0/16")));
        assert!(rfl.permits(&Prefix::expect_from("10.2.3.0/24")));
        assert!(!rfl.permits(&Prefix::expect_from("10.0.0.0/8")));
    }
}
