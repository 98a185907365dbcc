//! Subnet size parsing and available-IP accounting.
//!
//! A subnet size arrives as free text in one of three forms: `/27`, a bare
//! `27`, or a dotted-decimal mask `255.255.255.224`. All three resolve to
//! the same prefix length. Unparseable input degrades to "available IPs
//! unknown" rather than an error; the planner then skips the subnet
//! comparison.

use std::net::Ipv4Addr;

/// Addresses the Azure platform reserves in every container-app subnet.
pub const AZURE_RESERVED_IPS: i64 = 14;

/// Parse a subnet size in any of its three textual forms into a prefix
/// length. Returns `None` for anything unparseable or out of `0..=32`.
pub fn parse_prefix_len(input: &str) -> Option<u8> {
    let s = input.trim();
    if let Some(rest) = s.strip_prefix('/') {
        return in_range(rest.parse().ok()?);
    }
    if s.contains('.') {
        // Dotted-decimal mask; the prefix length is its set-bit count.
        let mask: Ipv4Addr = s.parse().ok()?;
        return Some(u32::from(mask).count_ones() as u8);
    }
    in_range(s.parse().ok()?)
}

fn in_range(prefix: u8) -> Option<u8> {
    (prefix <= 32).then_some(prefix)
}

/// Usable addresses in a subnet of the given prefix length:
/// `2^(32-prefix) - 14`.
///
/// The figure is signed. For prefixes 29 and up the reservation exceeds
/// the subnet and the result goes negative; any usage then overruns.
pub fn available_ips(prefix: u8) -> i64 {
    (1i64 << (32 - u32::from(prefix))) - AZURE_RESERVED_IPS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_forms_agree_for_every_prefix() {
        for prefix in 0..=32u8 {
            let mask = Ipv4Addr::from(if prefix == 0 {
                0u32
            } else {
                u32::MAX << (32 - u32::from(prefix))
            });
            let slashed = format!("/{prefix}");
            let bare = format!("{prefix}");
            let dotted = mask.to_string();

            assert_eq!(parse_prefix_len(&slashed), Some(prefix));
            assert_eq!(parse_prefix_len(&bare), Some(prefix));
            assert_eq!(parse_prefix_len(&dotted), Some(prefix), "mask {dotted}");
        }
    }

    #[test]
    fn available_ips_formula() {
        for prefix in 0..=32u8 {
            let expected = (1i64 << (32 - u32::from(prefix))) - 14;
            assert_eq!(available_ips(prefix), expected);
        }
        assert_eq!(available_ips(27), 18);
        assert_eq!(available_ips(24), 242);
        assert_eq!(available_ips(0), 4_294_967_282);
    }

    #[test]
    fn tiny_subnets_go_negative() {
        assert_eq!(available_ips(32), -13);
        assert_eq!(available_ips(29), -6);
    }

    #[test]
    fn slash_form_tolerates_only_outer_whitespace() {
        assert_eq!(parse_prefix_len(" /27 "), Some(27));
        // Interior whitespace is not one of the three accepted forms.
        assert_eq!(parse_prefix_len("/ 27"), None);
    }

    #[test]
    fn dotted_mask_matches_slash_form() {
        assert_eq!(parse_prefix_len("255.255.255.224"), parse_prefix_len("/27"));
        assert_eq!(parse_prefix_len("255.255.255.0"), Some(24));
        assert_eq!(parse_prefix_len("0.0.0.0"), Some(0));
        assert_eq!(parse_prefix_len("255.255.255.255"), Some(32));
    }

    #[test]
    fn out_of_range_and_garbage_are_rejected() {
        assert_eq!(parse_prefix_len("/33"), None);
        assert_eq!(parse_prefix_len("33"), None);
        assert_eq!(parse_prefix_len("-1"), None);
        assert_eq!(parse_prefix_len(""), None);
        assert_eq!(parse_prefix_len("subnet"), None);
        assert_eq!(parse_prefix_len("255.255.256.0"), None);
        assert_eq!(parse_prefix_len("/abc"), None);
    }
}
