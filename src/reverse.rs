// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Reversed address notation as used by DNSBL queries.
//!
//! A DNSBL is asked about `1.2.3.4` by looking up `4.3.2.1.<zone>`. IPv6 addresses are written
//! nibble by nibble, lowest nibble first, like in `ip6.arpa`.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Returns the reversed form of `ip` without any zone suffix.
pub fn reverse(ip: &IpAddr) -> String {
    match ip {
        IpAddr::V4(ip) => reverse_v4(ip),
        IpAddr::V6(ip) => reverse_v6(ip),
    }
}

fn reverse_v4(ip: &Ipv4Addr) -> String {
    let [a, b, c, d] = ip.octets();
    format!("{}.{}.{}.{}", d, c, b, a)
}

fn reverse_v6(ip: &Ipv6Addr) -> String {
    let mut nibbles = Vec::with_capacity(32);
    for octet in ip.octets().iter().rev() {
        nibbles.push(format!("{:x}", octet & 0x0f));
        nibbles.push(format!("{:x}", octet >> 4));
    }
    nibbles.join(".")
}

/// Reverses the components of a dotted quad, e.g. `"1.2.3.4"` becomes `"4.3.2.1"`.
///
/// `dotted_quad` must be a valid IPv4 address in dotted decimal notation; parse untrusted input
/// into an `IpAddr` first and use [`reverse`] instead.
pub fn reverse_dotted(dotted_quad: &str) -> String {
    let parts: Vec<&str> = dotted_quad.split('.').collect();
    debug_assert!(
        parts.len() == 4 && parts.iter().all(|x| x.parse::<u8>().is_ok()),
        "'{}' is not a dotted quad",
        dotted_quad
    );
    parts.into_iter().rev().collect::<Vec<_>>().join(".")
}

/// Builds the fully qualified DNSBL query name for `ip` in zone `domain`.
///
/// The returned name always ends with exactly one dot so that resolvers neither apply search
/// domains nor ndots rules to it.
pub fn query_name(ip: &IpAddr, domain: &str) -> String {
    format!("{}.{}.", reverse(ip), domain.trim_end_matches('.'))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use spectral::prelude::*;

    use super::*;

    #[test]
    fn reverse_ipv4() {
        let ip = IpAddr::from_str("1.2.3.4").unwrap();

        asserting("octets are reversed").that(&reverse(&ip)).is_equal_to("4.3.2.1".to_string());
    }

    #[test]
    fn reverse_ipv4_twice_is_identity() {
        for ip in &["127.0.0.2", "192.168.10.1", "8.8.4.4", "0.0.0.0", "255.255.255.255", "10.0.200.3"] {
            let ip = IpAddr::from_str(ip).unwrap();

            let reversed = IpAddr::from_str(&reverse(&ip)).unwrap();
            let twice = reverse(&reversed);

            asserting(&format!("reversing {} twice", ip))
                .that(&twice)
                .is_equal_to(ip.to_string());
        }
    }

    #[test]
    fn reverse_ipv6_nibbles() {
        let ip = IpAddr::from_str("2001:db8::567:89ab").unwrap();
        let expected = "b.a.9.8.7.6.5.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.8.b.d.0.1.0.0.2";

        let reversed = reverse(&ip);

        assert_that(&reversed.as_str()).is_equal_to(expected);
        assert_that(&reversed.split('.').count()).is_equal_to(32);
    }

    #[test]
    fn reverse_dotted_quad() {
        assert_that(&reverse_dotted("192.0.2.99")).is_equal_to("99.2.0.192".to_string());
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn reverse_dotted_rejects_malformed_input() {
        reverse_dotted("1.2.3");
    }

    #[test]
    fn query_name_is_fully_qualified() {
        let ip = IpAddr::from_str("1.2.3.4").unwrap();

        assert_that(&query_name(&ip, "zen.spamhaus.org")).is_equal_to("4.3.2.1.zen.spamhaus.org.".to_string());
        assert_that(&query_name(&ip, "zen.spamhaus.org.")).is_equal_to("4.3.2.1.zen.spamhaus.org.".to_string());
    }
}
