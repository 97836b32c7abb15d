//! Syntactic validation of the server address entered during `config`
//!
//! Three shapes are accepted: a dotted quad (no octet range check), a
//! fully-qualified domain name ending in an alphabetic TLD, and a local
//! multi-label hostname. Nothing is resolved.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

static IPV4_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{1,3}\.){3}[0-9]{1,3}$").expect("ipv4 regex is valid"));

static DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*\.[a-zA-Z]{2,}$",
    )
    .expect("domain regex is valid")
});

// Local names require 2-63 character labels; "192.168.1" must not match.
static LOCAL_DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9][a-zA-Z0-9-]{0,61}[a-zA-Z0-9](?:\.[a-zA-Z0-9][a-zA-Z0-9-]{0,61}[a-zA-Z0-9])+$",
    )
    .expect("local domain regex is valid")
});

/// Message shown when an address is rejected
pub const INVALID_ADDRESS_MESSAGE: &str =
    "invalid format: must be an IP (XXX.XXX.XXX.XXX) or a domain (e.g. dns.netsocs.com)";

/// Check whether `address` is an IPv4 literal or a hostname
pub fn is_valid_address(address: &str) -> bool {
    IPV4_RE.is_match(address) || DOMAIN_RE.is_match(address) || LOCAL_DOMAIN_RE.is_match(address)
}

/// Same as [`is_valid_address`] but reports a validation error
pub fn validate_address(address: &str) -> Result<()> {
    if is_valid_address(address) {
        Ok(())
    } else {
        Err(Error::validation(INVALID_ADDRESS_MESSAGE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_dotted_quad() {
        assert!(is_valid_address("192.168.1.1"));
        assert!(is_valid_address("10.0.0.254"));
    }

    #[test]
    fn test_dotted_quad_has_no_range_check() {
        assert!(is_valid_address("999.999.999.999"));
        assert!(is_valid_address("256.1.1.1"));
    }

    #[test]
    fn test_rejects_partial_quads() {
        assert!(!is_valid_address("192.168.1"));
        assert!(!is_valid_address("1234.1.1.1.1"));
    }

    #[test]
    fn test_accepts_fqdn() {
        assert!(is_valid_address("servidor.netsocs.com"));
        assert!(is_valid_address("dns.netsocs.com"));
        assert!(is_valid_address("a.io"));
        assert!(is_valid_address("my-host.example.org"));
    }

    #[test]
    fn test_accepts_local_multi_label_hostname() {
        assert!(is_valid_address("dns.netsocs.local"));
        assert!(is_valid_address("node1.cluster2"));
    }

    #[test]
    fn test_rejects_single_label_and_bad_hyphens() {
        assert!(!is_valid_address("localhost"));
        assert!(!is_valid_address("-bad.example.com"));
        assert!(!is_valid_address("bad-.example.com"));
        assert!(!is_valid_address(""));
        assert!(!is_valid_address("https://netsocs.com"));
        assert!(!is_valid_address("host name.com"));
    }

    #[test]
    fn test_rejects_overlong_label() {
        let label = "a".repeat(64);
        assert!(!is_valid_address(&format!("{}.com", label)));
        let label = "a".repeat(63);
        assert!(is_valid_address(&format!("{}.com", label)));
    }

    #[test]
    fn test_validate_address_error() {
        let err = validate_address("not valid").unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(validate_address("10.0.0.1").is_ok());
    }
}
