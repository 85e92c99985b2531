//! Regex checks for IPv4 addresses and hex digests.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{HashAlgorithm, TokenKind};

/// Four dot-separated groups of 1-3 digits.
///
/// Octet values are not range-checked, so `999.1.1.1` is accepted. Existing
/// clients rely on this permissive syntax; tighten it only deliberately.
static IPV4_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[0-9]{1,3}\.){3}[0-9]{1,3}$").expect("IPv4 pattern is valid")
});

/// MD5, SHA-1 or SHA-256 hex digest, either case.
static HASH_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[a-fA-F0-9]{32}|[a-fA-F0-9]{40}|[a-fA-F0-9]{64})$")
        .expect("hash pattern is valid")
});

/// Returns true if `s` looks like a dotted-decimal IPv4 address.
pub fn is_valid_ipv4(s: &str) -> bool {
    IPV4_PATTERN.is_match(s)
}

/// Returns true if `s` is a 32, 40 or 64 character hex string.
pub fn is_valid_hash(s: &str) -> bool {
    HASH_PATTERN.is_match(s)
}

/// Classifies a token. The two patterns never overlap.
pub fn classify(s: &str) -> TokenKind {
    if is_valid_ipv4(s) {
        return TokenKind::Ipv4;
    }
    if is_valid_hash(s) {
        if let Some(algo) = HashAlgorithm::from_len(s.len()) {
            return TokenKind::FileHash(algo);
        }
    }
    TokenKind::Invalid
}
