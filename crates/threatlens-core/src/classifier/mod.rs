//! Scan input classification.
//!
//! Decides whether a raw token is an IPv4 address or a file hash using
//! syntactic checks only.

mod patterns;
mod token;

pub use patterns::{classify, is_valid_hash, is_valid_ipv4};
pub use token::{HashAlgorithm, ScanKind, TokenKind};
