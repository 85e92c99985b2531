//! Token categories produced by classification.

use serde::{Deserialize, Serialize};

/// Digest algorithm implied by a hash token's length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    /// 32 hex characters.
    Md5,
    /// 40 hex characters.
    Sha1,
    /// 64 hex characters.
    Sha256,
}

impl HashAlgorithm {
    /// Maps a hex digest length to its algorithm.
    pub fn from_len(len: usize) -> Option<Self> {
        match len {
            32 => Some(HashAlgorithm::Md5),
            40 => Some(HashAlgorithm::Sha1),
            64 => Some(HashAlgorithm::Sha256),
            _ => None,
        }
    }

    /// Returns a human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "MD5",
            HashAlgorithm::Sha1 => "SHA-1",
            HashAlgorithm::Sha256 => "SHA-256",
        }
    }
}

/// Category of a raw scan token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Dotted-decimal IPv4 address (syntactic match only).
    Ipv4,
    /// MD5, SHA-1 or SHA-256 hex digest.
    FileHash(HashAlgorithm),
    /// Neither of the above.
    Invalid,
}

/// Which lookup a valid token is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanKind {
    /// IP reputation lookup.
    Ip,
    /// File hash reputation lookup.
    Hash,
}

impl ScanKind {
    /// Returns a human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            ScanKind::Ip => "IP Address",
            ScanKind::Hash => "File Hash",
        }
    }
}
