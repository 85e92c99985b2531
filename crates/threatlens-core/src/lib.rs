//! ThreatLens Core - Input classification and threat-intelligence lookups.
//!
//! A scan token is either an IPv4 address (looked up on AbuseIPDB) or a
//! file hash (looked up on VirusTotal). This crate classifies raw input,
//! dispatches it to the matching provider, and normalizes every provider
//! response or failure into a [`LookupResult`].
//!
//! ## Example
//!
//! ```no_run
//! use threatlens_core::{Scanner, ScannerConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let scanner = Scanner::new(ScannerConfig::from_env()).unwrap();
//!     match scanner.scan("8.8.8.8").await {
//!         Ok(report) => println!("{}", report.data.to_payload()),
//!         Err(e) => eprintln!("Scan failed: {}", e),
//!     }
//! }
//! ```

pub mod classifier;
pub mod config;
pub mod error;
pub mod lookup;
pub mod scanner;

pub use classifier::{classify, is_valid_hash, is_valid_ipv4, HashAlgorithm, ScanKind, TokenKind};
pub use config::{ProviderCredentials, ScannerConfig};
pub use error::{Result, ScanError, TransportError};
pub use lookup::{LookupData, LookupResult};
pub use scanner::{ScanReport, Scanner};
