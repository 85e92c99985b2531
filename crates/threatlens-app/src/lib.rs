//! ThreatLens - IP and file hash reputation lookups.
//!
//! This crate provides the command-line front end:
//!
//! - Argument parsing ([`cli`])
//! - Console and rolling file logging ([`logging`])
//! - The one-shot `scan` command ([`scan`])

pub mod cli;
pub mod logging;
pub mod scan;

pub use cli::{Args, Command};
pub use scan::run_scan;
