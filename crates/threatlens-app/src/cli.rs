//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use threatlens_server::{DEFAULT_HOST, DEFAULT_PORT};

/// ThreatLens - check IP addresses and file hashes against threat intelligence
#[derive(Parser, Debug)]
#[command(name = "threatlens", version, about)]
pub struct Args {
    /// Env file with provider API keys
    #[arg(long, default_value = ".env")]
    pub env_file: PathBuf,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Also write logs to a daily rotating file in the data directory
    #[arg(long)]
    pub log_to_file: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the web server (default)
    Serve {
        /// Host to bind to
        #[arg(long, default_value = DEFAULT_HOST)]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },

    /// Scan a single IP address or file hash and print the JSON result
    Scan {
        /// IPv4 address or MD5/SHA-1/SHA-256 hash
        token: String,
    },
}

impl Args {
    /// Returns the subcommand, defaulting to `serve` on the default address.
    pub fn action(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        })
    }

    /// Effective log level.
    pub fn log_level(&self) -> &str {
        if self.debug {
            "debug"
        } else {
            &self.log_level
        }
    }
}
