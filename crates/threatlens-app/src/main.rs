//! ThreatLens - IP address and file hash reputation lookups.
//!
//! Runs the web form and JSON API by default, or scans a single token from
//! the command line with `threatlens scan <TOKEN>`.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use threatlens_app::{logging, run_scan, Args, Command};
use threatlens_core::config::load_env_file;
use threatlens_core::{Scanner, ScannerConfig};
use threatlens_server::{AppState, Server, ServerConfig};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    // Env file is read before logging so RUST_LOG can come from it.
    let loaded = load_env_file(&args.env_file);

    let _log_guard = logging::init_logging(args.log_level(), args.log_to_file);

    match loaded {
        Ok(0) => {}
        Ok(count) => info!("Loaded {} variables from {:?}", count, args.env_file),
        Err(e) => warn!("Failed to read {:?}: {}", args.env_file, e),
    }

    let config = ScannerConfig::from_env();
    if !config.ip_lookup_enabled() {
        warn!("AbuseIPDB API key not set, IP lookups are disabled");
    }
    if !config.hash_lookup_enabled() {
        warn!("VirusTotal API key not set, hash lookups are disabled");
    }

    let scanner = Scanner::new(config).context("failed to create HTTP client")?;

    match args.action() {
        Command::Serve { host, port } => {
            serve(scanner, host, port).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Scan { token } => scan(scanner, &token).await,
    }
}

async fn serve(scanner: Scanner, host: String, port: u16) -> anyhow::Result<()> {
    let server_config = ServerConfig::default().with_host(host).with_port(port);
    let server = Server::new(server_config, AppState::new(scanner))?;

    info!("Open http://{} in a browser to scan", server.addr());

    server
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
            info!("Shutdown requested");
        })
        .await?;

    Ok(())
}

async fn scan(scanner: Scanner, token: &str) -> anyhow::Result<ExitCode> {
    let ok = run_scan(&scanner, token, &mut std::io::stdout(), &mut std::io::stderr()).await?;
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
