//! One-shot `scan` command.

use std::io::Write;

use threatlens_core::Scanner;
use tracing::error;

/// Scans `token`, writing the JSON report to `out` or the error to `err`.
///
/// Returns whether the scan succeeded. Never exits the process, so the
/// caller's log guard is dropped normally.
pub async fn run_scan<O, E>(
    scanner: &Scanner,
    token: &str,
    out: &mut O,
    err: &mut E,
) -> anyhow::Result<bool>
where
    O: Write,
    E: Write,
{
    match scanner.scan(token).await {
        Ok(report) => {
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
            Ok(true)
        }
        Err(e) => {
            error!(kind = e.kind(), "Scan failed: {}", e);
            writeln!(err, "{} ({})", e, e.kind())?;
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use threatlens_core::ScannerConfig;

    async fn scan(token: &str) -> (bool, String, String) {
        let scanner = Scanner::new(ScannerConfig::default()).unwrap();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let ok = run_scan(&scanner, token, &mut out, &mut err).await.unwrap();
        (
            ok,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[tokio::test]
    async fn invalid_token_reports_failure() {
        let (ok, out, err) = scan("not-a-token").await;

        assert!(!ok);
        assert!(out.is_empty());
        assert_eq!(
            err,
            "Invalid input format. Please enter a valid IP address or file hash. (validation_error)\n"
        );
    }

    #[tokio::test]
    async fn missing_key_reports_failure() {
        let (ok, _, err) = scan("8.8.8.8").await;

        assert!(!ok);
        assert_eq!(
            err,
            "AbuseIPDB API key is not configured. (configuration_error)\n"
        );
    }
}
