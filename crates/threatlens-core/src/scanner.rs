//! Classify-and-dispatch entry point.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::classifier::{classify, HashAlgorithm, ScanKind, TokenKind};
use crate::config::ScannerConfig;
use crate::error::{Result, ScanError};
use crate::lookup::{
    run_lookup, AbuseIpDb, HttpTransport, LookupData, LookupResult, ReputationProvider,
    ReqwestTransport, VirusTotal,
};

/// Message for empty input.
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter a file hash or IP address to scan.";

/// Message for input that is neither an IP address nor a hash.
pub const INVALID_INPUT_MESSAGE: &str =
    "Invalid input format. Please enter a valid IP address or file hash.";

/// Result of a successful scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Trimmed input token.
    pub input: String,
    /// Which lookup handled the token.
    pub kind: ScanKind,
    /// Digest algorithm for hash scans.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<HashAlgorithm>,
    /// Provider payload.
    pub data: LookupData,
    /// When the lookup completed.
    pub scanned_at: DateTime<Utc>,
}

/// Dispatches tokens to the matching reputation provider.
///
/// Holds only immutable configuration and a shared transport, so one
/// instance can serve any number of concurrent requests.
pub struct Scanner {
    abuseipdb: AbuseIpDb,
    virustotal: VirusTotal,
    transport: Arc<dyn HttpTransport>,
}

impl Scanner {
    /// Creates a scanner backed by a `reqwest` client.
    pub fn new(config: ScannerConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout)
            .map_err(|e| ScanError::Configuration(e.to_string()))?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a scanner with a custom transport.
    pub fn with_transport(config: ScannerConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            abuseipdb: AbuseIpDb::new(&config),
            virustotal: VirusTotal::new(&config),
            transport,
        }
    }

    /// Returns true if IP lookups have a credential.
    pub fn ip_lookup_enabled(&self) -> bool {
        self.abuseipdb.api_key().is_some()
    }

    /// Returns true if hash lookups have a credential.
    pub fn hash_lookup_enabled(&self) -> bool {
        self.virustotal.api_key().is_some()
    }

    /// Looks up an IP address on AbuseIPDB. The address is not re-validated.
    pub async fn scan_ip(&self, ip: &str) -> LookupResult {
        run_lookup(&self.abuseipdb, self.transport.as_ref(), ip).await
    }

    /// Looks up a file hash on VirusTotal. The hash is not re-validated.
    pub async fn scan_hash(&self, hash: &str) -> LookupResult {
        run_lookup(&self.virustotal, self.transport.as_ref(), hash).await
    }

    /// Classifies `raw` and runs the matching lookup.
    ///
    /// Surrounding whitespace is ignored. Invalid input fails before any
    /// network call.
    pub async fn scan(&self, raw: &str) -> Result<ScanReport> {
        let input = raw.trim();
        if input.is_empty() {
            return Err(ScanError::Validation(EMPTY_INPUT_MESSAGE.to_string()));
        }

        let (kind, algorithm, data) = match classify(input) {
            TokenKind::Ipv4 => (ScanKind::Ip, None, self.scan_ip(input).await?),
            TokenKind::FileHash(algo) => (ScanKind::Hash, Some(algo), self.scan_hash(input).await?),
            TokenKind::Invalid => {
                return Err(ScanError::Validation(INVALID_INPUT_MESSAGE.to_string()));
            }
        };

        info!(
            kind = kind.name(),
            not_found = data.is_not_found(),
            "Scan complete"
        );

        Ok(ScanReport {
            input: input.to_string(),
            kind,
            algorithm,
            data,
            scanned_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderCredentials;
    use crate::error::TransportError;
    use crate::lookup::{HttpResponse, LookupRequest};
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Transport that answers every request with a fixed response.
    struct FixedTransport {
        status: StatusCode,
        body: &'static str,
        calls: AtomicUsize,
    }

    impl FixedTransport {
        fn new(status: StatusCode, body: &'static str) -> Arc<Self> {
            Arc::new(Self {
                status,
                body,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl HttpTransport for FixedTransport {
        async fn get(&self, _request: &LookupRequest) -> std::result::Result<HttpResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(HttpResponse::new(self.status, self.body))
        }
    }

    fn scanner(transport: Arc<FixedTransport>) -> Scanner {
        let creds = ProviderCredentials::new(Some("abuse".into()), Some("vt".into()));
        Scanner::with_transport(ScannerConfig::new(creds), transport)
    }

    #[tokio::test]
    async fn empty_input_is_rejected() {
        let transport = FixedTransport::new(StatusCode::OK, "{}");
        let err = scanner(transport.clone()).scan("   ").await.unwrap_err();

        assert_eq!(err, ScanError::Validation(EMPTY_INPUT_MESSAGE.into()));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn input_is_trimmed() {
        let transport = FixedTransport::new(StatusCode::OK, r#"{"data": {"ok": true}}"#);
        let report = scanner(transport).scan("  8.8.8.8\n").await.unwrap();

        assert_eq!(report.input, "8.8.8.8");
        assert_eq!(report.kind, ScanKind::Ip);
        assert!(report.algorithm.is_none());
    }

    #[tokio::test]
    async fn hash_report_carries_algorithm() {
        let transport = FixedTransport::new(StatusCode::NOT_FOUND, "");
        let report = scanner(transport)
            .scan("da39a3ee5e6b4b0d3255bfef95601890afd80709")
            .await
            .unwrap();

        assert_eq!(report.kind, ScanKind::Hash);
        assert_eq!(report.algorithm, Some(HashAlgorithm::Sha1));
        assert!(report.data.is_not_found());
    }

    #[tokio::test]
    async fn report_serializes_payload() {
        let transport = FixedTransport::new(StatusCode::NOT_FOUND, "");
        let report = scanner(transport)
            .scan("d41d8cd98f00b204e9800998ecf8427e")
            .await
            .unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["kind"], "hash");
        assert_eq!(json["algorithm"], "md5");
        assert_eq!(json["data"]["attributes"]["last_analysis_stats"], "Not Found");
        assert!(json["scanned_at"].is_string());
    }

    #[test]
    fn enabled_flags_follow_credentials() {
        let transport = FixedTransport::new(StatusCode::OK, "{}");
        let config = ScannerConfig::new(ProviderCredentials::new(Some("abuse".into()), None));
        let scanner = Scanner::with_transport(config, transport);

        assert!(scanner.ip_lookup_enabled());
        assert!(!scanner.hash_lookup_enabled());
    }
}
