//! Request and response models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use threatlens_core::{HashAlgorithm, LookupData, ScanKind, ScanReport};

/// Form body for POST /scan.
#[derive(Debug, Default, Deserialize)]
pub struct ScanForm {
    /// Raw token typed by the user.
    #[serde(default)]
    pub scan_input: String,
}

/// Query parameters carrying a flash message to GET /.
#[derive(Debug, Default, Deserialize)]
pub struct FlashQuery {
    /// Message text.
    pub flash: Option<String>,
    /// Severity (`error`, `warning`, `info`).
    pub level: Option<String>,
}

/// Request body for POST /api/scan.
#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    /// Raw token to classify and look up.
    pub scan_input: String,
}

/// Response body for POST /api/scan.
#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub success: bool,
    /// `ip` or `hash`.
    pub scan_type: ScanKind,
    pub scan_input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<HashAlgorithm>,
    /// Provider payload, or the not-found marker.
    pub data: LookupData,
    pub scanned_at: DateTime<Utc>,
}

impl From<ScanReport> for ScanResponse {
    fn from(report: ScanReport) -> Self {
        Self {
            success: true,
            scan_type: report.kind,
            scan_input: report.input,
            algorithm: report.algorithm,
            data: report.data,
            scanned_at: report.scanned_at,
        }
    }
}

/// Response body for GET /api/status.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// AbuseIPDB key configured.
    pub ip_lookup_enabled: bool,
    /// VirusTotal key configured.
    pub hash_lookup_enabled: bool,
}
