//! AbuseIPDB IP reputation provider.

use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::error;

use super::{error_detail, HttpResponse, LookupData, LookupRequest, LookupResult, ReputationProvider};
use crate::config::ScannerConfig;
use crate::error::ScanError;

/// Fallback when a success body carries neither `data` nor an error detail.
const UNKNOWN_API_ERROR: &str = "Unknown API error";

/// Fallback detail for error bodies without one.
const DEFAULT_ERROR_DETAIL: &str = "API returned an error.";

/// AbuseIPDB `/check` endpoint client.
#[derive(Debug, Clone)]
pub struct AbuseIpDb {
    base_url: String,
    max_age_days: u32,
    api_key: Option<SecretString>,
}

impl AbuseIpDb {
    /// Creates the provider from scanner configuration.
    pub fn new(config: &ScannerConfig) -> Self {
        Self {
            base_url: config.abuseipdb_base_url.clone(),
            max_age_days: config.max_age_days,
            api_key: config.credentials.abuseipdb_api_key().cloned(),
        }
    }

    fn interpret_success(&self, body: &str) -> LookupResult {
        let body: Value = serde_json::from_str(body)
            .map_err(|_| ScanError::Provider(UNKNOWN_API_ERROR.to_string()))?;

        if let Some(data) = body.get("data") {
            return Ok(LookupData::Found(data.clone()));
        }

        let detail = error_detail(&body, UNKNOWN_API_ERROR)
            .unwrap_or_else(|| UNKNOWN_API_ERROR.to_string());
        Err(ScanError::Provider(detail))
    }
}

impl ReputationProvider for AbuseIpDb {
    fn name(&self) -> &'static str {
        "AbuseIPDB"
    }

    fn api_key(&self) -> Option<&SecretString> {
        self.api_key.as_ref()
    }

    fn build_request(&self, ip: &str, api_key: &SecretString) -> Result<LookupRequest, ScanError> {
        let max_age = self.max_age_days.to_string();
        let url = Url::parse_with_params(
            &format!("{}/check", self.base_url),
            &[("ipAddress", ip), ("maxAgeInDays", max_age.as_str())],
        )
        .map_err(|e| ScanError::Configuration(format!("Invalid AbuseIPDB URL: {}", e)))?;

        Ok(LookupRequest::new(url)
            .with_header("Accept", "application/json")
            .with_header("Key", api_key.expose_secret()))
    }

    fn interpret(&self, ip: &str, response: HttpResponse) -> LookupResult {
        if response.status.is_success() {
            return self.interpret_success(&response.body);
        }

        error!(
            ip,
            status = response.status.as_u16(),
            body = %response.body,
            "AbuseIPDB HTTP error"
        );

        let detail = serde_json::from_str::<Value>(&response.body)
            .ok()
            .and_then(|body| error_detail(&body, DEFAULT_ERROR_DETAIL));

        let message = match detail {
            Some(detail) => format!("API Error: {}", detail),
            None => format!("API Error: {}", response.status.as_u16()),
        };
        Err(ScanError::Provider(message))
    }
}
