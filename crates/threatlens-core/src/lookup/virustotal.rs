//! VirusTotal file hash reputation provider.

use reqwest::{StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, error};

use super::{HttpResponse, LookupData, LookupRequest, LookupResult, ReputationProvider};
use crate::config::ScannerConfig;
use crate::error::ScanError;

/// VirusTotal v3 `/files/{hash}` client.
#[derive(Debug, Clone)]
pub struct VirusTotal {
    base_url: String,
    api_key: Option<SecretString>,
}

impl VirusTotal {
    /// Creates the provider from scanner configuration.
    pub fn new(config: &ScannerConfig) -> Self {
        Self {
            base_url: config.virustotal_base_url.clone(),
            api_key: config.credentials.virustotal_api_key().cloned(),
        }
    }
}

impl ReputationProvider for VirusTotal {
    fn name(&self) -> &'static str {
        "VirusTotal"
    }

    fn api_key(&self) -> Option<&SecretString> {
        self.api_key.as_ref()
    }

    fn build_request(&self, hash: &str, api_key: &SecretString) -> Result<LookupRequest, ScanError> {
        let url = Url::parse(&format!("{}/files/{}", self.base_url, hash))
            .map_err(|e| ScanError::Configuration(format!("Invalid VirusTotal URL: {}", e)))?;

        Ok(LookupRequest::new(url).with_header("x-apikey", api_key.expose_secret()))
    }

    fn interpret(&self, hash: &str, response: HttpResponse) -> LookupResult {
        // No analysis record is a valid answer, not a failure.
        if response.status == StatusCode::NOT_FOUND {
            debug!(hash, "VirusTotal has no record for hash");
            return Ok(LookupData::NotFound);
        }

        if response.status.is_success() {
            return serde_json::from_str::<Value>(&response.body)
                .ok()
                .and_then(|body| body.get("data").cloned())
                .map(LookupData::Found)
                .ok_or_else(|| {
                    ScanError::Provider("Received invalid data from VirusTotal.".to_string())
                });
        }

        error!(hash, status = response.status.as_u16(), "VirusTotal HTTP error");

        if response.status == StatusCode::UNAUTHORIZED {
            return Err(ScanError::Provider(
                "API Error: Invalid VirusTotal API key.".to_string(),
            ));
        }

        Err(ScanError::Provider(format!(
            "API Error: {}",
            response.status.as_u16()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderCredentials;
    use serde_json::json;

    const SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    fn provider() -> VirusTotal {
        let config = ScannerConfig::new(ProviderCredentials::new(None, Some("vt-key".into())))
            .with_virustotal_base_url("http://vt.test/api/v3");
        VirusTotal::new(&config)
    }

    fn interpret(status: StatusCode, body: &str) -> LookupResult {
        provider().interpret(SHA256, HttpResponse::new(status, body))
    }

    #[test]
    fn request_layout() {
        let provider = provider();
        let key = provider.api_key().unwrap().clone();
        let request = provider.build_request(SHA256, &key).unwrap();

        assert_eq!(request.url.as_str(), format!("http://vt.test/api/v3/files/{}", SHA256));
        assert_eq!(request.header("x-apikey"), Some("vt-key"));
        assert_eq!(request.headers.len(), 1);
    }

    #[test]
    fn not_found_is_success() {
        let data = interpret(StatusCode::NOT_FOUND, "").unwrap();
        assert_eq!(data, LookupData::NotFound);
    }

    #[test]
    fn success_returns_data() {
        let body = json!({
            "data": {
                "id": SHA256,
                "type": "file",
                "attributes": {"last_analysis_stats": {"malicious": 0, "undetected": 70}}
            }
        });
        let data = interpret(StatusCode::OK, &body.to_string()).unwrap();
        assert_eq!(data.data().unwrap()["id"], SHA256);
    }

    #[test]
    fn success_without_data_is_invalid() {
        let err = interpret(StatusCode::OK, r#"{"meta": {}}"#).unwrap_err();
        assert_eq!(
            err,
            ScanError::Provider("Received invalid data from VirusTotal.".into())
        );

        let err = interpret(StatusCode::OK, "not json").unwrap_err();
        assert_eq!(err.to_string(), "Received invalid data from VirusTotal.");
    }

    #[test]
    fn unauthorized_mentions_invalid_key() {
        let err = interpret(StatusCode::UNAUTHORIZED, "{}").unwrap_err();
        assert_eq!(err.to_string(), "API Error: Invalid VirusTotal API key.");
    }

    #[test]
    fn other_errors_embed_status() {
        let err = interpret(StatusCode::TOO_MANY_REQUESTS, "{}").unwrap_err();
        assert_eq!(err.to_string(), "API Error: 429");

        let err = interpret(StatusCode::FORBIDDEN, "").unwrap_err();
        assert_eq!(err.to_string(), "API Error: 403");
    }
}
