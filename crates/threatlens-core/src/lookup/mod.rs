//! Remote reputation lookups.
//!
//! Both providers follow the same shape: check the credential, send one GET,
//! then interpret the response. Only the request layout and the status-code
//! handling differ, so each provider implements [`ReputationProvider`] and
//! [`run_lookup`] drives the shared steps.

pub mod abuseipdb;
pub mod transport;
pub mod virustotal;

use secrecy::SecretString;
use serde::{Serialize, Serializer};
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::error::ScanError;

pub use abuseipdb::AbuseIpDb;
pub use transport::{HttpResponse, HttpTransport, LookupRequest, ReqwestTransport};
pub use virustotal::VirusTotal;

/// Successful lookup payload.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupData {
    /// The provider's `data` object.
    Found(Value),
    /// The provider has no analysis record for the token.
    NotFound,
}

impl LookupData {
    /// Returns true if the provider had no record.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupData::NotFound)
    }

    /// Returns the provider data, if any.
    pub fn data(&self) -> Option<&Value> {
        match self {
            LookupData::Found(value) => Some(value),
            LookupData::NotFound => None,
        }
    }

    /// JSON payload for display. `NotFound` uses the analysis-stats marker.
    pub fn to_payload(&self) -> Value {
        match self {
            LookupData::Found(value) => value.clone(),
            LookupData::NotFound => json!({
                "attributes": {
                    "last_analysis_stats": "Not Found"
                }
            }),
        }
    }
}

impl Serialize for LookupData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_payload().serialize(serializer)
    }
}

/// Outcome of a single lookup.
pub type LookupResult = Result<LookupData, ScanError>;

/// A threat-intelligence provider.
pub trait ReputationProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &'static str;

    /// Configured API key, if any.
    fn api_key(&self) -> Option<&SecretString>;

    /// Message returned when no API key is configured.
    fn missing_key_message(&self) -> String {
        format!("{} API key is not configured.", self.name())
    }

    /// Message returned on transport failure.
    fn network_error_message(&self) -> String {
        format!("Network Error: Could not connect to {}.", self.name())
    }

    /// Builds the GET request for `token`.
    fn build_request(&self, token: &str, api_key: &SecretString) -> Result<LookupRequest, ScanError>;

    /// Maps a response of any status to a lookup result.
    fn interpret(&self, token: &str, response: HttpResponse) -> LookupResult;
}

/// Runs one lookup against `provider`.
///
/// Returns a configuration error without touching the transport when the
/// provider has no key. Never retries.
pub async fn run_lookup<P>(provider: &P, transport: &dyn HttpTransport, token: &str) -> LookupResult
where
    P: ReputationProvider + ?Sized,
{
    let api_key = provider
        .api_key()
        .ok_or_else(|| ScanError::Configuration(provider.missing_key_message()))?;

    let request = provider.build_request(token, api_key)?;

    debug!(provider = provider.name(), token, "Querying provider");

    match transport.get(&request).await {
        Ok(response) => provider.interpret(token, response),
        Err(e) => {
            error!(provider = provider.name(), token, error = %e, "Network error");
            Err(ScanError::Network(provider.network_error_message()))
        }
    }
}

/// Reads `errors[0].detail` from a provider error body.
///
/// Returns `None` when the body is not an object, `errors` is empty, or its
/// first entry is not an object. Returns `default` when `errors` or `detail`
/// is absent.
pub(crate) fn error_detail(body: &Value, default: &str) -> Option<String> {
    let object = body.as_object()?;
    let first = match object.get("errors") {
        None => return Some(default.to_string()),
        Some(Value::Array(errors)) => errors.first()?.as_object()?,
        Some(_) => return None,
    };

    Some(match first.get("detail") {
        None => default.to_string(),
        Some(Value::String(detail)) => detail.clone(),
        Some(other) => other.to_string(),
    })
}
