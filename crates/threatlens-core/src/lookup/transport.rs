//! HTTP transport used by provider lookups.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};

use crate::error::TransportError;

/// A single outbound GET request.
#[derive(Clone)]
pub struct LookupRequest {
    /// Fully built URL including query parameters.
    pub url: Url,
    /// Request headers. May contain credentials.
    pub headers: Vec<(&'static str, String)>,
}

impl LookupRequest {
    /// Creates a request with no headers.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            headers: Vec::new(),
        }
    }

    /// Adds a header.
    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Returns the value of the first header with the given name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

// Header values carry API keys.
impl fmt::Debug for LookupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.headers.iter().map(|(n, _)| *n).collect();
        f.debug_struct("LookupRequest")
            .field("url", &self.url.as_str())
            .field("headers", &names)
            .finish()
    }
}

/// Status and body of a provider response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    /// Creates a response.
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Issues outbound GET requests.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends the request and returns the response, whatever its status.
    async fn get(&self, request: &LookupRequest) -> Result<HttpResponse, TransportError>;
}

/// [`HttpTransport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Other(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, request: &LookupRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.get(request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(*name, value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_omits_header_values() {
        let request = LookupRequest::new(Url::parse("https://example.com/files/abc").unwrap())
            .with_header("x-apikey", "secret-value");

        let debug = format!("{:?}", request);
        assert!(debug.contains("x-apikey"));
        assert!(!debug.contains("secret-value"));
    }

    #[test]
    fn header_lookup_ignores_case() {
        let request = LookupRequest::new(Url::parse("https://example.com/").unwrap())
            .with_header("Accept", "application/json");
        assert_eq!(request.header("accept"), Some("application/json"));
        assert_eq!(request.header("Key"), None);
    }
}
