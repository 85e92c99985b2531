//! Scanner configuration and provider credentials.

use std::io;
use std::path::Path;
use std::time::Duration;

use secrecy::SecretString;
use tracing::{debug, warn};

/// Environment variable holding the AbuseIPDB API key.
pub const ABUSEIPDB_KEY_VAR: &str = "ABUSEIPDB_API_KEY";

/// Environment variable holding the VirusTotal API key.
pub const VIRUSTOTAL_KEY_VAR: &str = "VIRUSTOTAL_API_KEY";

/// Default AbuseIPDB API base URL.
pub const DEFAULT_ABUSEIPDB_URL: &str = "https://api.abuseipdb.com/api/v2";

/// Default VirusTotal API base URL.
pub const DEFAULT_VIRUSTOTAL_URL: &str = "https://www.virustotal.com/api/v3";

/// Report lookback window sent to AbuseIPDB.
pub const DEFAULT_MAX_AGE_DAYS: u32 = 90;

/// Upper bound on a single provider call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// API keys for the two providers.
///
/// A missing key disables only the matching lookup. Keys are wrapped in
/// [`SecretString`] so they never show up in `Debug` output.
#[derive(Debug, Clone, Default)]
pub struct ProviderCredentials {
    abuseipdb_api_key: Option<SecretString>,
    virustotal_api_key: Option<SecretString>,
}

impl ProviderCredentials {
    /// Creates credentials from optional raw keys. Empty keys count as missing.
    pub fn new(abuseipdb_api_key: Option<String>, virustotal_api_key: Option<String>) -> Self {
        Self {
            abuseipdb_api_key: secret(abuseipdb_api_key),
            virustotal_api_key: secret(virustotal_api_key),
        }
    }

    /// Reads keys through `lookup`, keyed by environment variable name.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::new(lookup(ABUSEIPDB_KEY_VAR), lookup(VIRUSTOTAL_KEY_VAR))
    }

    /// Reads keys from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// AbuseIPDB key, if configured.
    pub fn abuseipdb_api_key(&self) -> Option<&SecretString> {
        self.abuseipdb_api_key.as_ref()
    }

    /// VirusTotal key, if configured.
    pub fn virustotal_api_key(&self) -> Option<&SecretString> {
        self.virustotal_api_key.as_ref()
    }
}

fn secret(value: Option<String>) -> Option<SecretString> {
    value
        .filter(|v| !v.is_empty())
        .map(|v| SecretString::new(v.into_boxed_str()))
}

/// Scanner configuration.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Provider API keys.
    pub credentials: ProviderCredentials,
    /// AbuseIPDB API base URL (no trailing slash).
    pub abuseipdb_base_url: String,
    /// VirusTotal API base URL (no trailing slash).
    pub virustotal_base_url: String,
    /// AbuseIPDB `maxAgeInDays` parameter.
    pub max_age_days: u32,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            credentials: ProviderCredentials::default(),
            abuseipdb_base_url: DEFAULT_ABUSEIPDB_URL.to_string(),
            virustotal_base_url: DEFAULT_VIRUSTOTAL_URL.to_string(),
            max_age_days: DEFAULT_MAX_AGE_DAYS,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ScannerConfig {
    /// Creates a config with the given credentials and default endpoints.
    pub fn new(credentials: ProviderCredentials) -> Self {
        Self {
            credentials,
            ..Self::default()
        }
    }

    /// Creates a config with credentials read from the environment.
    pub fn from_env() -> Self {
        Self::new(ProviderCredentials::from_env())
    }

    /// Sets the AbuseIPDB base URL.
    pub fn with_abuseipdb_base_url(mut self, url: impl Into<String>) -> Self {
        self.abuseipdb_base_url = trim_base_url(url.into());
        self
    }

    /// Sets the VirusTotal base URL.
    pub fn with_virustotal_base_url(mut self, url: impl Into<String>) -> Self {
        self.virustotal_base_url = trim_base_url(url.into());
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns true if an AbuseIPDB key is configured.
    pub fn ip_lookup_enabled(&self) -> bool {
        self.credentials.abuseipdb_api_key().is_some()
    }

    /// Returns true if a VirusTotal key is configured.
    pub fn hash_lookup_enabled(&self) -> bool {
        self.credentials.virustotal_api_key().is_some()
    }
}

fn trim_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// Parses `KEY=VALUE` lines.
///
/// Blank lines and `#` comments are skipped. Only the first `=` splits, so
/// values may contain `=`. Lines without `=` are skipped with a warning.
pub fn parse_env_file(contents: &str) -> Vec<(String, String)> {
    let mut vars = Vec::new();

    for (index, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match line.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                vars.push((key.trim().to_string(), value.trim().to_string()));
            }
            _ => {
                warn!(line = index + 1, "Skipping malformed env file line");
            }
        }
    }

    vars
}

/// Loads an env file into the process environment.
///
/// Values from the file replace existing variables. A missing file is not
/// an error. Returns the number of variables set.
pub fn load_env_file(path: impl AsRef<Path>) -> io::Result<usize> {
    let path = path.as_ref();
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No env file found");
            return Ok(0);
        }
        Err(e) => return Err(e),
    };

    let vars = parse_env_file(&contents);
    for (key, value) in &vars {
        std::env::set_var(key, value);
    }

    debug!(path = %path.display(), count = vars.len(), "Loaded env file");
    Ok(vars.len())
}
