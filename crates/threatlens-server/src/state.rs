//! Application state for the web server.

use std::sync::Arc;

use threatlens_core::{ScanError, Scanner, ScannerConfig};

/// Shared application state.
///
/// The scanner is immutable after startup, so no locking is needed.
#[derive(Clone)]
pub struct AppState {
    /// Lookup dispatcher.
    pub scanner: Arc<Scanner>,
}

impl AppState {
    /// Creates state around an existing scanner.
    pub fn new(scanner: Scanner) -> Self {
        Self {
            scanner: Arc::new(scanner),
        }
    }

    /// Creates state with a `reqwest`-backed scanner.
    pub fn from_config(config: ScannerConfig) -> Result<Self, ScanError> {
        Ok(Self::new(Scanner::new(config)?))
    }
}
