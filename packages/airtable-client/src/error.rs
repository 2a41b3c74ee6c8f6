//! Error types for the Airtable client.

use thiserror::Error;

/// Result type for Airtable client operations.
pub type Result<T> = std::result::Result<T, AirtableError>;

/// Airtable client errors.
#[derive(Debug, Error)]
pub enum AirtableError {
    /// Transport failure (connection refused, timeout, TLS)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response from the Airtable API
    #[error("Airtable API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl AirtableError {
    /// True when Airtable rejected the credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AirtableError::Api { status: 401 | 403, .. })
    }
}
