//! Error types for the application
//!
//! The pricing engine itself never fails; these errors cover the
//! surrounding concerns (configuration loading, the insight HTTP client).

use thiserror::Error;

/// Result type alias using our PricingError
pub type Result<T> = std::result::Result<T, PricingError>;

/// Main error type for operations outside the pure pricing core
#[derive(Error, Debug)]
pub enum PricingError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A fee schedule failed validation
    #[error("Invalid fee schedule for {marketplace}: {reason}")]
    InvalidSchedule { marketplace: String, reason: String },

    /// HTTP request errors
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// URL construction errors
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Missing API key for the insight service
    #[error("Missing API key: {0}")]
    MissingApiKey(String),

    /// Invalid API response
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<config::ConfigError> for PricingError {
    fn from(err: config::ConfigError) -> Self {
        PricingError::Configuration(err.to_string())
    }
}
