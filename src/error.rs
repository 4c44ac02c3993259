//! Error types for classroll

use thiserror::Error;

/// Result type alias for classroll operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A projection path did not resolve against a record
    #[error("Field path '{path}' not found (missing segment '{segment}')")]
    FieldProjectionMissingPath { path: String, segment: String },

    /// The purview manifest could not be used. Recoverable: callers fall back
    /// to platform history and must never surface this to a client.
    #[error("Purview manifest unavailable: {0}")]
    ManifestUnavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error downgrades to a fallback instead of failing a request.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::ManifestUnavailable(_))
    }
}

/// Upstream API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network failure, timeout, or an unexpected upstream status
    #[error("Upstream unavailable: {0}")]
    Unavailable(String),

    /// Upstream answered but the body was not the JSON we expected
    #[error("Upstream response malformed: {0}")]
    Malformed(String),

    #[error("Upstream rejected the access token")]
    Unauthorized,

    #[error("Upstream resource not found: {0}")]
    NotFound(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Unavailable("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Unavailable("Failed to connect to upstream".to_string())
        } else if err.is_decode() {
            ApiError::Malformed(err.to_string())
        } else {
            ApiError::Unavailable(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("GitHub token not configured. Set GITHUB_TOKEN or pass --token.")]
    MissingToken,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
