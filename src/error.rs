//! Error handling for the Eobot client
//!
//! Two failure kinds matter to callers: arguments rejected before any request is
//! sent, and responses that cannot be interpreted once the request has been made.
//! Transport and configuration failures are reported alongside them.

use thiserror::Error;

/// Result type alias for Eobot client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Eobot client
#[derive(Error, Debug)]
pub enum Error {
    /// Caller supplied a value outside its domain (detected before any request)
    #[error("{message}")]
    InvalidArgument { message: String },

    /// The API answered with something that cannot be used
    #[error("{message}")]
    Logic { message: String },

    /// HTTP transport errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("Unexpected HTTP status {status}")]
    Status { status: u16, body: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Layered configuration loading errors
    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    /// URL construction errors
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Create an invalid-argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a logic error
    pub fn logic(message: impl Into<String>) -> Self {
        Self::Logic {
            message: message.into(),
        }
    }

    /// The error every parser returns for an unusable body
    pub fn invalid_response() -> Self {
        Self::logic("Invalid API response")
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument { .. })
    }

    pub fn is_logic(&self) -> bool {
        matches!(self, Error::Logic { .. })
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Error::InvalidArgument { .. } => "invalid_argument",
            Error::Logic { .. } => "logic",
            Error::Http(_) => "http",
            Error::Status { .. } => "status",
            Error::Config { .. } => "config",
            Error::ConfigSource(_) => "config",
            Error::Url(_) => "url",
        }
    }
}
