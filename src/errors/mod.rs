//! Error types for the Webex client.
//!
//! Local validation failures are raised before any request is sent. Errors
//! reported by the Webex service are carried unchanged in [`ApiError`].

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Result type for Webex operations
pub type WebexResult<T> = Result<T, WebexError>;

/// Root error type for the Webex integration
#[derive(Error, Debug)]
pub enum WebexError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Argument validation error, raised before any request is made
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Non-success response from the Webex service
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Rate limit error
    #[error("Rate limit error: {0}")]
    RateLimit(#[from] RateLimitError),

    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// Response parsing error
    #[error("Response error: {0}")]
    Response(#[from] ResponseError),

    /// Local I/O error (e.g. opening a file for upload)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WebexError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "WEBEX_CONFIG",
            Self::Validation(_) => "WEBEX_VALIDATION",
            Self::Api(_) => "WEBEX_API",
            Self::RateLimit(_) => "WEBEX_RATE_LIMIT",
            Self::Network(_) => "WEBEX_NETWORK",
            Self::Response(_) => "WEBEX_RESPONSE",
            Self::Io(_) => "WEBEX_IO",
        }
    }

    /// Check if retrying the same request might succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(NetworkError::Timeout)
            | Self::Network(NetworkError::ConnectionFailed { .. }) => true,
            Self::RateLimit(_) => true,
            Self::Api(api) => api.status >= 500,
            _ => false,
        }
    }

    /// Get retry-after duration if applicable
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimit(RateLimitError::RateLimited { retry_after, .. }) => Some(*retry_after),
            _ => None,
        }
    }

    /// Get HTTP status code if applicable
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Api(api) => Some(api.status),
            Self::RateLimit(_) => Some(429),
            _ => None,
        }
    }

    /// True when the service answered 404 for the requested resource
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api(api) if api.is_not_found())
    }

    /// Shorthand for an invalid argument
    pub(crate) fn invalid_argument(name: &'static str, message: impl Into<String>) -> Self {
        Self::Validation(ValidationError::InvalidArgument {
            name,
            message: message.into(),
        })
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// Missing access token
    #[error("Access token is missing")]
    MissingToken,

    /// Invalid token
    #[error("Invalid access token: {0}")]
    InvalidToken(String),

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// Error message
        message: String,
    },

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(String),
}

/// Argument validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Argument failed a check the type system cannot express
    #[error("Invalid argument `{name}`: {message}")]
    InvalidArgument {
        /// Argument name
        name: &'static str,
        /// Error message
        message: String,
    },

    /// An identifier was empty
    #[error("`{name}` must be a non-empty string")]
    EmptyIdentifier {
        /// Argument name
        name: &'static str,
    },

    /// More than one file supplied to a message
    #[error(
        "The `files` parameter should be a list with exactly one (1) item, got {count}. \
         The files parameter is a list, which accepts multiple values to allow for future \
         expansion, but currently only one file may be included with the message."
    )]
    TooManyFiles {
        /// Number of files supplied
        count: usize,
    },

    /// File entry is neither a web URL nor an existing local file
    #[error("The `files` parameter does not contain a valid URL or path to a local file: {value}")]
    InvalidFileReference {
        /// The offending entry
        value: String,
    },
}

/// Error reported by the Webex service for a non-success response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code
    pub status: u16,
    /// Server-provided message
    pub message: String,
    /// Webex tracking ID, useful for support requests
    pub tracking_id: Option<String>,
    /// Per-field error descriptions
    pub details: Vec<String>,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            tracking_id: None,
            details: Vec::new(),
        }
    }

    /// Set the tracking ID
    pub fn with_tracking_id(mut self, tracking_id: impl Into<String>) -> Self {
        self.tracking_id = Some(tracking_id.into());
        self
    }

    /// True for a 404 response
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Human readable description of the status code
    pub fn status_description(&self) -> &'static str {
        match self.status {
            400 => "The request was invalid or cannot be otherwise served.",
            401 => "Authentication credentials were missing or incorrect.",
            403 => "The request is understood, but it has been refused or access is not allowed.",
            404 => "The URI requested is invalid or the resource requested does not exist.",
            405 => "The request was made to a resource using an HTTP request method that is not supported.",
            409 => "The request could not be processed because it conflicts with some established rule of the system.",
            410 => "The requested resource is no longer available.",
            415 => "The request was made to a resource without specifying a media type or used a media type that is not supported.",
            423 => "The requested resource is temporarily unavailable.",
            428 => "File(s) cannot be scanned for malware and need to be force downloaded.",
            429 => "Too many requests have been sent in a given amount of time.",
            500 => "Something went wrong on the server.",
            502 => "The server received an invalid response from an upstream server.",
            503 => "Server is overloaded with requests. Try again later.",
            504 => "An upstream server failed to respond on time.",
            _ => "Unknown response status.",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status, self.status_description())?;
        if !self.message.is_empty() {
            write!(f, " - {}", self.message)?;
        }
        if let Some(tracking_id) = &self.tracking_id {
            write!(f, " [Tracking ID: {}]", tracking_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Rate limit errors
#[derive(Error, Debug)]
pub enum RateLimitError {
    /// Rate limited with retry information
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Duration to wait before retrying
        retry_after: Duration,
        /// Tracking ID of the rejected request
        tracking_id: Option<String>,
    },
}

/// Network errors
#[derive(Error, Debug)]
pub enum NetworkError {
    /// Connection failed
    #[error("Connection failed: {message}")]
    ConnectionFailed {
        /// Error message
        message: String,
    },

    /// Request timeout
    #[error("Request timed out")]
    Timeout,

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(String),
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NetworkError::Timeout
        } else if err.is_connect() {
            NetworkError::ConnectionFailed {
                message: err.to_string(),
            }
        } else {
            NetworkError::Http(err.to_string())
        }
    }
}

/// Response parsing errors
#[derive(Error, Debug)]
pub enum ResponseError {
    /// JSON deserialization error
    #[error("Deserialization error: {message}")]
    DeserializationError {
        /// Error message
        message: String,
    },

    /// Unexpected response format
    #[error("Unexpected response: {message}")]
    UnexpectedResponse {
        /// Error message
        message: String,
    },

    /// Object factory asked for a type it cannot build
    #[error("Unexpected object type: expected `{expected}`, got `{actual}`")]
    UnexpectedObjectType {
        /// Type the factory builds
        expected: &'static str,
        /// Type tag that was requested
        actual: String,
    },
}

impl From<serde_json::Error> for ResponseError {
    fn from(err: serde_json::Error) -> Self {
        ResponseError::DeserializationError {
            message: err.to_string(),
        }
    }
}
