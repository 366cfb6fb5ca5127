//! Configuration management for the Webex client.
//!
//! Supports configuration via:
//! - Explicit values
//! - Environment variables
//! - Builder pattern

use crate::errors::{ConfigurationError, WebexError, WebexResult};
use crate::observability::Redacted;
use http::HeaderMap;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

/// Secure wrapper for a Webex access token
#[derive(Clone)]
pub struct WebexToken {
    token: SecretString,
}

impl WebexToken {
    /// Create a new token
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigurationError> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(ConfigurationError::InvalidToken(
                "Token must not be empty".to_string(),
            ));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(ConfigurationError::InvalidToken(
                "Token must not contain whitespace".to_string(),
            ));
        }
        Ok(Self {
            token: SecretString::new(trimmed.to_string()),
        })
    }

    /// Expose the token for use in requests
    pub(crate) fn expose(&self) -> &str {
        self.token.expose_secret()
    }
}

impl std::fmt::Debug for WebexToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "WebexToken({})",
            crate::observability::redact_token(self.expose())
        )
    }
}

/// Configuration for the Webex client
#[derive(Clone)]
pub struct WebexConfig {
    /// Access token for authentication
    pub(crate) access_token: Option<WebexToken>,
    /// Base URL for API requests
    pub base_url: Url,
    /// Single request timeout
    pub timeout: Duration,
    /// Wait and re-issue requests rejected with HTTP 429
    pub wait_on_rate_limit: bool,
    /// Upper bound on rate-limit retries for one request
    pub max_rate_limit_retries: u32,
    /// Default headers
    pub default_headers: HeaderMap,
    /// User agent
    pub user_agent: String,
}

impl std::fmt::Debug for WebexConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebexConfig")
            .field("access_token", &self.access_token.is_some())
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("wait_on_rate_limit", &self.wait_on_rate_limit)
            .field("max_rate_limit_retries", &self.max_rate_limit_retries)
            .field("default_headers", &Redacted::new(&self.default_headers))
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for WebexConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            base_url: Url::parse(crate::DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: Duration::from_secs(crate::DEFAULT_TIMEOUT_SECS),
            wait_on_rate_limit: true,
            max_rate_limit_retries: crate::DEFAULT_MAX_RATE_LIMIT_RETRIES,
            default_headers: HeaderMap::new(),
            user_agent: format!("webex-client-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl WebexConfig {
    /// Create a new configuration builder
    pub fn builder() -> WebexConfigBuilder {
        WebexConfigBuilder::new()
    }

    /// Create configuration from environment variables
    pub fn from_env() -> WebexResult<Self> {
        let mut builder = WebexConfigBuilder::new();

        let token = std::env::var("WEBEX_ACCESS_TOKEN")
            .or_else(|_| std::env::var("WEBEX_TEAMS_ACCESS_TOKEN"));
        if let Ok(token) = token {
            builder = builder.access_token(&token)?;
        }

        if let Ok(url) = std::env::var("WEBEX_BASE_URL") {
            builder = builder.base_url(&url)?;
        }

        if let Ok(timeout) = std::env::var("WEBEX_TIMEOUT") {
            let secs = timeout.parse::<u64>().map_err(|_| {
                ConfigurationError::EnvVar(format!("WEBEX_TIMEOUT is not a number: {}", timeout))
            })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }

        if let Ok(wait) = std::env::var("WEBEX_WAIT_ON_RATE_LIMIT") {
            let wait = match wait.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                other => {
                    return Err(ConfigurationError::EnvVar(format!(
                        "WEBEX_WAIT_ON_RATE_LIMIT is not a boolean: {}",
                        other
                    ))
                    .into())
                }
            };
            builder = builder.wait_on_rate_limit(wait);
        }

        if let Ok(retries) = std::env::var("WEBEX_MAX_RATE_LIMIT_RETRIES") {
            if let Ok(n) = retries.parse::<u32>() {
                builder = builder.max_rate_limit_retries(n);
            }
        }

        builder.build()
    }

    /// Get the access token if available
    pub fn access_token(&self) -> Option<&WebexToken> {
        self.access_token.as_ref()
    }

    /// Build the full URL for an endpoint
    ///
    /// Absolute URLs (such as pagination links) are returned unchanged.
    pub fn build_url(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            return endpoint.to_string();
        }
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = endpoint.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Validate the configuration
    pub fn validate(&self) -> WebexResult<()> {
        if self.access_token.is_none() {
            return Err(WebexError::Configuration(ConfigurationError::MissingToken));
        }

        if self.timeout.is_zero() {
            return Err(ConfigurationError::InvalidConfiguration {
                message: "Timeout must be greater than zero".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Builder for WebexConfig
#[derive(Default)]
pub struct WebexConfigBuilder {
    config: WebexConfig,
}

impl WebexConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: WebexConfig::default(),
        }
    }

    /// Set the access token
    pub fn access_token(mut self, token: &str) -> Result<Self, ConfigurationError> {
        self.config.access_token = Some(WebexToken::new(token)?);
        Ok(self)
    }

    /// Set the base URL
    pub fn base_url(mut self, url: &str) -> Result<Self, ConfigurationError> {
        self.config.base_url =
            Url::parse(url).map_err(|e| ConfigurationError::InvalidConfiguration {
                message: format!("Invalid URL: {}", e),
            })?;
        Ok(self)
    }

    /// Set the single request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Wait and retry when the service answers 429
    pub fn wait_on_rate_limit(mut self, wait: bool) -> Self {
        self.config.wait_on_rate_limit = wait;
        self
    }

    /// Set the maximum number of rate-limit retries
    pub fn max_rate_limit_retries(mut self, retries: u32) -> Self {
        self.config.max_rate_limit_retries = retries;
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Add a default header
    pub fn default_header(mut self, name: &str, value: &str) -> Self {
        if let Ok(header_name) = name.parse::<http::header::HeaderName>() {
            if let Ok(header_value) = value.parse::<http::header::HeaderValue>() {
                self.config.default_headers.insert(header_name, header_value);
            }
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> WebexResult<WebexConfig> {
        self.config.validate()?;
        Ok(self.config)
    }

    /// Build the configuration without validation (for testing)
    pub fn build_unchecked(self) -> WebexConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_validation() {
        assert!(WebexToken::new("abc123").is_ok());
        assert!(WebexToken::new("   ").is_err());
        assert!(WebexToken::new("abc 123").is_err());
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = WebexToken::new("super-secret").unwrap();
        assert_eq!(format!("{:?}", token), "WebexToken([REDACTED])");

        let token = WebexToken::new("ZDQ0NmYwMTgtYjA0Yi00").unwrap();
        assert_eq!(format!("{:?}", token), "WebexToken(ZDQ0Nm...[REDACTED])");
    }

    #[test]
    fn test_config_builder() {
        let config = WebexConfigBuilder::new()
            .access_token("test-token-123")
            .unwrap()
            .timeout(Duration::from_secs(10))
            .wait_on_rate_limit(false)
            .max_rate_limit_retries(5)
            .build()
            .unwrap();

        assert!(config.access_token.is_some());
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(!config.wait_on_rate_limit);
        assert_eq!(config.max_rate_limit_retries, 5);
    }

    #[test]
    fn test_build_url() {
        let config = WebexConfigBuilder::new()
            .access_token("test-token")
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.build_url("messages"), "https://webexapis.com/v1/messages");
        assert_eq!(
            config.build_url("/messages/M1"),
            "https://webexapis.com/v1/messages/M1"
        );
        assert_eq!(
            config.build_url("https://webexapis.com/v1/messages?cursor=abc"),
            "https://webexapis.com/v1/messages?cursor=abc"
        );
    }

    #[test]
    fn test_validation_missing_token() {
        let result = WebexConfigBuilder::new().build();
        assert!(matches!(
            result,
            Err(WebexError::Configuration(ConfigurationError::MissingToken))
        ));
    }

    #[test]
    fn test_debug_hides_token() {
        let config = WebexConfigBuilder::new()
            .access_token("very-secret-token")
            .unwrap()
            .default_header("X-Proxy-Auth", "proxy-secret")
            .build_unchecked();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("very-secret-token"));
        assert!(!debug.contains("proxy-secret"));
    }
}
