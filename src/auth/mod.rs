//! Authentication management for the Webex client.
//!
//! Builds the bearer authorization headers sent with every request.

use crate::config::{WebexConfig, WebexToken};
use crate::errors::{ConfigurationError, WebexError, WebexResult};
use http::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use std::sync::Arc;

/// Authentication manager for Webex API requests
#[derive(Clone)]
pub struct AuthManager {
    config: Arc<WebexConfig>,
}

impl AuthManager {
    /// Create a new authentication manager
    pub fn new(config: Arc<WebexConfig>) -> Self {
        Self { config }
    }

    /// Get headers for an API request
    ///
    /// No content type is set here; the transport picks JSON or multipart.
    pub fn get_headers(&self) -> WebexResult<HeaderMap> {
        let token = self
            .config
            .access_token()
            .ok_or(WebexError::Configuration(ConfigurationError::MissingToken))?;
        self.build_headers(token)
    }

    /// Whether an access token is configured
    pub fn has_token(&self) -> bool {
        self.config.access_token().is_some()
    }

    fn build_headers(&self, token: &WebexToken) -> WebexResult<HeaderMap> {
        let mut headers = self.config.default_headers.clone();

        let auth_value = format!("Bearer {}", token.expose());
        let mut auth_header = HeaderValue::from_str(&auth_value).map_err(|_| {
            ConfigurationError::InvalidToken("Token is not a valid header value".to_string())
        })?;
        auth_header.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_header);

        if !headers.contains_key(USER_AGENT) {
            if let Ok(value) = HeaderValue::from_str(&self.config.user_agent) {
                headers.insert(USER_AGENT, value);
            }
        }

        Ok(headers)
    }
}

impl std::fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthManager")
            .field("has_token", &self.has_token())
            .finish()
    }
}
