//! Webex client implementation.
//!
//! Provides the main entry point for interacting with Webex APIs.

use crate::config::WebexConfig;
use crate::errors::WebexResult;
use crate::factory::{DefaultObjectFactory, ObjectFactory};
use crate::services::messages::MessagesServiceTrait;
use crate::services::MessagesService;
use crate::session::{RestSession, WebexSession};
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::types::Message;
use std::sync::Arc;

/// Trait defining the Webex client interface
pub trait WebexApi: Send + Sync {
    /// Get the configuration
    fn config(&self) -> &WebexConfig;

    /// Get the messages service
    fn messages(&self) -> &dyn MessagesServiceTrait;
}

/// Main Webex client implementation
#[derive(Clone)]
pub struct WebexClient {
    config: Arc<WebexConfig>,
    session: Arc<dyn RestSession>,
    messages_service: MessagesService,
}

impl WebexClient {
    /// Create a new Webex client with the given configuration
    pub fn new(config: WebexConfig) -> WebexResult<Self> {
        config.validate()?;
        let transport = Arc::new(ReqwestTransport::new(config.timeout)?);
        Self::with_transport(config, transport)
    }

    /// Create a new Webex client with a custom transport
    pub fn with_transport(
        config: WebexConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> WebexResult<Self> {
        let config = Arc::new(config);
        let session = Arc::new(WebexSession::new(config.clone(), transport));
        Ok(Self::with_session(config, session, Arc::new(DefaultObjectFactory)))
    }

    /// Create a new Webex client over an existing session and object factory
    pub fn with_session(
        config: Arc<WebexConfig>,
        session: Arc<dyn RestSession>,
        factory: Arc<dyn ObjectFactory<Message>>,
    ) -> Self {
        let messages_service = MessagesService::new(session.clone(), factory);
        Self {
            config,
            session,
            messages_service,
        }
    }

    /// Get the underlying session
    pub fn session(&self) -> &Arc<dyn RestSession> {
        &self.session
    }

    /// Get a reference to the base URL
    pub fn base_url(&self) -> &str {
        self.config.base_url.as_str()
    }

    /// Build a full URL for an endpoint
    pub fn build_url(&self, endpoint: &str) -> String {
        self.config.build_url(endpoint)
    }

    /// Get the messages service
    pub fn messages(&self) -> &MessagesService {
        &self.messages_service
    }
}

impl WebexApi for WebexClient {
    fn config(&self) -> &WebexConfig {
        &self.config
    }

    fn messages(&self) -> &dyn MessagesServiceTrait {
        &self.messages_service
    }
}

impl std::fmt::Debug for WebexClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebexClient")
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WebexConfigBuilder;

    fn test_config() -> WebexConfig {
        WebexConfigBuilder::new()
            .access_token("test-token-123")
            .unwrap()
            .build_unchecked()
    }

    #[test]
    fn test_client_creation() {
        let client = WebexClient::new(test_config()).unwrap();
        assert!(WebexApi::config(&client).access_token().is_some());
    }

    #[test]
    fn test_client_requires_token() {
        let config = WebexConfigBuilder::new().build_unchecked();
        assert!(WebexClient::new(config).is_err());
    }

    #[test]
    fn test_build_url() {
        let client = WebexClient::new(test_config()).unwrap();
        assert_eq!(client.build_url("messages"), "https://webexapis.com/v1/messages");
    }

    #[test]
    fn test_client_clone() {
        let client = WebexClient::new(test_config()).unwrap();
        let cloned = client.clone();
        assert_eq!(client.base_url(), cloned.base_url());
    }

    #[test]
    fn test_trait_service_accessor() {
        let client = WebexClient::new(test_config()).unwrap();
        let api: &dyn WebexApi = &client;
        let _ = api.messages();
    }
}
