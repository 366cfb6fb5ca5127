//! Tests for the Webex API client.


#[cfg(test)]
mod messages_tests;


use crate::client::WebexClient;
use crate::config::WebexConfigBuilder;
use crate::mocks::MockHttpTransport;
use std::sync::Arc;

pub(crate) const TEST_TOKEN: &str = "test-token-123";

pub(crate) fn test_config() -> WebexConfigBuilder {
    WebexConfigBuilder::new().access_token(TEST_TOKEN).unwrap()
}

pub(crate) fn client_with(mock: &MockHttpTransport) -> WebexClient {
    client_with_config(mock, test_config())
}

pub(crate) fn client_with_config(
    mock: &MockHttpTransport,
    config: WebexConfigBuilder,
) -> WebexClient {
    WebexClient::with_transport(config.build_unchecked(), Arc::new(mock.clone())).unwrap()
}
