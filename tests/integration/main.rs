//! Integration tests using WireMock
//!
//! These tests drive the real reqwest transport against a mock HTTP server,
//! covering wire encoding, authentication and error mapping.

mod messages;

use webex_client::{WebexClient, WebexConfigBuilder};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "test-token-123";

/// Helper to create a mock server
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Helper to create a client pointing at the mock server
pub fn client_for(server: &MockServer) -> WebexClient {
    let config = WebexConfigBuilder::new()
        .access_token(TEST_TOKEN)
        .unwrap()
        .base_url(&format!("{}/v1/", server.uri()))
        .unwrap()
        .wait_on_rate_limit(false)
        .build()
        .expect("Failed to build config");

    WebexClient::new(config).expect("Failed to build client")
}

/// Helper to create an authenticated mock
pub fn mock_with_auth(path_matcher: &str, method_matcher: &str) -> MockBuilder {
    Mock::given(method(method_matcher))
        .and(path(path_matcher))
        .and(header("Authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
}

/// Helper to create success response templates
pub fn success_response(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}
