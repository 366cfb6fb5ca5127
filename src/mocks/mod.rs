//! Mock implementations for testing.
//!
//! Provides a scripted transport that records every request, so services
//! can be exercised end to end without a network.

use crate::errors::{ResponseError, WebexError, WebexResult};
use crate::transport::{HttpTransport, RequestBody, TransportRequest, TransportResponse};
use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, HeaderValue, StatusCode};
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;

/// Mock response configuration
#[derive(Debug)]
pub struct MockResponse {
    /// Response body
    pub body: String,
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Vec<(String, String)>,
    /// Delay before response
    pub delay_ms: Option<u64>,
    /// Error to return instead
    pub error: Option<WebexError>,
}

impl MockResponse {
    /// Create a successful JSON response
    pub fn json<T: Serialize>(data: &T) -> Self {
        Self::ok(serde_json::to_string(data).unwrap_or_default())
    }

    /// Create a successful response with raw body
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            status: 200,
            headers: Vec::new(),
            delay_ms: None,
            error: None,
        }
    }

    /// Create an empty 204 response
    pub fn no_content() -> Self {
        Self::ok("").with_status(204)
    }

    /// Create a page of list items, optionally linking to the next page
    pub fn page(items: Vec<Value>, next: Option<&str>) -> Self {
        let response = Self::json(&serde_json::json!({ "items": items }));
        match next {
            Some(url) => response.with_header("Link", format!("<{}>; rel=\"next\"", url)),
            None => response,
        }
    }

    /// Create a Webex API error response
    pub fn api_error(status: u16, message: &str) -> Self {
        Self::json(&serde_json::json!({
            "message": message,
            "errors": [{ "description": message }],
            "trackingId": "MOCK_TRACKING_ID"
        }))
        .with_status(status)
    }

    /// Create a rate limit response
    pub fn rate_limited(retry_after: u64) -> Self {
        Self::api_error(429, "Too Many Requests")
            .with_header("Retry-After", retry_after.to_string())
    }

    /// Return a transport error instead of a response
    pub fn error(error: WebexError) -> Self {
        Self {
            error: Some(error),
            ..Self::ok("")
        }
    }

    /// Set the status code
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Add a header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add delay to response
    pub fn with_delay(mut self, ms: u64) -> Self {
        self.delay_ms = Some(ms);
        self
    }
}

/// Body of a recorded request
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedBody {
    /// No body
    Empty,
    /// JSON body
    Json(Value),
    /// Multipart body
    Multipart {
        /// Text fields
        fields: Vec<(String, String)>,
        /// Files as (field name, file name, content)
        files: Vec<(String, String, Bytes)>,
    },
}

/// Recorded request for verification
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request URL
    pub url: String,
    /// Request method
    pub method: String,
    /// Query string pairs
    pub query: Vec<(String, String)>,
    /// Request body
    pub body: RecordedBody,
    /// Request headers
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    /// Get a header by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Get a query parameter
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// True for a JSON body
    pub fn is_json(&self) -> bool {
        matches!(self.body, RecordedBody::Json(_))
    }

    /// True for a multipart body
    pub fn is_multipart(&self) -> bool {
        matches!(self.body, RecordedBody::Multipart { .. })
    }
}

/// Mock HTTP transport for testing
#[derive(Clone, Default)]
pub struct MockHttpTransport {
    /// Queue of responses to return
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Recorded requests
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a response to the queue
    pub fn add_response(self, response: MockResponse) -> Self {
        self.responses.lock().push_back(response);
        self
    }

    /// Add multiple responses
    pub fn add_responses(self, responses: impl IntoIterator<Item = MockResponse>) -> Self {
        self.responses.lock().extend(responses);
        self
    }

    /// Add a JSON response
    pub fn add_json_response<T: Serialize>(self, data: &T) -> Self {
        self.add_response(MockResponse::json(data))
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// Get the last recorded request
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().last().cloned()
    }

    /// Number of requests sent so far
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Get remaining response count
    pub fn remaining_responses(&self) -> usize {
        self.responses.lock().len()
    }

    fn record_request(&self, request: &TransportRequest) {
        let headers = request
            .headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();

        let body = match &request.body {
            RequestBody::Empty => RecordedBody::Empty,
            RequestBody::Json(value) => RecordedBody::Json(value.clone()),
            RequestBody::Multipart(form) => RecordedBody::Multipart {
                fields: form.fields.clone(),
                files: form
                    .files
                    .iter()
                    .map(|f| (f.field_name.clone(), f.file_name.clone(), f.content.clone()))
                    .collect(),
            },
        };

        self.requests.lock().push(RecordedRequest {
            url: request.url.clone(),
            method: request.method.to_string(),
            query: request.query.clone(),
            body,
            headers,
        });
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn send(&self, request: TransportRequest) -> WebexResult<TransportResponse> {
        self.record_request(&request);

        let response = self.responses.lock().pop_front().ok_or_else(|| {
            WebexError::Response(ResponseError::UnexpectedResponse {
                message: "No mock response configured".to_string(),
            })
        })?;

        if let Some(delay) = response.delay_ms {
            tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
        }

        if let Some(error) = response.error {
            return Err(error);
        }

        let status = StatusCode::from_u16(response.status).map_err(|e| {
            WebexError::Response(ResponseError::UnexpectedResponse {
                message: e.to_string(),
            })
        })?;

        let mut headers = HeaderMap::new();
        for (name, value) in response.headers {
            if let (Ok(name), Ok(value)) = (
                name.parse::<http::header::HeaderName>(),
                HeaderValue::from_str(&value),
            ) {
                headers.append(name, value);
            }
        }

        Ok(TransportResponse::new(status, headers, response.body))
    }
}

impl std::fmt::Debug for MockHttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockHttpTransport")
            .field("pending_responses", &self.responses.lock().len())
            .field("recorded_requests", &self.requests.lock().len())
            .finish()
    }
}
