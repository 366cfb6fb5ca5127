//! HTTP transport layer for the Webex client.
//!
//! Provides low-level HTTP communication: request building, JSON and
//! multipart bodies, and raw response capture. Status handling lives in
//! the session layer.

use crate::errors::{NetworkError, WebexError, WebexResult};
use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use reqwest::{Client, ClientBuilder};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

/// HTTP transport trait for making API requests
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send a request and capture the raw response
    async fn send(&self, request: TransportRequest) -> WebexResult<TransportResponse>;
}

/// Request body shapes understood by the transport
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// No body
    Empty,
    /// JSON document
    Json(Value),
    /// `multipart/form-data` body
    Multipart(MultipartForm),
}

/// Transport request
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL
    pub url: String,
    /// Request headers
    pub headers: HeaderMap,
    /// Query string pairs
    pub query: Vec<(String, String)>,
    /// Request body
    pub body: RequestBody,
    /// Request timeout
    pub timeout: Option<Duration>,
}

impl TransportRequest {
    fn new(method: Method, url: impl Into<String>, headers: HeaderMap, body: RequestBody) -> Self {
        Self {
            method,
            url: url.into(),
            headers,
            query: Vec::new(),
            body,
            timeout: None,
        }
    }

    /// Create a new GET request
    pub fn get(url: impl Into<String>, headers: HeaderMap) -> Self {
        Self::new(Method::GET, url, headers, RequestBody::Empty)
    }

    /// Create a new JSON POST request
    pub fn post_json(url: impl Into<String>, headers: HeaderMap, body: Value) -> Self {
        Self::new(Method::POST, url, headers, RequestBody::Json(body))
    }

    /// Create a new multipart POST request
    pub fn post_multipart(url: impl Into<String>, headers: HeaderMap, form: MultipartForm) -> Self {
        Self::new(Method::POST, url, headers, RequestBody::Multipart(form))
    }

    /// Create a new DELETE request
    pub fn delete(url: impl Into<String>, headers: HeaderMap) -> Self {
        Self::new(Method::DELETE, url, headers, RequestBody::Empty)
    }

    /// Set the query string pairs
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Raw response captured by the transport
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
}

impl TransportResponse {
    /// Create a response
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Read a header as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Multipart form for file uploads
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    /// Text fields
    pub fields: Vec<(String, String)>,
    /// Files to upload
    pub files: Vec<FileUpload>,
}

impl MultipartForm {
    /// Create an empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text field
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Add a file
    pub fn file(mut self, upload: FileUpload) -> Self {
        self.files.push(upload);
        self
    }
}

/// File upload data
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// Form field name
    pub field_name: String,
    /// File name
    pub file_name: String,
    /// File content
    pub content: Bytes,
    /// MIME type
    pub mime_type: String,
}

impl FileUpload {
    /// Create a new file upload, guessing the MIME type from the file name
    pub fn new(
        field_name: impl Into<String>,
        file_name: impl Into<String>,
        content: impl Into<Bytes>,
    ) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .to_string();

        Self {
            field_name: field_name.into(),
            file_name,
            content: content.into(),
            mime_type,
        }
    }

    /// Set the MIME type
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }
}

/// Default HTTP transport implementation using reqwest
pub struct ReqwestTransport {
    client: Client,
    default_timeout: Duration,
}

impl ReqwestTransport {
    /// Create a new transport with the given timeout
    pub fn new(timeout: Duration) -> WebexResult<Self> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| WebexError::Network(NetworkError::Http(e.to_string())))?;

        Ok(Self {
            client,
            default_timeout: timeout,
        })
    }

    /// Create a new transport with a pre-built client
    pub fn with_client(client: Client, default_timeout: Duration) -> Self {
        Self {
            client,
            default_timeout,
        }
    }

    fn build_form(form: MultipartForm) -> WebexResult<reqwest::multipart::Form> {
        let mut multipart = reqwest::multipart::Form::new();

        for (name, value) in form.fields {
            multipart = multipart.text(name, value);
        }

        for file in form.files {
            let part = reqwest::multipart::Part::bytes(file.content.to_vec())
                .file_name(file.file_name)
                .mime_str(&file.mime_type)
                .map_err(|e| WebexError::Network(NetworkError::Http(e.to_string())))?;
            multipart = multipart.part(file.field_name, part);
        }

        Ok(multipart)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %crate::observability::redact_url(&request.url)))]
    async fn send(&self, request: TransportRequest) -> WebexResult<TransportResponse> {
        let timeout = request.timeout.unwrap_or(self.default_timeout);

        let mut req_builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers)
            .timeout(timeout);

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        req_builder = match request.body {
            RequestBody::Empty => req_builder,
            RequestBody::Json(body) => req_builder.json(&body),
            RequestBody::Multipart(form) => req_builder.multipart(Self::build_form(form)?),
        };

        let response = req_builder
            .send()
            .await
            .map_err(|e| WebexError::Network(NetworkError::from(e)))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| WebexError::Network(NetworkError::from(e)))?;

        debug!(status = %status, body_len = body.len(), "Received response");

        Ok(TransportResponse::new(status, headers, body))
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("default_timeout", &self.default_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transport_request_builder() {
        let request = TransportRequest::get("https://webexapis.com/v1/messages", HeaderMap::new())
            .with_query(vec![("roomId".to_string(), "R1".to_string())]);

        assert_eq!(request.method, Method::GET);
        assert_eq!(request.url, "https://webexapis.com/v1/messages");
        assert!(matches!(request.body, RequestBody::Empty));
        assert_eq!(request.query.len(), 1);
    }

    #[test]
    fn test_json_request() {
        let request = TransportRequest::post_json(
            "https://webexapis.com/v1/messages",
            HeaderMap::new(),
            json!({"roomId": "R1", "text": "hi"}),
        );
        assert_eq!(request.method, Method::POST);
        assert!(matches!(request.body, RequestBody::Json(ref v) if v["text"] == "hi"));
    }

    #[test]
    fn test_file_upload_mime_detection() {
        let upload = FileUpload::new("files", "photo.png", vec![0u8; 10]);
        assert_eq!(upload.mime_type, "image/png");

        let upload = FileUpload::new("files", "report.pdf", vec![0u8; 10]);
        assert_eq!(upload.mime_type, "application/pdf");

        let upload = FileUpload::new("files", "blob", vec![0u8; 10]);
        assert_eq!(upload.mime_type, "application/octet-stream");
    }

    #[test]
    fn test_multipart_form_builder() {
        let form = MultipartForm::new()
            .field("roomId", "R1")
            .file(FileUpload::new("files", "notes.txt", b"content".to_vec()));

        assert_eq!(form.fields.len(), 1);
        assert_eq!(form.files.len(), 1);
        assert_eq!(form.files[0].field_name, "files");
    }
}
