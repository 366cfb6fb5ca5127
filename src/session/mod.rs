//! REST session for the Webex API.
//!
//! The session owns authentication, status handling, rate-limit waits and
//! page fetching. Resource services only shape requests and hand results to
//! the object factory.

use crate::auth::AuthManager;
use crate::config::WebexConfig;
use crate::errors::{ApiError, RateLimitError, ResponseError, WebexError, WebexResult};
use crate::pagination::{Page, PaginationLinks};
use crate::transport::{HttpTransport, MultipartForm, TransportRequest, TransportResponse};
use crate::types::RequestParameters;
use async_trait::async_trait;
use http::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Wait used when a 429 response carries no usable `Retry-After`
pub const DEFAULT_RATE_LIMIT_WAIT: Duration = Duration::from_secs(15);

/// Authenticated REST operations used by resource services
#[async_trait]
pub trait RestSession: Send + Sync {
    /// GET a resource and return its JSON
    async fn get(&self, path: &str, params: Option<&RequestParameters>) -> WebexResult<Value>;

    /// GET one page of a list resource
    ///
    /// `url` may be a resource path or an absolute `next` link.
    async fn get_page(
        &self,
        url: &str,
        params: Option<&RequestParameters>,
    ) -> WebexResult<Page<Value>>;

    /// POST a JSON body
    async fn post_json(&self, path: &str, body: Value) -> WebexResult<Value>;

    /// POST a multipart form
    async fn post_multipart(&self, path: &str, form: MultipartForm) -> WebexResult<Value>;

    /// DELETE a resource
    async fn delete(&self, path: &str) -> WebexResult<()>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ErrorDetail>,
    #[serde(default)]
    tracking_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    description: Option<String>,
}

/// Session backed by an [`HttpTransport`]
#[derive(Clone)]
pub struct WebexSession {
    config: Arc<WebexConfig>,
    auth: AuthManager,
    transport: Arc<dyn HttpTransport>,
}

impl WebexSession {
    /// Create a new session
    pub fn new(config: Arc<WebexConfig>, transport: Arc<dyn HttpTransport>) -> Self {
        let auth = AuthManager::new(config.clone());
        Self {
            config,
            auth,
            transport,
        }
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &str {
        self.config.base_url.as_str()
    }

    /// Configuration in use
    pub fn config(&self) -> &WebexConfig {
        &self.config
    }

    async fn execute(&self, request: TransportRequest) -> WebexResult<TransportResponse> {
        let request = request.with_timeout(self.config.timeout);
        let mut rate_limit_retries = 0;

        loop {
            let response = self.transport.send(request.clone()).await?;

            if response.status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after = retry_after(&response);
                if self.config.wait_on_rate_limit
                    && rate_limit_retries < self.config.max_rate_limit_retries
                {
                    rate_limit_retries += 1;
                    warn!(
                        retry_after_secs = retry_after.as_secs(),
                        attempt = rate_limit_retries,
                        "Rate limited, waiting before re-issuing request"
                    );
                    tokio::time::sleep(retry_after).await;
                    continue;
                }
                return Err(WebexError::RateLimit(RateLimitError::RateLimited {
                    retry_after,
                    tracking_id: tracking_id(&response),
                }));
            }

            if !response.status.is_success() {
                let error = api_error(&response);
                debug!(status = error.status, tracking_id = ?error.tracking_id, "Request failed");
                return Err(WebexError::Api(error));
            }

            return Ok(response);
        }
    }
}

#[async_trait]
impl RestSession for WebexSession {
    #[instrument(skip(self, params))]
    async fn get(&self, path: &str, params: Option<&RequestParameters>) -> WebexResult<Value> {
        let url = self.config.build_url(path);
        let query = params.map(RequestParameters::to_query).unwrap_or_default();
        let request = TransportRequest::get(url, self.auth.get_headers()?).with_query(query);
        parse_json(&self.execute(request).await?)
    }

    #[instrument(skip(self, params), fields(url = %crate::observability::redact_url(url)))]
    async fn get_page(
        &self,
        url: &str,
        params: Option<&RequestParameters>,
    ) -> WebexResult<Page<Value>> {
        let url = self.config.build_url(url);
        let query = params.map(RequestParameters::to_query).unwrap_or_default();
        let request = TransportRequest::get(url, self.auth.get_headers()?).with_query(query);
        let response = self.execute(request).await?;

        let links = PaginationLinks::from_headers(&response.headers);
        let items = match parse_json(&response)? {
            Value::Object(mut body) => match body.remove("items") {
                Some(Value::Array(items)) => items,
                _ => {
                    return Err(WebexError::Response(ResponseError::UnexpectedResponse {
                        message: "list response has no `items` array".to_string(),
                    }))
                }
            },
            _ => {
                return Err(WebexError::Response(ResponseError::UnexpectedResponse {
                    message: "list response is not a JSON object".to_string(),
                }))
            }
        };

        debug!(items = items.len(), has_next = links.has_next(), "Fetched page");
        Ok(Page::new(items, links))
    }

    #[instrument(skip(self, body))]
    async fn post_json(&self, path: &str, body: Value) -> WebexResult<Value> {
        let url = self.config.build_url(path);
        let request = TransportRequest::post_json(url, self.auth.get_headers()?, body);
        parse_json(&self.execute(request).await?)
    }

    #[instrument(skip(self, form), fields(fields = form.fields.len(), files = form.files.len()))]
    async fn post_multipart(&self, path: &str, form: MultipartForm) -> WebexResult<Value> {
        let url = self.config.build_url(path);
        let request = TransportRequest::post_multipart(url, self.auth.get_headers()?, form);
        parse_json(&self.execute(request).await?)
    }

    #[instrument(skip(self))]
    async fn delete(&self, path: &str) -> WebexResult<()> {
        let url = self.config.build_url(path);
        let request = TransportRequest::delete(url, self.auth.get_headers()?);
        self.execute(request).await?;
        Ok(())
    }
}

impl std::fmt::Debug for WebexSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebexSession")
            .field("base_url", &self.base_url())
            .field("auth", &self.auth)
            .finish()
    }
}

fn parse_json(response: &TransportResponse) -> WebexResult<Value> {
    if response.status == StatusCode::NO_CONTENT
        || response.body.iter().all(u8::is_ascii_whitespace)
    {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&response.body).map_err(|e| WebexError::Response(ResponseError::from(e)))
}

fn retry_after(response: &TransportResponse) -> Duration {
    response
        .header("Retry-After")
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_RATE_LIMIT_WAIT)
}

fn tracking_id(response: &TransportResponse) -> Option<String> {
    response.header("trackingid").map(String::from)
}

fn api_error(response: &TransportResponse) -> ApiError {
    let status = response.status.as_u16();
    let body: Option<ErrorBody> = serde_json::from_slice(&response.body).ok();

    let mut error = match body {
        Some(body) => {
            let details: Vec<String> = body
                .errors
                .into_iter()
                .filter_map(|e| e.description)
                .collect();
            let message = body
                .message
                .or_else(|| details.first().cloned())
                .unwrap_or_default();
            ApiError {
                status,
                message,
                tracking_id: body.tracking_id,
                details,
            }
        }
        None => ApiError::new(status, String::from_utf8_lossy(&response.body).trim()),
    };

    if error.tracking_id.is_none() {
        error.tracking_id = tracking_id(response);
    }
    error
}
