//! Pagination handling for list endpoints.
//!
//! The service pages list results with RFC 5988 `Link` headers. A
//! [`Paginated`] value describes a list request; every call to
//! [`Paginated::stream`] starts a new walk from the first page.

use crate::errors::{WebexError, WebexResult};
use crate::session::RestSession;
use crate::types::RequestParameters;
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use http::HeaderMap;
use serde_json::Value;
use std::sync::Arc;

/// Pagination links parsed from Link header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationLinks {
    /// URL for the next page.
    pub next: Option<String>,
    /// URL for the previous page.
    pub prev: Option<String>,
    /// URL for the first page.
    pub first: Option<String>,
    /// URL for the last page.
    pub last: Option<String>,
}

impl PaginationLinks {
    /// Parses pagination links from the Link header (RFC 5988).
    pub fn from_header(header_value: &str) -> Self {
        let mut links = Self::default();

        for part in header_value.split(',') {
            let mut url = None;
            let mut rel = None;

            for segment in part.split(';') {
                let segment = segment.trim();
                if let Some(inner) = segment.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
                    url = Some(inner.to_string());
                } else if let Some(value) = segment.strip_prefix("rel=") {
                    rel = Some(value.trim_matches('"').to_string());
                }
            }

            if let (Some(url), Some(rel)) = (url, rel) {
                match rel.as_str() {
                    "next" => links.next = Some(url),
                    "prev" => links.prev = Some(url),
                    "first" => links.first = Some(url),
                    "last" => links.last = Some(url),
                    _ => {}
                }
            }
        }

        links
    }

    /// Parses pagination links from response headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get("link")
            .and_then(|v| v.to_str().ok())
            .map(Self::from_header)
            .unwrap_or_default()
    }

    /// Returns true if there is a next page.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// A single page of results.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// Pagination links.
    pub links: PaginationLinks,
}

impl<T> Page<T> {
    /// Creates a new page.
    pub fn new(items: Vec<T>, links: PaginationLinks) -> Self {
        Self { items, links }
    }

    /// Returns true if there is a next page.
    pub fn has_next(&self) -> bool {
        self.links.has_next()
    }

    /// Returns the URL for the next page.
    pub fn next_url(&self) -> Option<&str> {
        self.links.next.as_deref()
    }

    /// Returns the number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the page is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

type Converter<T> = Arc<dyn Fn(Value) -> WebexResult<T> + Send + Sync>;

enum Cursor {
    Start,
    Next(String),
    Done,
}

/// Restartable, lazily fetched list result
///
/// Holds the request description only. No request is made until a stream
/// is polled, and streams share no cursor state with each other.
pub struct Paginated<T> {
    session: Arc<dyn RestSession>,
    path: String,
    params: RequestParameters,
    convert: Converter<T>,
}

impl<T> Clone for Paginated<T> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
            path: self.path.clone(),
            params: self.params.clone(),
            convert: self.convert.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Paginated<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paginated")
            .field("path", &self.path)
            .field("params", &self.params)
            .finish()
    }
}

impl<T: Send + 'static> Paginated<T> {
    /// Describe a list request
    pub fn new<F>(
        session: Arc<dyn RestSession>,
        path: impl Into<String>,
        params: RequestParameters,
        convert: F,
    ) -> Self
    where
        F: Fn(Value) -> WebexResult<T> + Send + Sync + 'static,
    {
        Self {
            session,
            path: path.into(),
            params,
            convert: Arc::new(convert),
        }
    }

    /// Resource path of the first page
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters of the first page
    pub fn params(&self) -> &RequestParameters {
        &self.params
    }

    /// Stream raw pages, following `next` links until none is given
    pub fn pages(&self) -> BoxStream<'static, WebexResult<Page<Value>>> {
        let session = self.session.clone();
        let path = self.path.clone();
        let params = self.params.clone();

        stream::try_unfold(Cursor::Start, move |cursor| {
            fetch_page(session.clone(), path.clone(), params.clone(), cursor)
        })
        .boxed()
    }

    /// Stream converted items across all pages, in server order
    pub fn stream(&self) -> BoxStream<'static, WebexResult<T>> {
        let convert = self.convert.clone();

        self.pages()
            .map_ok(|page| stream::iter(page.items.into_iter().map(Ok::<Value, WebexError>)))
            .try_flatten()
            .and_then(move |item| futures::future::ready(convert(item)))
            .boxed()
    }

    /// Fetch every page and collect all items
    pub async fn collect(&self) -> WebexResult<Vec<T>> {
        self.stream().try_collect().await
    }
}

async fn fetch_page(
    session: Arc<dyn RestSession>,
    path: String,
    params: RequestParameters,
    cursor: Cursor,
) -> WebexResult<Option<(Page<Value>, Cursor)>> {
    let page = match cursor {
        Cursor::Start => session.get_page(&path, Some(&params)).await?,
        // next links already carry the query string
        Cursor::Next(url) => session.get_page(&url, None).await?,
        Cursor::Done => return Ok(None),
    };

    let next = match page.links.next.clone() {
        Some(url) => Cursor::Next(url),
        None => Cursor::Done,
    };

    Ok(Some((page, next)))
}
