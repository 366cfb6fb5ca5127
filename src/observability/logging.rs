//! Logging utilities with sensitive data redaction.

use std::fmt;

/// Wrapper for sensitive data that redacts on display
#[derive(Clone)]
pub struct Redacted<T>(T);

impl<T> Redacted<T> {
    /// Create a new redacted value
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Get the inner value (use sparingly)
    pub fn expose(&self) -> &T {
        &self.0
    }
}

impl<T> fmt::Debug for Redacted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl<T> fmt::Display for Redacted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

/// Redact a token, keeping a short prefix for correlation
pub fn redact_token(token: &str) -> String {
    match token.char_indices().nth(6) {
        Some((idx, _)) if token.len() > 12 => format!("{}...[REDACTED]", &token[..idx]),
        _ => "[REDACTED]".to_string(),
    }
}

/// Redact a URL, hiding credentials in query parameters
pub fn redact_url(url: &str) -> String {
    match url.split_once('?') {
        Some((base, query)) => format!("{}?{}", base, redact_query_params(query)),
        None => url.to_string(),
    }
}

fn redact_query_params(query: &str) -> String {
    const SENSITIVE: [&str; 5] = ["token", "access_token", "key", "secret", "password"];

    query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if SENSITIVE.iter().any(|s| key.eq_ignore_ascii_case(s)) => {
                format!("{}=[REDACTED]", key)
            }
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&")
}
