//! Webex API Client
//!
//! Typed access to the Webex "messages" resource:
//! - Listing room messages as a restartable, lazily paginated stream
//! - Posting messages as JSON or as multipart uploads with a local file
//! - Retrieving and deleting messages by ID
//! - Adaptive Card attachments
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use futures::TryStreamExt;
//! use webex_client::services::messages::{
//!     CreateMessageRequest, ListMessagesRequest, MessagesServiceTrait,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create client from environment
//!     let client = webex_client::create_client_from_env()?;
//!
//!     // Post a message
//!     let message = client
//!         .messages()
//!         .create(CreateMessageRequest::to_room("ROOM_ID").markdown("**Hello**, Webex!"))
//!         .await?;
//!     println!("Message posted: {}", message.id);
//!
//!     // Walk the room history, newest first
//!     let history = client.messages().list(ListMessagesRequest::new("ROOM_ID").max(50))?;
//!     let mut stream = history.stream();
//!     while let Some(message) = stream.try_next().await? {
//!         println!("{}: {}", message.id, message.content());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

// Core modules
pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod factory;
pub mod pagination;
pub mod session;
pub mod transport;
pub mod types;

// Services
pub mod services;

// Observability
pub mod observability;

// Testing utilities
pub mod fixtures;
pub mod mocks;

// Tests
#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use client::{WebexApi, WebexClient};
pub use config::{WebexConfig, WebexConfigBuilder};
pub use errors::{WebexError, WebexResult};

/// Default base URL for the Webex API
pub const DEFAULT_BASE_URL: &str = "https://webexapis.com/v1/";

/// Default single request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of times a rate-limited request is re-issued
pub const DEFAULT_MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Create a Webex client with the given configuration
pub fn create_client(config: WebexConfig) -> WebexResult<WebexClient> {
    WebexClient::new(config)
}

/// Create a Webex client from environment variables
///
/// Reads:
/// - `WEBEX_ACCESS_TOKEN` - Access token (falls back to `WEBEX_TEAMS_ACCESS_TOKEN`)
/// - `WEBEX_BASE_URL` - API base URL
/// - `WEBEX_TIMEOUT` - Single request timeout in seconds
/// - `WEBEX_WAIT_ON_RATE_LIMIT` - Whether to wait and retry on HTTP 429
/// - `WEBEX_MAX_RATE_LIMIT_RETRIES` - Upper bound on rate-limit retries
pub fn create_client_from_env() -> WebexResult<WebexClient> {
    let config = WebexConfig::from_env()?;
    create_client(config)
}
