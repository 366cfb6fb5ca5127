//! Messages service for the Webex API.
//!
//! Provides methods for listing, posting, retrieving and deleting messages.

mod requests;
mod service;

pub use requests::*;
pub use service::*;
