//! Service implementations for Webex API resources.
//!
//! Each service module provides methods for interacting with one
//! resource of the Webex REST API.

pub mod messages;

pub use messages::MessagesService;
