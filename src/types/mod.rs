//! Core types for the Webex API.

mod cards;
mod files;
mod message;
mod params;

pub use cards::*;
pub use files::*;
pub use message::*;
pub use params::*;

use serde::de::DeserializeOwned;

/// A resource object returned by the Webex API
///
/// `OBJECT_TYPE` is the tag the object factory is asked to build.
pub trait WebexObject: DeserializeOwned + Send + 'static {
    /// Type tag of this object
    const OBJECT_TYPE: &'static str;
}

impl WebexObject for Message {
    const OBJECT_TYPE: &'static str = "message";
}
