//! Observability infrastructure for the Webex client.
//!
//! Spans and events are emitted through `tracing`; this module holds the
//! helpers that keep secrets out of them.

pub mod logging;

pub use logging::*;
