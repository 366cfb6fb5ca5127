//! Test fixtures for Webex API responses.
//!
//! Provides realistic server payloads for unit and integration tests.

use serde_json::{json, Value};

/// Room used by fixtures
pub const ROOM_ID: &str = "Y2lzY29zcGFyazovL3VzL1JPT00vYmJjZWIxYWQtNDNmMS0zYjU4LTkxNDctZjE0YmIwYzRkMTU0";

/// Sender used by fixtures
pub const PERSON_ID: &str = "Y2lzY29zcGFyazovL3VzL1BFT1BMRS9mNWIzNjE4Ny1jOGRkLTQ3MjctOGIyZi1mOWM0NDdmMjkwNDY";

/// Message fixtures
pub mod message_fixtures {
    use super::*;

    /// Plain text message in a group room
    pub fn simple(id: &str, text: &str) -> Value {
        json!({
            "id": id,
            "roomId": ROOM_ID,
            "roomType": "group",
            "text": text,
            "personId": PERSON_ID,
            "personEmail": "matt@example.com",
            "created": "2024-03-01T12:00:00.000Z"
        })
    }

    /// Markdown message with rendered HTML
    pub fn markdown(id: &str, markdown: &str) -> Value {
        let mut message = simple(id, markdown);
        message["markdown"] = json!(markdown);
        message["html"] = json!(format!("<p>{}</p>", markdown));
        message
    }

    /// Threaded reply
    pub fn reply(id: &str, parent_id: &str, text: &str) -> Value {
        let mut message = simple(id, text);
        message["parentId"] = json!(parent_id);
        message
    }

    /// 1:1 message with a file
    pub fn direct_with_file(id: &str, file_url: &str) -> Value {
        json!({
            "id": id,
            "roomId": ROOM_ID,
            "roomType": "direct",
            "toPersonEmail": "julie@example.com",
            "files": [file_url],
            "personId": PERSON_ID,
            "personEmail": "matt@example.com",
            "created": "2024-03-01T12:05:00.000Z"
        })
    }

    /// Message carrying an Adaptive Card
    pub fn with_card(id: &str) -> Value {
        let mut message = simple(id, "Card fallback");
        message["attachments"] = json!([{
            "contentType": "application/vnd.microsoft.card.adaptive",
            "content": {
                "type": "AdaptiveCard",
                "version": "1.1",
                "body": [{ "type": "TextBlock", "text": "Hello" }]
            }
        }]);
        message
    }

    /// Page of simple messages with the given IDs
    pub fn page(ids: &[&str]) -> Vec<Value> {
        ids.iter()
            .map(|id| simple(id, &format!("message {}", id)))
            .collect()
    }
}

/// Error fixtures
pub mod error_fixtures {
    use super::*;

    /// 404 body for a missing message
    pub fn not_found(tracking_id: &str) -> Value {
        json!({
            "message": "Unable to find message.",
            "errors": [{ "description": "Unable to find message." }],
            "trackingId": tracking_id
        })
    }

    /// 400 body for an invalid argument
    pub fn bad_request(description: &str) -> Value {
        json!({
            "message": description,
            "errors": [{ "description": description }],
            "trackingId": "ROUTER_BAD_REQUEST"
        })
    }
}
