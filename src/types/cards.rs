//! Card attachments.
//!
//! Callers pass attachments either as a raw JSON mapping or as an
//! [`AdaptiveCard`]; both are normalized to the wire mapping before they
//! are sent.

use crate::errors::{ResponseError, WebexError, WebexResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Content type of Adaptive Card attachments
pub const ADAPTIVE_CARD_CONTENT_TYPE: &str = "application/vnd.microsoft.card.adaptive";

/// Adaptive Card schema URL
pub const ADAPTIVE_CARD_SCHEMA: &str = "http://adaptivecards.io/schemas/adaptive-card.json";

/// Attachment in wire form, as sent to and returned by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardAttachment {
    /// Attachment content type
    pub content_type: String,
    /// Attachment content
    pub content: Value,
}

/// An Adaptive Card
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveCard {
    #[serde(rename = "$schema")]
    schema: String,
    #[serde(rename = "type")]
    card_type: String,
    version: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    body: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    actions: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fallback_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lang: Option<String>,
}

impl Default for AdaptiveCard {
    fn default() -> Self {
        Self {
            schema: ADAPTIVE_CARD_SCHEMA.to_string(),
            card_type: "AdaptiveCard".to_string(),
            version: "1.1".to_string(),
            body: Vec::new(),
            actions: Vec::new(),
            fallback_text: None,
            lang: None,
        }
    }
}

impl AdaptiveCard {
    /// Create an empty card
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the card schema version
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Append a body element
    pub fn body_element(mut self, element: Value) -> Self {
        self.body.push(element);
        self
    }

    /// Append a `TextBlock` body element
    pub fn text_block(self, text: impl Into<String>) -> Self {
        self.body_element(serde_json::json!({
            "type": "TextBlock",
            "text": text.into(),
            "wrap": true,
        }))
    }

    /// Append an action
    pub fn action(mut self, action: Value) -> Self {
        self.actions.push(action);
        self
    }

    /// Append an `Action.Submit` with the given title and data
    pub fn submit_action(self, title: impl Into<String>, data: Value) -> Self {
        self.action(serde_json::json!({
            "type": "Action.Submit",
            "title": title.into(),
            "data": data,
        }))
    }

    /// Text shown by clients that cannot render the card
    pub fn fallback_text(mut self, text: impl Into<String>) -> Self {
        self.fallback_text = Some(text.into());
        self
    }

    /// Card language
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Wrap the card in its attachment envelope
    pub fn to_attachment(&self) -> WebexResult<CardAttachment> {
        let content = serde_json::to_value(self)
            .map_err(|e| WebexError::Response(ResponseError::from(e)))?;
        Ok(CardAttachment {
            content_type: ADAPTIVE_CARD_CONTENT_TYPE.to_string(),
            content,
        })
    }
}

/// Attachment input accepted when creating a message
#[derive(Debug, Clone, PartialEq)]
pub enum Attachment {
    /// Caller-built wire mapping, sent as-is
    Raw(Map<String, Value>),
    /// Structured card, serialized before sending
    Card(AdaptiveCard),
}

impl Attachment {
    /// Build a raw attachment from a JSON value, which must be an object
    pub fn raw(value: Value) -> WebexResult<Self> {
        match value {
            Value::Object(map) => Ok(Self::Raw(map)),
            other => Err(WebexError::invalid_argument(
                "attachments",
                format!("each attachment must be a mapping or a card, got {}", other),
            )),
        }
    }

    /// Normalize to the wire mapping
    pub fn to_wire(&self) -> WebexResult<Value> {
        match self {
            Self::Raw(map) => Ok(Value::Object(map.clone())),
            Self::Card(card) => serde_json::to_value(card.to_attachment()?)
                .map_err(|e| WebexError::Response(ResponseError::from(e))),
        }
    }
}

impl From<AdaptiveCard> for Attachment {
    fn from(card: AdaptiveCard) -> Self {
        Self::Card(card)
    }
}

impl From<Map<String, Value>> for Attachment {
    fn from(map: Map<String, Value>) -> Self {
        Self::Raw(map)
    }
}
