//! Message-related types for the Webex API.

use super::CardAttachment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Webex message
///
/// Built from server JSON only; fields the client does not model are kept
/// in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique message ID
    pub id: String,
    /// Parent message ID (for threaded replies)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Room the message was posted in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    /// Room type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_type: Option<RoomType>,
    /// Recipient person ID for 1:1 messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_person_id: Option<String>,
    /// Recipient email for 1:1 messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_person_email: Option<String>,
    /// Plain text content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Markdown content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    /// Rendered HTML content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    /// URLs of attached files
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
    /// Author person ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_id: Option<String>,
    /// Author email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_email: Option<String>,
    /// People mentioned in the message
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mentioned_people: Vec<String>,
    /// Groups mentioned in the message (e.g. "all")
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mentioned_groups: Vec<String>,
    /// Card attachments
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<CardAttachment>,
    /// Creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// Last edit time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
    /// Whether the message is a voice clip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_voice_clip: Option<bool>,
    /// Fields not modelled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Message {
    /// Best available textual content (markdown, then text)
    pub fn content(&self) -> &str {
        self.markdown
            .as_deref()
            .or(self.text.as_deref())
            .unwrap_or("")
    }

    /// Check if this message was sent in a 1:1 room
    pub fn is_direct(&self) -> bool {
        self.room_type == Some(RoomType::Direct)
    }

    /// Check if this message is a threaded reply
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Check if this message carries files
    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }

    /// Check if this message was edited
    pub fn is_edited(&self) -> bool {
        self.updated.is_some()
    }
}

/// Room type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    /// 1:1 room
    Direct,
    /// Group room
    Group,
    /// Type not known to this client
    #[serde(other)]
    Unknown,
}
