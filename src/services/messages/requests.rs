//! Request types for messages service.

use crate::errors::{ValidationError, WebexError, WebexResult};
use crate::types::{Attachment, FileReference, RequestParameters};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

/// Request to list the messages of a room
#[derive(Debug, Clone, PartialEq)]
pub struct ListMessagesRequest {
    /// Room to list
    pub room_id: String,
    /// Only messages mentioning this person ("me" or a person ID)
    pub mentioned_people: Option<String>,
    /// Only messages sent before this ISO 8601 time
    pub before: Option<String>,
    /// Only messages sent before this message ID
    pub before_message: Option<String>,
    /// Page size requested from the service
    pub max: Option<u32>,
    /// Additional query parameters, passed through verbatim
    pub extra: Map<String, Value>,
}

impl ListMessagesRequest {
    /// Create a new list request
    pub fn new(room_id: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
            mentioned_people: None,
            before: None,
            before_message: None,
            max: None,
            extra: Map::new(),
        }
    }

    /// Only messages mentioning the given person
    pub fn mentioned_people(mut self, person: impl Into<String>) -> Self {
        self.mentioned_people = Some(person.into());
        self
    }

    /// Only messages sent before the given ISO 8601 time
    pub fn before(mut self, before: impl Into<String>) -> Self {
        self.before = Some(before.into());
        self
    }

    /// Only messages sent before the given time
    pub fn before_time(self, before: DateTime<Utc>) -> Self {
        self.before(before.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    /// Only messages sent before the given message
    pub fn before_message(mut self, message_id: impl Into<String>) -> Self {
        self.before_message = Some(message_id.into());
        self
    }

    /// Page size
    pub fn max(mut self, max: u32) -> Self {
        self.max = Some(max);
        self
    }

    /// Add a pass-through query parameter
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    pub(crate) fn validate(&self) -> WebexResult<()> {
        require_id("roomId", &self.room_id)
    }

    /// Query parameters for the first page
    pub fn to_params(&self) -> RequestParameters {
        let mut params = RequestParameters::new()
            .with("roomId", Some(self.room_id.as_str()))
            .with("mentionedPeople", self.mentioned_people.as_deref())
            .with("before", self.before.as_deref())
            .with("beforeMessage", self.before_message.as_deref())
            .with("max", self.max);
        params.extend_extra(self.extra.clone());
        params
    }
}

/// Request to post a message
///
/// Address exactly one of room, person ID or person email; the service
/// rejects ambiguous destinations, this client does not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateMessageRequest {
    /// Destination room
    pub room_id: Option<String>,
    /// Recipient person ID for a 1:1 message
    pub to_person_id: Option<String>,
    /// Recipient email for a 1:1 message
    pub to_person_email: Option<String>,
    /// Plain text, or fallback text when `markdown` is set
    pub text: Option<String>,
    /// Markdown content
    pub markdown: Option<String>,
    /// Parent message ID for a threaded reply
    pub parent_id: Option<String>,
    /// Public URL or local path of the file to attach (one at most)
    pub files: Vec<String>,
    /// Card attachments
    pub attachments: Vec<Attachment>,
    /// Additional body fields, passed through verbatim
    pub extra: Map<String, Value>,
}

impl CreateMessageRequest {
    /// Create an empty request
    pub fn new() -> Self {
        Self::default()
    }

    /// Post into a room
    pub fn to_room(room_id: impl Into<String>) -> Self {
        Self {
            room_id: Some(room_id.into()),
            ..Self::default()
        }
    }

    /// Post a 1:1 message by person ID
    pub fn to_person(person_id: impl Into<String>) -> Self {
        Self {
            to_person_id: Some(person_id.into()),
            ..Self::default()
        }
    }

    /// Post a 1:1 message by email
    pub fn to_email(email: impl Into<String>) -> Self {
        Self {
            to_person_email: Some(email.into()),
            ..Self::default()
        }
    }

    /// Set the room
    pub fn room_id(mut self, room_id: impl Into<String>) -> Self {
        self.room_id = Some(room_id.into());
        self
    }

    /// Set the recipient person ID
    pub fn to_person_id(mut self, person_id: impl Into<String>) -> Self {
        self.to_person_id = Some(person_id.into());
        self
    }

    /// Set the recipient email
    pub fn to_person_email(mut self, email: impl Into<String>) -> Self {
        self.to_person_email = Some(email.into());
        self
    }

    /// Set the plain text
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the markdown
    pub fn markdown(mut self, markdown: impl Into<String>) -> Self {
        self.markdown = Some(markdown.into());
        self
    }

    /// Reply in a thread
    pub fn parent_id(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Attach a file by public URL or local path
    pub fn file(mut self, file: impl Into<String>) -> Self {
        self.files.push(file.into());
        self
    }

    /// Replace the file list
    pub fn files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files = files.into_iter().map(Into::into).collect();
        self
    }

    /// Add a card attachment
    pub fn attachment(mut self, attachment: impl Into<Attachment>) -> Self {
        self.attachments.push(attachment.into());
        self
    }

    /// Add a pass-through body field
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    /// Validate the file list and classify its single entry
    ///
    /// Runs before any request is made.
    pub(crate) fn file_reference(&self) -> WebexResult<Option<FileReference>> {
        match self.files.as_slice() {
            [] => Ok(None),
            [file] => FileReference::classify(file).map(Some),
            files => Err(WebexError::Validation(ValidationError::TooManyFiles {
                count: files.len(),
            })),
        }
    }

    /// Body fields with absent values omitted and cards serialized
    pub fn to_post_data(&self) -> WebexResult<RequestParameters> {
        let mut post_data = RequestParameters::new()
            .with("roomId", self.room_id.as_deref())
            .with("toPersonId", self.to_person_id.as_deref())
            .with("toPersonEmail", self.to_person_email.as_deref())
            .with("text", self.text.as_deref())
            .with("markdown", self.markdown.as_deref())
            .with("parentId", self.parent_id.as_deref());

        if !self.files.is_empty() {
            post_data.insert("files", self.files.clone());
        }

        if !self.attachments.is_empty() {
            let attachments = self
                .attachments
                .iter()
                .map(Attachment::to_wire)
                .collect::<WebexResult<Vec<_>>>()?;
            post_data.insert("attachments", attachments);
        }

        post_data.extend_extra(self.extra.clone());
        Ok(post_data)
    }
}

pub(crate) fn require_id(name: &'static str, value: &str) -> WebexResult<()> {
    if value.trim().is_empty() {
        return Err(WebexError::Validation(ValidationError::EmptyIdentifier { name }));
    }
    Ok(())
}
