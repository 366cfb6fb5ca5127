//! Messages service implementation.

use super::requests::require_id;
use super::*;
use crate::errors::WebexResult;
use crate::factory::ObjectFactory;
use crate::pagination::Paginated;
use crate::session::RestSession;
use crate::transport::MultipartForm;
use crate::types::{FileReference, LocalFile, Message, RequestParameters};
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Resource path of the messages API
pub const API_ENDPOINT: &str = "messages";

/// Type tag handed to the object factory
pub const OBJECT_TYPE: &str = "message";

/// Trait for messages service operations
#[async_trait]
pub trait MessagesServiceTrait: Send + Sync {
    /// List the messages of a room, newest first
    ///
    /// Validates the request and returns a restartable paginated result;
    /// no request is made until it is streamed.
    fn list(&self, request: ListMessagesRequest) -> WebexResult<Paginated<Message>>;

    /// Post a message
    async fn create(&self, request: CreateMessageRequest) -> WebexResult<Message>;

    /// Get a message by ID
    async fn get(&self, message_id: &str) -> WebexResult<Message>;

    /// Delete a message by ID
    async fn delete(&self, message_id: &str) -> WebexResult<()>;
}

/// Messages service implementation
#[derive(Clone)]
pub struct MessagesService {
    session: Arc<dyn RestSession>,
    factory: Arc<dyn ObjectFactory<Message>>,
}

impl MessagesService {
    /// Create a new messages service
    pub fn new(session: Arc<dyn RestSession>, factory: Arc<dyn ObjectFactory<Message>>) -> Self {
        Self { session, factory }
    }

    fn item_path(message_id: &str) -> String {
        format!("{}/{}", API_ENDPOINT, message_id)
    }

    async fn post_with_local_file(
        &self,
        path: &Path,
        mut post_data: RequestParameters,
    ) -> WebexResult<Value> {
        post_data.remove("files");
        if post_data.remove("attachments").is_some() {
            warn!("Card attachments are not sent with a local file upload");
        }

        // Released on every exit path, including cancellation of this future.
        let mut local_file = LocalFile::open(path).await?;
        let upload = local_file.read_upload("files").await?;
        debug!(
            file_name = local_file.file_name(),
            size = upload.content.len(),
            "Posting message as multipart upload"
        );

        let form = post_data
            .to_form_fields()
            .into_iter()
            .fold(MultipartForm::new(), |form, (name, value)| form.field(name, value))
            .file(upload);

        let result = self.session.post_multipart(API_ENDPOINT, form).await;
        drop(local_file);
        result
    }
}

#[async_trait]
impl MessagesServiceTrait for MessagesService {
    #[instrument(skip(self, request), fields(room_id = %request.room_id))]
    fn list(&self, request: ListMessagesRequest) -> WebexResult<Paginated<Message>> {
        request.validate()?;

        let factory = self.factory.clone();
        Ok(Paginated::new(
            self.session.clone(),
            API_ENDPOINT,
            request.to_params(),
            move |item| factory.construct(OBJECT_TYPE, item),
        ))
    }

    #[instrument(skip(self, request), fields(room_id = ?request.room_id, files = request.files.len()))]
    async fn create(&self, request: CreateMessageRequest) -> WebexResult<Message> {
        let file = request.file_reference()?;
        let post_data = request.to_post_data()?;

        let json = match file {
            None | Some(FileReference::WebUrl(_)) => {
                debug!("Posting message as JSON");
                self.session.post_json(API_ENDPOINT, post_data.into_json()).await?
            }
            Some(FileReference::LocalFile(path)) => {
                self.post_with_local_file(&path, post_data).await?
            }
        };

        self.factory.construct(OBJECT_TYPE, json)
    }

    #[instrument(skip(self))]
    async fn get(&self, message_id: &str) -> WebexResult<Message> {
        require_id("messageId", message_id)?;

        let json = self.session.get(&Self::item_path(message_id), None).await?;
        self.factory.construct(OBJECT_TYPE, json)
    }

    #[instrument(skip(self))]
    async fn delete(&self, message_id: &str) -> WebexResult<()> {
        require_id("messageId", message_id)?;

        self.session.delete(&Self::item_path(message_id)).await
    }
}

impl std::fmt::Debug for MessagesService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessagesService")
            .field("endpoint", &API_ENDPOINT)
            .finish()
    }
}
