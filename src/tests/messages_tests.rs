//! Messages service tests.

use super::{client_with, client_with_config, test_config};
use crate::errors::{ValidationError, WebexError};
use crate::fixtures::{error_fixtures, message_fixtures};
use crate::mocks::{MockHttpTransport, MockResponse, RecordedBody};
use crate::services::messages::{CreateMessageRequest, ListMessagesRequest, MessagesServiceTrait};
use crate::types::{AdaptiveCard, Message};
use futures::TryStreamExt;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;

const NEXT_PAGE: &str = "https://webexapis.com/v1/messages?roomId=R1&max=2&cursor=abc";

fn ids(messages: &[Message]) -> Vec<&str> {
    messages.iter().map(|m| m.id.as_str()).collect()
}

#[tokio::test]
async fn test_list_is_lazy() {
    let mock = MockHttpTransport::new();
    let client = client_with(&mock);

    let _history = client.messages().list(ListMessagesRequest::new("R1")).unwrap();

    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_list_sends_query_params() {
    let mock = MockHttpTransport::new()
        .add_response(MockResponse::page(message_fixtures::page(&["M1"]), None));
    let client = client_with(&mock);

    let messages = client
        .messages()
        .list(ListMessagesRequest::new("R1").max(50))
        .unwrap()
        .collect()
        .await
        .unwrap();

    assert_eq!(ids(&messages), vec!["M1"]);
    let request = mock.last_request().unwrap();
    assert_eq!(request.method, "GET");
    assert_eq!(request.url, "https://webexapis.com/v1/messages");
    assert_eq!(request.query_param("roomId"), Some("R1"));
    assert_eq!(request.query_param("max"), Some("50"));
    assert_eq!(request.query.len(), 2);
}

#[tokio::test]
async fn test_list_follows_next_links() {
    let mock = MockHttpTransport::new()
        .add_response(MockResponse::page(message_fixtures::page(&["M1", "M2"]), Some(NEXT_PAGE)))
        .add_response(MockResponse::page(message_fixtures::page(&["M3"]), None));
    let client = client_with(&mock);

    let messages = client
        .messages()
        .list(ListMessagesRequest::new("R1").max(2))
        .unwrap()
        .collect()
        .await
        .unwrap();

    assert_eq!(ids(&messages), vec!["M1", "M2", "M3"]);

    let requests = mock.recorded_requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].url, NEXT_PAGE);
    assert!(requests[1].query.is_empty());
}

#[tokio::test]
async fn test_list_is_restartable() {
    let mock = MockHttpTransport::new().add_responses([
        MockResponse::page(message_fixtures::page(&["M1", "M2"]), Some(NEXT_PAGE)),
        MockResponse::page(message_fixtures::page(&["M3"]), None),
        MockResponse::page(message_fixtures::page(&["M1", "M2"]), Some(NEXT_PAGE)),
        MockResponse::page(message_fixtures::page(&["M3"]), None),
    ]);
    let client = client_with(&mock);
    let history = client.messages().list(ListMessagesRequest::new("R1").max(2)).unwrap();

    let first: Vec<Message> = history.stream().try_collect().await.unwrap();
    let second: Vec<Message> = history.stream().try_collect().await.unwrap();

    assert_eq!(ids(&first), ids(&second));

    let requests = mock.recorded_requests();
    assert_eq!(requests.len(), 4);
    assert_eq!(requests[0].url, requests[2].url);
    assert_eq!(requests[0].query, requests[2].query);
    assert_eq!(requests[1].url, requests[3].url);
}

#[tokio::test]
async fn test_list_streams_are_independent() {
    let mock = MockHttpTransport::new().add_responses([
        MockResponse::page(message_fixtures::page(&["M1"]), None),
        MockResponse::page(message_fixtures::page(&["M1"]), None),
    ]);
    let client = client_with(&mock);
    let history = client.messages().list(ListMessagesRequest::new("R1")).unwrap();

    let mut a = history.stream();
    let mut b = history.stream();

    assert_eq!(a.try_next().await.unwrap().unwrap().id, "M1");
    assert_eq!(b.try_next().await.unwrap().unwrap().id, "M1");
    assert!(a.try_next().await.unwrap().is_none());
    assert!(b.try_next().await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_error_on_later_page() {
    let mock = MockHttpTransport::new()
        .add_response(MockResponse::page(message_fixtures::page(&["M1"]), Some(NEXT_PAGE)))
        .add_response(MockResponse::api_error(500, "Internal Server Error"));
    let client = client_with(&mock);
    let history = client.messages().list(ListMessagesRequest::new("R1")).unwrap();

    let mut stream = history.stream();
    assert_eq!(stream.try_next().await.unwrap().unwrap().id, "M1");

    let error = stream.try_next().await.unwrap_err();
    assert_eq!(error.http_status(), Some(500));
}

#[tokio::test]
async fn test_list_empty_room_id() {
    let mock = MockHttpTransport::new();
    let client = client_with(&mock);

    let result = client.messages().list(ListMessagesRequest::new(""));

    assert!(matches!(
        result,
        Err(WebexError::Validation(ValidationError::EmptyIdentifier { name: "roomId" }))
    ));
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_create_json_message() {
    let mock = MockHttpTransport::new()
        .add_json_response(&message_fixtures::markdown("M1", "**hi**"));
    let client = client_with(&mock);

    let message = client
        .messages()
        .create(CreateMessageRequest::to_room("R1").markdown("**hi**"))
        .await
        .unwrap();

    assert_eq!(message.id, "M1");
    assert_eq!(message.content(), "**hi**");

    let request = mock.last_request().unwrap();
    assert_eq!(request.method, "POST");
    assert_eq!(request.url, "https://webexapis.com/v1/messages");
    assert_eq!(request.body, RecordedBody::Json(json!({"roomId": "R1", "markdown": "**hi**"})));
}

#[tokio::test]
async fn test_create_with_web_url_posts_json() {
    let file_url = "https://example.com/report.pdf";
    let mock = MockHttpTransport::new()
        .add_json_response(&message_fixtures::direct_with_file("M1", file_url));
    let client = client_with(&mock);

    let message = client
        .messages()
        .create(CreateMessageRequest::to_email("julie@example.com").file(file_url))
        .await
        .unwrap();

    assert!(message.has_files());
    let request = mock.last_request().unwrap();
    assert_eq!(
        request.body,
        RecordedBody::Json(json!({"toPersonEmail": "julie@example.com", "files": [file_url]}))
    );
}

#[tokio::test]
async fn test_create_with_local_file_posts_multipart() {
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    file.write_all(b"quarterly numbers").unwrap();
    let path = file.path().to_str().unwrap().to_string();
    let file_name = file.path().file_name().unwrap().to_str().unwrap().to_string();

    let mock = MockHttpTransport::new()
        .add_json_response(&message_fixtures::simple("M1", "see attached"));
    let client = client_with(&mock);

    client
        .messages()
        .create(CreateMessageRequest::to_room("R1").text("see attached").file(&path))
        .await
        .unwrap();

    let request = mock.last_request().unwrap();
    assert!(request.is_multipart());
    match request.body {
        RecordedBody::Multipart { fields, files } => {
            assert!(fields.contains(&("roomId".to_string(), "R1".to_string())));
            assert!(fields.contains(&("text".to_string(), "see attached".to_string())));
            assert!(fields.iter().all(|(name, _)| name != "files"));

            assert_eq!(files.len(), 1);
            assert_eq!(files[0].0, "files");
            assert_eq!(files[0].1, file_name);
            assert_eq!(&files[0].2[..], b"quarterly numbers");
        }
        other => panic!("expected multipart body, got {:?}", other),
    }
}

#[tokio::test]
async fn test_local_file_upload_drops_attachments() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let mock = MockHttpTransport::new().add_json_response(&message_fixtures::simple("M1", "x"));
    let client = client_with(&mock);

    client
        .messages()
        .create(
            CreateMessageRequest::to_room("R1")
                .text("x")
                .file(&path)
                .attachment(AdaptiveCard::new().text_block("Hi")),
        )
        .await
        .unwrap();

    match mock.last_request().unwrap().body {
        RecordedBody::Multipart { fields, .. } => {
            assert!(fields.iter().all(|(name, _)| name != "attachments"));
        }
        other => panic!("expected multipart body, got {:?}", other),
    }
}

#[tokio::test]
async fn test_local_file_upload_error_releases_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("upload.txt");
    std::fs::write(&path, b"draft").unwrap();

    let mock = MockHttpTransport::new()
        .add_response(MockResponse::api_error(500, "Internal Server Error"));
    let client = client_with(&mock);

    let error = client
        .messages()
        .create(CreateMessageRequest::to_room("R1").file(path.to_str().unwrap()))
        .await
        .unwrap_err();

    assert_eq!(error.http_status(), Some(500));
    match &error {
        WebexError::Api(api) => assert_eq!(api.message, "Internal Server Error"),
        other => panic!("expected API error, got {:?}", other),
    }

    let requests = mock.recorded_requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].is_multipart());

    #[cfg(unix)]
    {
        std::fs::remove_file(&path).unwrap();
        std::fs::write(&path, b"rewritten").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"rewritten");
    }
}

#[tokio::test]
async fn test_create_with_card_attachment() {
    let mock = MockHttpTransport::new().add_json_response(&message_fixtures::with_card("M1"));
    let client = client_with(&mock);

    let message = client
        .messages()
        .create(
            CreateMessageRequest::to_room("R1")
                .text("Card fallback")
                .attachment(AdaptiveCard::new().text_block("Hello")),
        )
        .await
        .unwrap();

    assert_eq!(message.attachments.len(), 1);

    let request = mock.last_request().unwrap();
    let RecordedBody::Json(body) = request.body else {
        panic!("expected JSON body");
    };
    assert_eq!(body["attachments"][0]["contentType"], "application/vnd.microsoft.card.adaptive");
    assert_eq!(body["attachments"][0]["content"]["body"][0]["text"], "Hello");
}

#[tokio::test]
async fn test_create_too_many_files() {
    let mock = MockHttpTransport::new();
    let client = client_with(&mock);

    let error = client
        .messages()
        .create(
            CreateMessageRequest::to_room("R1")
                .files(["https://example.com/a.png", "https://example.com/b.png"]),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        WebexError::Validation(ValidationError::TooManyFiles { count: 2 })
    ));
    assert!(error.to_string().contains("only one file"));
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_create_invalid_file_reference() {
    let mock = MockHttpTransport::new();
    let client = client_with(&mock);

    let error = client
        .messages()
        .create(CreateMessageRequest::to_room("R1").file("/definitely/not/here.png"))
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        WebexError::Validation(ValidationError::InvalidFileReference { .. })
    ));
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_get_message() {
    let mock = MockHttpTransport::new()
        .add_json_response(&message_fixtures::reply("M2", "M1", "agreed"));
    let client = client_with(&mock);

    let message = client.messages().get("M2").await.unwrap();

    assert_eq!(message.id, "M2");
    assert!(message.is_reply());
    let request = mock.last_request().unwrap();
    assert_eq!(request.method, "GET");
    assert_eq!(request.url, "https://webexapis.com/v1/messages/M2");
}

#[tokio::test]
async fn test_get_not_found() {
    let mock = MockHttpTransport::new().add_response(
        MockResponse::json(&error_fixtures::not_found("ROUTER_404")).with_status(404),
    );
    let client = client_with(&mock);

    let error = client.messages().get("missing").await.unwrap_err();

    assert!(error.is_not_found());
    match error {
        WebexError::Api(api) => {
            assert_eq!(api.status, 404);
            assert_eq!(api.message, "Unable to find message.");
            assert_eq!(api.tracking_id.as_deref(), Some("ROUTER_404"));
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_delete_message() {
    let mock = MockHttpTransport::new().add_response(MockResponse::no_content());
    let client = client_with(&mock);

    client.messages().delete("M1").await.unwrap();

    let request = mock.last_request().unwrap();
    assert_eq!(request.method, "DELETE");
    assert_eq!(request.url, "https://webexapis.com/v1/messages/M1");
    assert_eq!(request.body, RecordedBody::Empty);
}

#[tokio::test]
async fn test_empty_message_id() {
    let mock = MockHttpTransport::new();
    let client = client_with(&mock);

    assert!(matches!(
        client.messages().get("").await,
        Err(WebexError::Validation(ValidationError::EmptyIdentifier { name: "messageId" }))
    ));
    assert!(matches!(
        client.messages().delete("  ").await,
        Err(WebexError::Validation(ValidationError::EmptyIdentifier { name: "messageId" }))
    ));
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_bad_request_surfaces_description() {
    let mock = MockHttpTransport::new().add_response(
        MockResponse::json(&error_fixtures::bad_request("roomId is invalid")).with_status(400),
    );
    let client = client_with_config(&mock, test_config().wait_on_rate_limit(false));

    let error = client
        .messages()
        .create(CreateMessageRequest::to_room("bogus").text("hi"))
        .await
        .unwrap_err();

    assert_eq!(error.http_status(), Some(400));
    assert!(error.to_string().contains("roomId is invalid"));
}
