//! Integration tests for the messages resource

use super::*;
use futures::TryStreamExt;
use serde_json::json;
use webex_client::fixtures::{error_fixtures, message_fixtures};
use webex_client::services::messages::{
    CreateMessageRequest, ListMessagesRequest, MessagesServiceTrait,
};
use webex_client::types::AdaptiveCard;
use wiremock::matchers::{body_json, body_string_contains, header_regex, query_param};

#[tokio::test]
async fn test_create_message_json_body() {
    let server = setup_mock_server().await;

    mock_with_auth("/v1/messages", "POST")
        .and(header_regex("content-type", "^application/json"))
        .and(body_json(json!({"roomId": "R1", "markdown": "**hello**"})))
        .respond_with(success_response(message_fixtures::markdown("M1", "**hello**")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let message = client
        .messages()
        .create(CreateMessageRequest::to_room("R1").markdown("**hello**"))
        .await
        .unwrap();

    assert_eq!(message.id, "M1");
    assert_eq!(message.markdown.as_deref(), Some("**hello**"));
}

#[tokio::test]
async fn test_create_message_with_card() {
    let server = setup_mock_server().await;

    mock_with_auth("/v1/messages", "POST")
        .and(body_string_contains("application/vnd.microsoft.card.adaptive"))
        .respond_with(success_response(message_fixtures::with_card("M1")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
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
}

#[tokio::test]
async fn test_create_message_multipart_upload() {
    let server = setup_mock_server().await;
    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("notes.txt");
    std::fs::write(&file_path, "meeting notes").unwrap();

    mock_with_auth("/v1/messages", "POST")
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .and(body_string_contains(r#"name="files"; filename="notes.txt""#))
        .and(body_string_contains("meeting notes"))
        .and(body_string_contains(r#"name="roomId""#))
        .respond_with(success_response(message_fixtures::simple("M1", "notes")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let message = client
        .messages()
        .create(
            CreateMessageRequest::to_room("R1")
                .text("notes")
                .file(file_path.to_str().unwrap()),
        )
        .await
        .unwrap();

    assert_eq!(message.id, "M1");
}

#[tokio::test]
async fn test_list_messages_follows_link_header() {
    let server = setup_mock_server().await;
    let next = format!("{}/v1/messages?roomId=R1&max=2&cursor=abc", server.uri());

    mock_with_auth("/v1/messages", "GET")
        .and(query_param("cursor", "abc"))
        .respond_with(success_response(json!({
            "items": message_fixtures::page(&["M3"])
        })))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    mock_with_auth("/v1/messages", "GET")
        .and(query_param("roomId", "R1"))
        .and(query_param("max", "2"))
        .respond_with(
            success_response(json!({ "items": message_fixtures::page(&["M1", "M2"]) }))
                .insert_header("Link", format!("<{}>; rel=\"next\"", next).as_str()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let messages: Vec<_> = client
        .messages()
        .list(ListMessagesRequest::new("R1").max(2))
        .unwrap()
        .stream()
        .try_collect()
        .await
        .unwrap();

    let ids: Vec<_> = messages.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["M1", "M2", "M3"]);
}

#[tokio::test]
async fn test_get_message_not_found() {
    let server = setup_mock_server().await;

    mock_with_auth("/v1/messages/missing", "GET")
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(error_fixtures::not_found("ROUTER_404"))
                .insert_header("trackingid", "ROUTER_404"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = client.messages().get("missing").await.unwrap_err();

    assert!(error.is_not_found());
    assert!(error.to_string().contains("ROUTER_404"));
}

#[tokio::test]
async fn test_delete_message() {
    let server = setup_mock_server().await;

    mock_with_auth("/v1/messages/M1", "DELETE")
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.messages().delete("M1").await.unwrap();
}

#[tokio::test]
async fn test_rate_limit_surfaces_retry_after() {
    let server = setup_mock_server().await;

    mock_with_auth("/v1/messages/M1", "GET")
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = client.messages().get("M1").await.unwrap_err();

    assert_eq!(error.retry_after(), Some(std::time::Duration::from_secs(30)));
}
