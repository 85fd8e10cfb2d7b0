//! The chat client against a wiremock webhook.

use std::time::Duration;

use retrochat::adapters::ReqwestHttpClient;
use retrochat::client::ChatClient;
use retrochat::error::{ChatError, ErrorCategory};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ChatClient {
    ChatClient::new(ReqwestHttpClient::new(), format!("{}/webhook", server.uri()))
}

#[tokio::test]
async fn test_posts_question_and_reads_output() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook/chat"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "question": "What is in my docs?",
            "session_id": "sess-1",
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"output": "Lots."})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let answer = client_for(&server)
        .ask("What is in my docs?", "sess-1")
        .await
        .unwrap();

    assert_eq!(answer, "Lots.");
}

#[tokio::test]
async fn test_answer_field_and_plain_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"answer": "via answer"})),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("just text"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.ask("a", "s").await.unwrap(), "via answer");
    assert_eq!(client.ask("b", "s").await.unwrap(), "just text");
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client_for(&server).ask("q", "s").await.unwrap_err();

    assert!(matches!(err, ChatError::HttpStatus { status: 500 }));
    assert_eq!(err.user_message(), "HTTP 500");
    assert_eq!(err.category(), ErrorCategory::Server);
}

#[tokio::test]
async fn test_timeout_is_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let http = ReqwestHttpClient::with_timeout(Duration::from_millis(100)).unwrap();
    let client = ChatClient::new(http, server.uri());

    let err = client.ask("q", "s").await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(err.category(), ErrorCategory::Network);
}

#[tokio::test]
async fn test_unreachable_host() {
    let client = ChatClient::new(ReqwestHttpClient::new(), "http://127.0.0.1:9");
    let err = client.ask("q", "s").await.unwrap_err();
    assert!(matches!(err, ChatError::Transport(_)));
}
