//! The built-in mock endpoint, end to end over HTTP.

use std::net::SocketAddr;
use std::time::Duration;

use retrochat::adapters::ReqwestHttpClient;
use retrochat::client::ChatClient;
use retrochat::mock_server::{api_base, start_mock_server, start_mock_server_on, PARAGRAPHS};

async fn start() -> (tokio::task::JoinHandle<()>, SocketAddr) {
    let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
    start_mock_server_on(addr, Duration::from_millis(10))
        .await
        .expect("Failed to start mock server")
}

#[tokio::test]
async fn test_chat_client_talks_to_mock() {
    let (handle, addr) = start().await;
    let client = ChatClient::new(ReqwestHttpClient::new(), format!("http://{}/api", addr));

    let answer = client.ask("what is rag?", "abcdefgh-1234").await.unwrap();

    assert!(answer.starts_with(PARAGRAPHS[0]));
    assert!(answer.contains(PARAGRAPHS[1]));
    assert!(answer.ends_with("(session abcdefgh…)"));
    handle.abort();
}

#[tokio::test]
async fn test_port_zero_uses_bound_address() {
    let (handle, addr) = start_mock_server(0, Duration::from_millis(10))
        .await
        .expect("Failed to start mock server");
    assert_ne!(addr.port(), 0);

    let base = api_base(addr);
    assert_eq!(base, format!("http://127.0.0.1:{}/api", addr.port()));
    let client = ChatClient::new(ReqwestHttpClient::new(), base);
    let answer = client.ask("still there?", "").await.unwrap();

    assert!(answer.starts_with(PARAGRAPHS[0]));
    handle.abort();
}

#[tokio::test]
async fn test_malformed_body_still_answers() {
    let (handle, addr) = start().await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/api/chat", addr))
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    let output = body["output"].as_str().unwrap();
    assert!(output.starts_with(PARAGRAPHS[0]));
    assert!(!output.contains("(session"));
    handle.abort();
}

#[tokio::test]
async fn test_cors_preflight_is_allowed() {
    let (handle, addr) = start().await;

    let response = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, format!("http://{}/api/chat", addr))
        .header("Origin", "http://example.test")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    handle.abort();
}

#[tokio::test]
async fn test_busy_port_is_an_error() {
    let (handle, addr) = start().await;
    assert!(start_mock_server_on(addr, Duration::ZERO).await.is_err());
    handle.abort();
}
