//! Local stand-in for the chat webhook.
//!
//! Serves `POST /api/chat` with a canned answer about retrieval-augmented
//! generation after an artificial delay, so the client can be developed
//! without the real backend. Enabled with `RETROCHAT_USE_MOCKS=true` or run on
//! its own with `retrochat --mock`.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{extract::State, response::Json, routing::post, Router};
use rand::Rng;
use serde_json::{json, Value};
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};

use crate::error::{ChatError, ChatResult};

/// Canned answer paragraphs; each reply uses the first two or three.
pub const PARAGRAPHS: [&str; 3] = [
    "Retrieval‑augmented generation blends information retrieval with text generation. By retrieving relevant passages from your private corpus and grounding the model on that context, you reduce hallucinations and make answers traceable to sources.",
    "A practical pipeline starts with chunking documents into overlapping segments, embedding those chunks, and storing vectors in a similarity search index. At query time, you embed the question, search for top‑k neighbors, and compose a prompt that cites the retrieved evidence.",
    "Quality hinges on sensible chunk sizes, overlap, and a clean prompt that instructs the model to use only the provided context. Adding metadata like file path and page ranges enables richer citations and easier maintenance of the index.",
];

#[derive(Debug, Clone)]
struct MockState {
    latency: Duration,
}

/// Build the canned answer from the first `paragraphs` paragraphs, tagged
/// with the first eight characters of `session_id` when one was sent.
pub fn mock_answer(paragraphs: usize, session_id: &str) -> String {
    let mut answer = PARAGRAPHS[..paragraphs.min(PARAGRAPHS.len())].join("\n\n");
    if !session_id.is_empty() {
        let short: String = session_id.chars().take(8).collect();
        answer.push_str(&format!("\n\n(session {}…)", short));
    }
    answer
}

/// Router with the mock chat route and permissive CORS.
pub fn router(latency: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chat", post(chat_handler))
        .layer(cors)
        .with_state(MockState { latency })
}

/// Chat client base URL for a mock server bound to `addr`.
pub fn api_base(addr: SocketAddr) -> String {
    format!("http://{}/api", addr)
}

/// Start the mock server on `127.0.0.1:{port}`.
pub async fn start_mock_server(
    port: u16,
    latency: Duration,
) -> ChatResult<(JoinHandle<()>, SocketAddr)> {
    start_mock_server_on(SocketAddr::from(([127, 0, 0, 1], port)), latency).await
}

/// Start the mock server on `addr`. Port 0 picks a free port; the bound
/// address is returned.
pub async fn start_mock_server_on(
    addr: SocketAddr,
    latency: Duration,
) -> ChatResult<(JoinHandle<()>, SocketAddr)> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ChatError::Server(format!("bind {}: {}", addr, e)))?;
    let actual_addr = listener
        .local_addr()
        .map_err(|e| ChatError::Server(e.to_string()))?;

    tracing::info!("Mock chat server listening on http://{}", actual_addr);

    let app = router(latency);
    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("Mock chat server error: {}", e);
        }
    });

    Ok((handle, actual_addr))
}

/// Body is read raw so malformed JSON still gets an answer.
async fn chat_handler(State(state): State<MockState>, body: String) -> Json<Value> {
    let session_id = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("session_id")?.as_str().map(str::to_string))
        .unwrap_or_default();

    tokio::time::sleep(state.latency).await;

    let paragraphs = rand::thread_rng().gen_range(2..=3);
    tracing::debug!(paragraphs, session = %session_id, "mock answer");
    Json(json!({ "output": mock_answer(paragraphs, &session_id) }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_answer_without_session() {
        let answer = mock_answer(2, "");
        assert_eq!(answer, format!("{}\n\n{}", PARAGRAPHS[0], PARAGRAPHS[1]));
    }

    #[test]
    fn test_mock_answer_with_session() {
        let answer = mock_answer(3, "0123456789abcdef");
        assert!(answer.starts_with(PARAGRAPHS[0]));
        assert!(answer.contains(PARAGRAPHS[2]));
        assert!(answer.ends_with("\n\n(session 01234567…)"));
    }

    #[test]
    fn test_mock_answer_clamps_paragraphs() {
        assert_eq!(mock_answer(10, ""), PARAGRAPHS.join("\n\n"));
    }
}
