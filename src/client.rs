//! Answer source backed by an HTTP webhook.
//!
//! The webhook receives `{"question": ..., "session_id": ...}` on
//! `POST {api_base}/chat` and may answer in several shapes, see
//! [`extract_answer`].

use async_trait::async_trait;
use serde::Serialize;

use crate::adapters::ReqwestHttpClient;
use crate::error::{ChatError, ChatResult};
use crate::traits::{AnswerSource, Headers, HttpClient, HttpError, Response};

/// Body of a chat request.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChatRequest<'a> {
    pub question: &'a str,
    pub session_id: &'a str,
}

/// Client for the chat webhook.
#[derive(Debug, Clone)]
pub struct ChatClient<C: HttpClient = ReqwestHttpClient> {
    http: C,
    api_base: String,
}

impl<C: HttpClient> ChatClient<C> {
    pub fn new(http: C, api_base: impl Into<String>) -> Self {
        Self {
            http,
            api_base: api_base.into(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Endpoint questions are posted to.
    pub fn chat_url(&self) -> String {
        format!("{}/chat", self.api_base.trim_end_matches('/'))
    }

    /// Post `question` and return the complete answer text.
    ///
    /// Any non-2xx status is [`ChatError::HttpStatus`]; there is no retry.
    pub async fn ask(&self, question: &str, session_id: &str) -> ChatResult<String> {
        let body = serde_json::to_string(&ChatRequest {
            question,
            session_id,
        })
        .map_err(|e| HttpError::Other(e.to_string()))?;

        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        let url = self.chat_url();
        tracing::info!(url = %url, chars = question.chars().count(), "asking");

        let response = self.http.post(&url, &body, &headers).await.map_err(|e| {
            tracing::warn!(error = %e, "chat request failed");
            ChatError::from(e)
        })?;

        if !response.is_success() {
            tracing::warn!(status = response.status, "chat request rejected");
            return Err(ChatError::HttpStatus {
                status: response.status,
            });
        }

        let answer = extract_answer(&response);
        tracing::info!(chars = answer.chars().count(), "answer received");
        Ok(answer)
    }
}

#[async_trait]
impl<C: HttpClient> AnswerSource for ChatClient<C> {
    async fn ask(&self, question: &str, session_id: &str) -> ChatResult<String> {
        ChatClient::ask(self, question, session_id).await
    }
}

/// Pull the answer text out of a successful response.
///
/// JSON bodies (by content type) yield their string `output` field, else
/// their string `answer` field, else the JSON itself re-serialised; an
/// unparseable JSON body counts as `{}`. Anything else is returned as text.
pub fn extract_answer(response: &Response) -> String {
    let is_json = response
        .content_type()
        .to_ascii_lowercase()
        .contains("application/json");
    if !is_json {
        return response.text();
    }

    let data: serde_json::Value = response
        .json()
        .unwrap_or_else(|_| serde_json::Value::Object(Default::default()));
    let data = if data.is_null() {
        serde_json::Value::Object(Default::default())
    } else {
        data
    };

    for field in ["output", "answer"] {
        if let Some(text) = data.get(field).and_then(serde_json::Value::as_str) {
            return text.to_string();
        }
    }
    data.to_string()
}
