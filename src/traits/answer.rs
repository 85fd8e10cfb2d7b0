//! Answer source seam.

use async_trait::async_trait;

use crate::error::ChatResult;

/// Something that turns a question into a complete answer.
///
/// The app only needs the final string; whether it came from a webhook, a
/// local mock or a test stub is irrelevant to the typewriter.
#[async_trait]
pub trait AnswerSource: Send + Sync {
    /// Ask `question` within the conversation identified by `session_id`.
    async fn ask(&self, question: &str, session_id: &str) -> ChatResult<String>;
}
