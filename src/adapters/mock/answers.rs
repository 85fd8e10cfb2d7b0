//! Scripted answer source.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{ChatError, ChatResult};
use crate::traits::{AnswerSource, HttpError};

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum Scripted {
    Answer(String),
    Status(u16),
    Transport(HttpError),
}

/// Answer source that pops replies off a script and logs what it was asked.
#[derive(Debug, Clone, Default)]
pub struct StaticAnswers {
    script: Arc<Mutex<VecDeque<Scripted>>>,
    asked: Arc<Mutex<Vec<(String, String)>>>,
}

impl StaticAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(self, reply: Scripted) -> Self {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(reply);
        self
    }

    pub fn then_answer(self, text: &str) -> Self {
        self.then(Scripted::Answer(text.to_string()))
    }

    /// `(question, session_id)` pairs in the order they arrived.
    pub fn asked(&self) -> Vec<(String, String)> {
        self.asked
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl AnswerSource for StaticAnswers {
    async fn ask(&self, question: &str, session_id: &str) -> ChatResult<String> {
        self.asked
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((question.to_string(), session_id.to_string()));

        let next = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        match next {
            Some(Scripted::Answer(text)) => Ok(text),
            Some(Scripted::Status(status)) => Err(ChatError::HttpStatus { status }),
            Some(Scripted::Transport(err)) => Err(ChatError::Transport(err)),
            None => Err(ChatError::Transport(HttpError::Other(
                "script exhausted".to_string(),
            ))),
        }
    }
}
