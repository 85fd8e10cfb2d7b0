//! Conversation entries and the messages background tasks send to the app.

use crate::typewriter::RevealOutcome;

/// Who wrote a conversation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Who {
    User,
    Bot,
    /// Client-generated notices such as errors.
    System,
}

/// One entry in the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub who: Who,
    pub text: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            who: Who::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            who: Who::Bot,
            text: text.into(),
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self {
            who: Who::System,
            text: text.into(),
        }
    }
}

/// Messages from background tasks to the main loop.
///
/// Every variant carries the turn it belongs to; the app drops anything
/// from a turn other than the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMessage {
    /// The answer source returned the full answer.
    AnswerReady { turn: u64, answer: String },
    /// The typewriter revealed more of the answer.
    RevealUpdate { turn: u64, partial: String },
    /// The typewriter finished or was stopped.
    RevealFinished { turn: u64, outcome: RevealOutcome },
    /// The answer source failed; `error` is user-facing.
    AnswerFailed { turn: u64, error: String },
}

impl AppMessage {
    pub fn turn(&self) -> u64 {
        match self {
            AppMessage::AnswerReady { turn, .. }
            | AppMessage::RevealUpdate { turn, .. }
            | AppMessage::RevealFinished { turn, .. }
            | AppMessage::AnswerFailed { turn, .. } => *turn,
        }
    }
}
