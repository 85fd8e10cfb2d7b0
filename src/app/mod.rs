//! Chat application state.
//!
//! One conversation turn goes: [`App::send`] posts the question on a
//! background task; [`AppMessage::AnswerReady`] starts a typewriter reveal
//! into a placeholder bot message; [`AppMessage::RevealUpdate`]s grow it;
//! [`AppMessage::RevealFinished`] ends the turn. Input is locked while a turn
//! is in flight, which is what keeps a single reveal per conversation.
//! Long answers can be skipped, see [`App::skip`].

mod handlers;
mod messages;

pub use messages::{AppMessage, Message, Who};

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::session::Preferences;
use crate::sfx::{Cue, Sfx};
use crate::traits::AnswerSource;
use crate::typewriter::{Typewriter, TypewriterConfig};

/// First message shown in a fresh conversation.
pub const WELCOME: &str = "Welcome, adventurer! Ask about your docs.";

/// Answers with more words than this offer a skip.
pub const SKIP_WORD_THRESHOLD: usize = 20;

/// A reveal the user may fast-forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipContext {
    /// Index of the bot message being typed.
    pub index: usize,
    pub full: String,
}

/// Main application state.
pub struct App {
    pub messages: Vec<Message>,
    pub input: String,
    /// A question is out or its answer is still being typed.
    pub busy: bool,
    pub should_quit: bool,
    pub sfx: Sfx,
    typewriter: Typewriter,
    answers: Arc<dyn AnswerSource>,
    session_id: String,
    prefs_path: Option<PathBuf>,
    turn: u64,
    /// Bot message currently receiving reveal updates.
    typing: Option<usize>,
    skip: Option<SkipContext>,
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("messages", &self.messages.len())
            .field("busy", &self.busy)
            .field("turn", &self.turn)
            .field("typing", &self.typing)
            .field("skip", &self.skip.is_some())
            .finish_non_exhaustive()
    }
}

impl App {
    /// Build the app. Typewriter hooks play the blip and chime cues through
    /// a clone of `sfx`, so toggling sound applies mid-reveal.
    pub fn new(
        answers: Arc<dyn AnswerSource>,
        typewriter_config: TypewriterConfig,
        sfx: Sfx,
        session_id: impl Into<String>,
    ) -> Self {
        let chunk_sfx = sfx.clone();
        let done_sfx = sfx.clone();
        let typewriter = Typewriter::new(typewriter_config)
            .on_chunk(move |_| chunk_sfx.play(Cue::Blip))
            .on_done(move || done_sfx.play(Cue::Chime));

        let (message_tx, message_rx) = mpsc::unbounded_channel();

        Self {
            messages: vec![Message::bot(WELCOME)],
            input: String::new(),
            busy: false,
            should_quit: false,
            sfx,
            typewriter,
            answers,
            session_id: session_id.into(),
            prefs_path: None,
            turn: 0,
            typing: None,
            skip: None,
            message_tx,
            message_rx: Some(message_rx),
        }
    }

    /// Persist the sound toggle to `path` whenever it changes.
    pub fn with_prefs_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.prefs_path = Some(path.into());
        self
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Index of the bot message being typed, if any.
    pub fn typing_index(&self) -> Option<usize> {
        self.typing
    }

    pub fn skip_context(&self) -> Option<&SkipContext> {
        self.skip.as_ref()
    }

    /// Whether the skip action should be offered.
    pub fn can_skip(&self) -> bool {
        self.busy && self.skip.is_some()
    }

    pub fn status_label(&self) -> &'static str {
        if self.busy {
            "Thinking…"
        } else {
            "Idle"
        }
    }

    /// Take the input as the next question.
    ///
    /// Returns `None` (and changes nothing) for blank input or while busy.
    /// Otherwise clears the input, plays the click, appends the question and
    /// an empty bot placeholder, and opens a new turn.
    pub fn submit(&mut self) -> Option<String> {
        let question = self.input.trim().to_string();
        if question.is_empty() || self.busy {
            return None;
        }

        self.input.clear();
        self.sfx.play(Cue::Click);
        self.messages.push(Message::user(question.clone()));
        self.messages.push(Message::bot(String::new()));
        self.typing = Some(self.messages.len() - 1);
        self.skip = None;
        self.busy = true;
        self.turn += 1;

        tracing::info!(turn = self.turn, "question submitted");
        Some(question)
    }

    /// Submit the input and ask the answer source in the background.
    pub fn send(&mut self) {
        if let Some(question) = self.submit() {
            self.spawn_ask(question);
        }
    }

    fn spawn_ask(&self, question: String) {
        let answers = Arc::clone(&self.answers);
        let tx = self.message_tx.clone();
        let session_id = self.session_id.clone();
        let turn = self.turn;

        tokio::spawn(async move {
            let message = match answers.ask(&question, &session_id).await {
                Ok(answer) => AppMessage::AnswerReady { turn, answer },
                Err(e) => AppMessage::AnswerFailed {
                    turn,
                    error: e.user_message(),
                },
            };
            let _ = tx.send(message);
        });
    }

    fn spawn_reveal(&self, turn: u64, answer: String) {
        let tx = self.message_tx.clone();
        let updates = self.message_tx.clone();

        // Start the reveal here so a skip issued before the task first runs
        // still cancels it.
        let reveal = self.typewriter.clone().into_reveal(answer, move |partial| {
            let _ = updates.send(AppMessage::RevealUpdate {
                turn,
                partial: partial.to_string(),
            });
        });

        tokio::spawn(async move {
            let outcome = reveal.await;
            let _ = tx.send(AppMessage::RevealFinished { turn, outcome });
        });
    }

    /// Fast-forward the current reveal: stop the typewriter, silence the
    /// cues and show the whole answer. Does nothing unless a skip is offered.
    pub fn skip(&mut self) {
        if !self.busy {
            return;
        }
        let Some(ctx) = self.skip.take() else {
            return;
        };

        self.typewriter.stop();
        self.sfx.stop_all();
        if let Some(message) = self.messages.get_mut(ctx.index) {
            message.text = ctx.full;
        }
        self.typing = None;
        self.busy = false;
        tracing::info!(turn = self.turn, "reveal skipped");
    }

    /// Flip sound cues and persist the choice.
    pub fn toggle_sfx(&mut self) {
        let enabled = self.sfx.toggle();
        if let Some(path) = &self.prefs_path {
            if let Err(e) = (Preferences {
                sfx_enabled: enabled,
            })
            .save_to(path)
            {
                tracing::warn!(error = %e, "could not save preferences");
            }
        }
    }

    pub fn quit(&mut self) {
        self.typewriter.stop();
        self.should_quit = true;
    }

    fn finish_turn(&mut self) {
        self.typing = None;
        self.skip = None;
        self.busy = false;
    }
}
