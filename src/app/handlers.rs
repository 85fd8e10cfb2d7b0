//! Applying background messages and key presses to the app.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{App, AppMessage, Message, SkipContext, SKIP_WORD_THRESHOLD};
use crate::sfx::Cue;
use crate::typewriter::RevealOutcome;

impl App {
    /// Apply one message from a background task.
    pub fn handle_message(&mut self, message: AppMessage) {
        if message.turn() != self.turn {
            tracing::debug!(
                stale = message.turn(),
                current = self.turn,
                "dropping message from an old turn"
            );
            return;
        }

        match message {
            AppMessage::AnswerReady { turn, answer } => {
                self.skip = match self.typing {
                    Some(index) if answer.split_whitespace().count() > SKIP_WORD_THRESHOLD => {
                        Some(SkipContext {
                            index,
                            full: answer.clone(),
                        })
                    }
                    _ => None,
                };
                self.spawn_reveal(turn, answer);
            }
            AppMessage::RevealUpdate { partial, .. } => {
                // After a skip `typing` is cleared, so a chunk that was
                // already in flight lands nowhere.
                if let Some(message) = self.typing.and_then(|i| self.messages.get_mut(i)) {
                    message.text = partial;
                }
            }
            AppMessage::RevealFinished { outcome, .. } => {
                if self.typing.is_some() {
                    if outcome == RevealOutcome::Cancelled {
                        tracing::debug!(turn = self.turn, "reveal stopped without skip");
                    }
                    self.finish_turn();
                }
            }
            AppMessage::AnswerFailed { error, .. } => {
                tracing::warn!(turn = self.turn, error = %error, "answer failed");
                self.sfx.play(Cue::Buzz);
                if let Some(index) = self.typing {
                    if self.messages.get(index).is_some_and(|m| m.text.is_empty()) {
                        self.messages.remove(index);
                    }
                }
                self.messages.push(Message::system(format!("Error: {}", error)));
                self.finish_turn();
            }
        }
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => self.quit(),
            KeyCode::Char('s') if ctrl => self.toggle_sfx(),
            KeyCode::F(2) => self.toggle_sfx(),
            KeyCode::Tab | KeyCode::Esc => self.skip(),
            KeyCode::Enter => self.send(),
            KeyCode::Backspace if !self.busy => {
                self.input.pop();
            }
            KeyCode::Char(c)
                if !self.busy && !ctrl && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                self.input.push(c);
            }
            _ => {}
        }
    }

    /// Insert pasted text into the input, flattening newlines.
    pub fn handle_paste(&mut self, text: &str) {
        if self.busy {
            return;
        }
        self.input
            .extend(text.chars().map(|c| if c == '\n' || c == '\r' { ' ' } else { c }));
    }
}
