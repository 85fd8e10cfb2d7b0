//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use retrochat::adapters::mock::{RecordingSink, StaticAnswers};
use retrochat::app::{App, AppMessage};
use retrochat::sfx::Sfx;
use retrochat::typewriter::TypewriterConfig;
use tokio::sync::mpsc::UnboundedReceiver;

/// An answer long enough to offer a skip.
pub const LONG_ANSWER: &str = "Retrieval augmented generation looks up passages from your own \
documents, adds them to the prompt, and asks the model to answer using only that context, \
which keeps replies grounded and lets you cite the source pages.";

/// App wired to scripted answers and a recording sound sink.
pub fn test_app(answers: StaticAnswers) -> (App, RecordingSink, UnboundedReceiver<AppMessage>) {
    let sink = RecordingSink::new();
    let mut app = App::new(
        Arc::new(answers),
        TypewriterConfig::default(),
        Sfx::new(Arc::new(sink.clone()), true),
        "test-session",
    );
    let rx = app.message_rx.take().expect("receiver present");
    (app, sink, rx)
}

/// Feed messages to the app until `done` holds. Panics if the channel stays
/// quiet for a simulated minute.
pub async fn pump_until<F>(app: &mut App, rx: &mut UnboundedReceiver<AppMessage>, done: F)
where
    F: Fn(&App) -> bool,
{
    while !done(app) {
        let message = tokio::time::timeout(Duration::from_secs(60), rx.recv())
            .await
            .expect("app message before timeout")
            .expect("channel open");
        app.handle_message(message);
    }
}

/// Type `text` into the input and press Enter.
pub fn ask(app: &mut App, text: &str) {
    app.input = text.to_string();
    app.send();
}
