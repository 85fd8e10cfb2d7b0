//! Trait abstractions for dependency injection and testability.
//!
//! - [`HttpClient`] - HTTP request/response operations
//! - [`AnswerSource`] - question in, complete answer out
//! - [`SoundSink`] - sound cue playback

pub mod answer;
pub mod http;
pub mod sound;

pub use answer::AnswerSource;
pub use http::{Headers, HttpClient, HttpError, Response};
pub use sound::SoundSink;
