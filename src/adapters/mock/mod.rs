//! Test doubles for the trait seams.
//!
//! - [`MockHttpClient`] - canned HTTP responses plus a request log
//! - [`RecordingSink`] - remembers which cues were played
//! - [`StaticAnswers`] - answer source that replays a fixed script

pub mod answers;
pub mod http;
pub mod sound;

pub use answers::{Scripted, StaticAnswers};
pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use sound::{RecordingSink, SinkEvent};
