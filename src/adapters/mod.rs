//! Concrete implementations of the seams in `crate::traits`.
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`TerminalBell`], [`PlayerCommandSink`], [`NullSink`] - sound sinks
//!
//! The [`mock`] submodule holds the test doubles.

pub mod mock;
pub mod reqwest_http;
pub mod sound;

pub use mock::{MockHttpClient, RecordingSink, StaticAnswers};
pub use reqwest_http::ReqwestHttpClient;
pub use sound::{NullSink, PlayerCommandSink, TerminalBell};
