//! RetroChat - a retro terminal chat client that types its answers out.
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod mock_server;
pub mod session;
pub mod sfx;
pub mod terminal;
pub mod traits;
pub mod typewriter;
pub mod ui;
