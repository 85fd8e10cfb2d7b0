//! Error types for retrochat.
//!
//! - [`ChatError`]: everything the library can fail with
//! - [`ConfigError`]: invalid environment configuration
//! - [`ErrorCategory`]: coarse classification used by the app to decide
//!   between an in-conversation error message and aborting startup
//!
//! The typewriter itself has no error type: it cannot fail.

mod category;

pub use category::ErrorCategory;

use crate::traits::HttpError;

/// Type alias for Results using [`ChatError`].
pub type ChatResult<T> = Result<T, ChatError>;

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable held something that could not be parsed.
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

/// Unified error type for retrochat.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// The request never produced a response.
    #[error("{0}")]
    Transport(#[from] HttpError),

    /// The answer source replied with a non-2xx status.
    #[error("HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// The mock server could not bind or serve.
    #[error("server error: {0}")]
    Server(String),
}

impl ChatError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ChatError::Transport(_) => ErrorCategory::Network,
            ChatError::HttpStatus { .. } => ErrorCategory::Server,
            ChatError::Config(_) => ErrorCategory::Configuration,
            ChatError::Storage(_) | ChatError::Server(_) => ErrorCategory::System,
        }
    }

    /// Text shown to the user after the `Error: ` prefix.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// True when the answer source failed, as opposed to local trouble.
    pub fn is_transport(&self) -> bool {
        matches!(self, ChatError::Transport(_) | ChatError::HttpStatus { .. })
    }
}
