//! Error category classification.
//!
//! Categories decide how a failure is surfaced: transport and server errors
//! become an in-conversation message with an error cue, configuration errors
//! abort startup.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The answer source could not be reached (connection, DNS, timeout).
    Network,

    /// The answer source answered with a non-success status.
    Server,

    /// Invalid or unparseable configuration.
    Configuration,

    /// Local filesystem or OS errors.
    System,
}

impl ErrorCategory {
    /// Whether the failure belongs to a single conversation turn, as opposed
    /// to one that stops the client from running at all.
    pub fn is_turn_scoped(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::System => "system",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_scoped() {
        assert!(ErrorCategory::Network.is_turn_scoped());
        assert!(ErrorCategory::Server.is_turn_scoped());
        assert!(!ErrorCategory::Configuration.is_turn_scoped());
        assert!(!ErrorCategory::System.is_turn_scoped());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCategory::Network.to_string(), "network");
        assert_eq!(ErrorCategory::Configuration.to_string(), "configuration");
    }
}
