//! `--version` and `--help` output.

use crate::config::{
    ENV_API_BASE, ENV_LOG, ENV_MOCK_LATENCY_MS, ENV_MOCK_PORT, ENV_REQUEST_TIMEOUT_SECS,
    ENV_SFX_PLAYER, ENV_TYPE_INTERVAL_MS, ENV_TYPE_MAX, ENV_TYPE_MIN, ENV_USE_MOCKS,
};

/// Crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version_line() -> String {
    format!("retrochat {}", VERSION)
}

/// Usage text listing flags, keys and environment variables.
pub fn help_text() -> String {
    let env_vars = [
        (ENV_API_BASE, "chat webhook base URL"),
        (ENV_USE_MOCKS, "serve answers from the built-in mock"),
        (ENV_MOCK_PORT, "mock server port"),
        (ENV_MOCK_LATENCY_MS, "mock answer delay"),
        (ENV_REQUEST_TIMEOUT_SECS, "chat request timeout"),
        (ENV_TYPE_MIN, "smallest reveal chunk"),
        (ENV_TYPE_MAX, "largest reveal chunk"),
        (ENV_TYPE_INTERVAL_MS, "base delay between chunks"),
        (ENV_SFX_PLAYER, "command that plays WAV from stdin"),
        (ENV_LOG, "log filter, e.g. retrochat=debug"),
    ];

    let mut out = format!(
        "{}\n\nUSAGE:\n    retrochat [--mock | --version | --help]\n\n\
         FLAGS:\n    --mock        run only the mock chat server\n    \
         -V, --version print version\n    -h, --help    print this help\n\n\
         KEYS:\n    Enter send   Tab/Esc skip   F2 toggle sound   Ctrl+C quit\n\n\
         ENVIRONMENT:\n",
        version_line()
    );
    for (name, what) in env_vars {
        out.push_str(&format!("    {:<30} {}\n", name, what));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_format() {
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
        assert!(version_line().starts_with("retrochat "));
    }

    #[test]
    fn test_help_lists_flags_and_env() {
        let help = help_text();
        assert!(help.contains("--mock"));
        assert!(help.contains(ENV_API_BASE));
        assert!(help.contains(ENV_SFX_PLAYER));
    }
}
