//! Process-wide configuration.
//!
//! Everything is read from `RETROCHAT_*` environment variables. Use the
//! builder methods to override values in tests.
//!
//! ```ignore
//! use retrochat::config::ChatConfig;
//!
//! let config = ChatConfig::from_env()?.with_use_mocks(true);
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::typewriter::TypewriterConfig;

pub const DEFAULT_API_BASE: &str = "http://localhost:5678/webhook";
pub const DEFAULT_MOCK_PORT: u16 = 5173;
pub const DEFAULT_MOCK_LATENCY: Duration = Duration::from_millis(600);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_LOG_FILTER: &str = "retrochat=info";

/// Directory under the home directory holding session, prefs and logs.
pub const DATA_DIR_NAME: &str = ".retrochat";

pub const ENV_API_BASE: &str = "RETROCHAT_API_BASE";
pub const ENV_TYPE_MIN: &str = "RETROCHAT_TYPE_MIN";
pub const ENV_TYPE_MAX: &str = "RETROCHAT_TYPE_MAX";
pub const ENV_TYPE_INTERVAL_MS: &str = "RETROCHAT_TYPE_INTERVAL_MS";
pub const ENV_USE_MOCKS: &str = "RETROCHAT_USE_MOCKS";
pub const ENV_MOCK_LATENCY_MS: &str = "RETROCHAT_MOCK_LATENCY_MS";
pub const ENV_MOCK_PORT: &str = "RETROCHAT_MOCK_PORT";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "RETROCHAT_REQUEST_TIMEOUT_SECS";
pub const ENV_SFX_PLAYER: &str = "RETROCHAT_SFX_PLAYER";
pub const ENV_LOG: &str = "RETROCHAT_LOG";

/// `~/.retrochat`, if a home directory exists.
pub fn data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DATA_DIR_NAME))
}

/// Configuration for the chat client.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfig {
    /// Base URL of the answer source; questions go to `{api_base}/chat`.
    pub api_base: String,
    pub typewriter: TypewriterConfig,
    /// Run the built-in mock server and point the client at it.
    pub use_mocks: bool,
    pub mock_latency: Duration,
    pub mock_port: u16,
    pub request_timeout: Duration,
    /// External player command for sound cues, e.g. `aplay -q -`.
    /// When unset the terminal bell is used.
    pub sfx_player: Option<String>,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            typewriter: TypewriterConfig::default(),
            use_mocks: false,
            mock_latency: DEFAULT_MOCK_LATENCY,
            mock_port: DEFAULT_MOCK_PORT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            sfx_player: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ChatConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let min = parse_or(&get, ENV_TYPE_MIN, defaults.typewriter.min_chunk())?;
        let max = parse_or(&get, ENV_TYPE_MAX, defaults.typewriter.max_chunk())?;
        let interval_ms = parse_or(
            &get,
            ENV_TYPE_INTERVAL_MS,
            defaults.typewriter.interval().as_millis() as u64,
        )?;
        let latency_ms = parse_or(
            &get,
            ENV_MOCK_LATENCY_MS,
            defaults.mock_latency.as_millis() as u64,
        )?;
        let timeout_secs = parse_or(
            &get,
            ENV_REQUEST_TIMEOUT_SECS,
            defaults.request_timeout.as_secs(),
        )?;

        Ok(Self {
            api_base: get(ENV_API_BASE).unwrap_or(defaults.api_base),
            typewriter: TypewriterConfig::new(min, max, Duration::from_millis(interval_ms)),
            use_mocks: get(ENV_USE_MOCKS).is_some_and(|v| v.eq_ignore_ascii_case("true")),
            mock_latency: Duration::from_millis(latency_ms),
            mock_port: parse_or(&get, ENV_MOCK_PORT, defaults.mock_port)?,
            request_timeout: Duration::from_secs(timeout_secs),
            sfx_player: get(ENV_SFX_PLAYER),
            log_filter: get(ENV_LOG).unwrap_or(defaults.log_filter),
        })
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_typewriter(mut self, typewriter: TypewriterConfig) -> Self {
        self.typewriter = typewriter;
        self
    }

    pub fn with_use_mocks(mut self, use_mocks: bool) -> Self {
        self.use_mocks = use_mocks;
        self
    }

    pub fn with_mock_latency(mut self, latency: Duration) -> Self {
        self.mock_latency = latency;
        self
    }

    pub fn with_mock_port(mut self, port: u16) -> Self {
        self.mock_port = port;
        self
    }

    /// Base URL the chat client should talk to. With mocks enabled this is
    /// the local mock server on the configured port, whose route lives under
    /// `/api`. Once the server is bound, prefer [`crate::mock_server::api_base`]
    /// with the actual address, which differs when the port is 0.
    pub fn effective_api_base(&self) -> String {
        if self.use_mocks {
            crate::mock_server::api_base(SocketAddr::from(([127, 0, 0, 1], self.mock_port)))
        } else {
            self.api_base.clone()
        }
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value,
        }),
    }
}
