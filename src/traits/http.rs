//! HTTP transport seam.
//!
//! The answer source only needs a blocking-style request/response exchange,
//! so the trait exposes a single `post` returning a fully buffered
//! [`Response`]. Production uses [`ReqwestHttpClient`]; tests use
//! [`MockHttpClient`].
//!
//! [`ReqwestHttpClient`]: crate::adapters::ReqwestHttpClient
//! [`MockHttpClient`]: crate::adapters::MockHttpClient

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;

/// Header name to value.
pub type Headers = HashMap<String, String>;

/// A buffered HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: Headers,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: u16, body: Bytes) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body,
        }
    }

    pub fn with_headers(status: u16, headers: Headers, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Look up a header by name, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The `Content-Type` header, or an empty string when absent.
    pub fn content_type(&self) -> &str {
        self.header("content-type").unwrap_or("")
    }
}

/// Failure to obtain any response at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpError {
    ConnectionFailed(String),
    Timeout(String),
    InvalidUrl(String),
    /// Body could not be read after the status line arrived.
    Io(String),
    Other(String),
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            HttpError::Timeout(msg) => write!(f, "Request timeout: {}", msg),
            HttpError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            HttpError::Io(msg) => write!(f, "IO error: {}", msg),
            HttpError::Other(msg) => write!(f, "HTTP error: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

/// Request/response HTTP operations.
///
/// Non-2xx statuses are returned as a normal [`Response`]; only transport
/// failures are errors.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// POST `body` verbatim; callers set `Content-Type` in `headers`.
    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_is_success() {
        assert!(Response::new(200, Bytes::new()).is_success());
        assert!(Response::new(204, Bytes::new()).is_success());
        assert!(!Response::new(302, Bytes::new()).is_success());
        assert!(!Response::new(404, Bytes::new()).is_success());
        assert!(!Response::new(500, Bytes::new()).is_success());
    }

    #[test]
    fn test_response_text_is_lossy() {
        let response = Response::new(200, Bytes::from_static(b"ok \xff"));
        assert_eq!(response.text(), "ok \u{fffd}");
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let mut headers = HashMap::new();
        headers.insert(
            "Content-Type".to_string(),
            "Application/JSON; charset=utf-8".to_string(),
        );
        let response = Response::with_headers(200, headers, Bytes::from("{}"));
        assert_eq!(
            response.header("content-type"),
            Some("Application/JSON; charset=utf-8")
        );
        assert_eq!(response.content_type(), "Application/JSON; charset=utf-8");
        assert_eq!(Response::new(200, Bytes::new()).content_type(), "");
    }

    #[test]
    fn test_http_error_display() {
        assert_eq!(
            HttpError::ConnectionFailed("refused".to_string()).to_string(),
            "Connection failed: refused"
        );
        assert_eq!(
            HttpError::Timeout("60s".to_string()).to_string(),
            "Request timeout: 60s"
        );
        assert_eq!(
            HttpError::Other("boom".to_string()).to_string(),
            "HTTP error: boom"
        );
    }
}
