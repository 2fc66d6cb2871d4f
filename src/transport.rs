//! 传输层：请求构造与执行的抽象，默认实现基于 reqwest。
//!
//! HTTP transport collaborator.
//!
//! The client only knows how to build an [`HttpRequest`] and hand it to a
//! [`Transport`]. Connection management, authentication headers and timeouts
//! are the transport's business.

mod http;

pub use http::HttpTransport;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::Method;
use serde::Deserialize;
use uuid::Uuid;

/// Body encoding of an outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Encoding {
    Json,
}

impl Encoding {
    pub fn content_type(&self) -> &'static str {
        match self {
            Encoding::Json => "application/json",
        }
    }
}

/// A fully-built request, ready to be executed by a [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub encoding: Encoding,
    pub body: Bytes,
    /// Client-side correlation id, sent as `x-request-id`.
    pub request_id: String,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>, encoding: Encoding, body: Bytes) -> Self {
        Self {
            method,
            url: url.into(),
            encoding,
            body,
            request_id: Uuid::new_v4().to_string(),
        }
    }
}

/// Raw response as returned by a [`Transport`]; the status is not yet checked.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx response into [`TransportError::Status`].
    ///
    /// The OpenAI error envelope (`{"error": {"message", "type", "code"}}`) is
    /// decoded when present; otherwise the raw body becomes the message.
    pub fn error_for_status(self) -> Result<Self, TransportError> {
        if self.is_success() {
            return Ok(self);
        }

        let envelope = serde_json::from_slice::<ErrorEnvelope>(&self.body).ok();
        let (message, error_type, code) = match envelope {
            Some(ErrorEnvelope { error }) => (
                error.message.unwrap_or_default(),
                error.error_type,
                error.code.and_then(code_to_string),
            ),
            None => (String::from_utf8_lossy(&self.body).trim().to_string(), None, None),
        };

        Err(TransportError::Status {
            status: self.status,
            message,
            error_type,
            code,
        })
    }

    /// First non-empty value among the given header names.
    pub fn header_first(&self, names: &[&str]) -> Option<String> {
        for name in names {
            if let Some(v) = self.headers.get(*name) {
                if let Ok(s) = v.to_str() {
                    let s = s.trim();
                    if !s.is_empty() {
                        return Some(s.to_string());
                    }
                }
            }
        }
        None
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "type")]
    error_type: Option<String>,
    // Some providers send numeric codes.
    #[serde(default)]
    code: Option<serde_json::Value>,
}

fn code_to_string(code: serde_json::Value) -> Option<String> {
    match code {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Executes HTTP requests on behalf of the client.
///
/// Implementations must be safe to share across concurrent calls.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Build a request. The default is enough for every transport in this crate.
    fn new_request(&self, method: Method, url: &str, encoding: Encoding, body: Bytes) -> HttpRequest {
        HttpRequest::new(method, url, encoding, body)
    }

    /// Perform exactly one HTTP exchange.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Status {
        status: u16,
        message: String,
        error_type: Option<String>,
        code: Option<String>,
    },

    #[error("request cancelled")]
    Cancelled,

    #[error("request deadline exceeded")]
    DeadlineExceeded,

    #[error("Transport error: {0}")]
    Other(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl TransportError {
    /// Wrap an arbitrary underlying cause.
    pub fn other(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        TransportError::Other(err.into())
    }

    /// HTTP status for [`TransportError::Status`].
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            TransportError::Http(e) => e.is_timeout() || e.is_connect(),
            TransportError::Status { status, .. } => {
                matches!(*status, 408 | 409 | 429) || (500..=599).contains(status)
            }
            TransportError::DeadlineExceeded => true,
            TransportError::Cancelled | TransportError::Other(_) => false,
        }
    }
}
