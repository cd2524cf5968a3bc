//! 传输层：将完整的请求发送到网络并返回原始响应。
//!
//! Transport layer: sends a fully formed request and yields the raw response.
//!
//! The transport never interprets a response. Status classification, envelope
//! inspection and body decoding all belong to [`crate::pipeline`].

mod http;

pub use http::HttpTransport;

use async_trait::async_trait;
use std::fmt;
use url::Url;

/// Header carrying the user token.
pub const USER_TOKEN_HEADER: &str = "X-USER-TOKEN";

/// HTTP methods spoken by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request ready to go on the wire.
#[derive(Debug, Clone)]
pub struct OutgoingRequest {
    pub method: Method,
    pub url: Url,
    pub token: Option<String>,
    /// Encoded JSON body. `None` means an empty body is sent.
    pub body: Option<String>,
    /// Client-side correlation id, used for log linkage only.
    pub request_id: String,
}

/// A response exactly as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
    pub content_type: Option<String>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn is_success_status(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests over the network.
///
/// Implementations must perform exactly one network exchange per call and
/// must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: OutgoingRequest) -> crate::Result<RawResponse>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Response body is not valid UTF-8: {0}")]
    InvalidBody(#[source] std::string::FromUtf8Error),

    #[error("Transport error: {0}")]
    Other(String),
}
