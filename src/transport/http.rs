use super::{Method, OutgoingRequest, RawResponse, Transport, TransportError, USER_TOKEN_HEADER};
use crate::config::PixelaConfig;
use crate::Result;
use async_trait::async_trait;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::Proxy;
use std::time::Instant;
use tracing::{debug, info, warn};

/// reqwest-backed transport. I/O runs on the caller's tokio runtime.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &PixelaConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(Some(config.pool_idle_timeout))
            .user_agent(concat!("pixela-rust/", env!("CARGO_PKG_VERSION")));

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                crate::Error::configuration(format!("Invalid proxy URL {}: {}", proxy_url, e))
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| crate::Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self { client })
    }

    /// Wrap an already configured reqwest client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: OutgoingRequest) -> Result<RawResponse> {
        let OutgoingRequest {
            method,
            url,
            token,
            body,
            request_id,
        } = request;

        debug!(
            request_id = request_id.as_str(),
            method = method.as_str(),
            path = url.path(),
            has_body = body.is_some(),
            "pixela request dispatched"
        );

        let mut req = match method {
            Method::Get => self.client.get(url.clone()),
            Method::Post => self.client.post(url.clone()),
            Method::Put => self.client.put(url.clone()),
            Method::Delete => self.client.delete(url.clone()),
        };

        if let Some(token) = &token {
            req = req.header(USER_TOKEN_HEADER, token);
        }

        req = match body {
            Some(body) => req.header(CONTENT_TYPE, "application/json").body(body),
            // The service rejects body-less POST/PUT without an explicit length.
            None if matches!(method, Method::Post | Method::Put) => req.header(CONTENT_LENGTH, "0"),
            None => req,
        };

        let start = Instant::now();
        let resp = req
            .send()
            .await
            .map_err(|e| crate::Error::Transport(TransportError::Http(e)))?;

        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        // Raw bytes: no charset sniffing and no BOM stripping.
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| crate::Error::Transport(TransportError::Http(e)))?;
        let body = String::from_utf8(bytes.to_vec()).map_err(|e| {
            warn!(
                request_id = request_id.as_str(),
                http_status = status,
                "response body is not valid UTF-8"
            );
            crate::Error::Transport(TransportError::InvalidBody(e))
        })?;

        info!(
            request_id = request_id.as_str(),
            method = method.as_str(),
            path = url.path(),
            http_status = status,
            duration_ms = start.elapsed().as_millis() as u64,
            "pixela request completed"
        );

        Ok(RawResponse {
            status,
            body,
            content_type,
        })
    }
}
