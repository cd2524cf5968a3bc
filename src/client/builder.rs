use crate::client::core::PixelaClient;
use crate::codec::JsonCodec;
use crate::config::PixelaConfig;
use crate::pipeline::Pipeline;
use crate::transport::{HttpTransport, Transport};
use crate::{Error, ErrorContext, Result};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Builder for [`PixelaClient`].
///
/// Starts from [`PixelaConfig::default`]; call [`from_env`](Self::from_env)
/// to pick up `PIXELA_*` overrides.
pub struct PixelaClientBuilder {
    config: PixelaConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl PixelaClientBuilder {
    pub fn new() -> Self {
        Self {
            config: PixelaConfig::default(),
            transport: None,
        }
    }

    pub fn config(mut self, config: PixelaConfig) -> Self {
        self.config = config;
        self
    }

    /// Apply environment overrides to the current configuration.
    pub fn from_env(mut self) -> Self {
        self.config = self.config.merge_env();
        self
    }

    /// Service root, e.g. a mock server in tests.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn codec_threads(mut self, threads: usize) -> Self {
        self.config.codec_threads = threads.max(1);
        self
    }

    pub fn proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.config.proxy_url = Some(proxy_url.into());
        self
    }

    /// Replace the HTTP transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<PixelaClient> {
        let base_url = Url::parse(&self.config.base_url).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid base URL: {}", e),
                ErrorContext::new()
                    .with_field_path("base_url")
                    .with_details(self.config.base_url.clone()),
            )
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::configuration_with_context(
                "base URL cannot carry a path",
                ErrorContext::new()
                    .with_field_path("base_url")
                    .with_details(self.config.base_url.clone()),
            ));
        }

        let transport: Arc<dyn Transport> = match self.transport {
            Some(t) => t,
            None => Arc::new(HttpTransport::new(&self.config)?),
        };
        let codec = JsonCodec::new(self.config.codec_threads)?;

        Ok(PixelaClient {
            pipeline: Arc::new(Pipeline::new(base_url, transport, codec)),
            config: Arc::new(self.config),
        })
    }
}

impl Default for PixelaClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
