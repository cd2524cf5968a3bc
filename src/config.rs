//! Client configuration with environment overrides.

use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://pixe.la";

/// Runtime configuration for [`crate::PixelaClient`].
///
/// Defaults are production-friendly; every knob can be overridden from the
/// environment via [`PixelaConfig::from_env`]:
/// - `PIXELA_BASE_URL`
/// - `PIXELA_HTTP_TIMEOUT_SECS` (default 30)
/// - `PIXELA_HTTP_POOL_MAX_IDLE_PER_HOST` (default 8)
/// - `PIXELA_HTTP_POOL_IDLE_TIMEOUT_SECS` (default 90)
/// - `PIXELA_PROXY_URL`
/// - `PIXELA_CODEC_THREADS` (default 2)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelaConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub pool_idle_timeout: Duration,
    pub proxy_url: Option<String>,
    /// Worker threads of the JSON codec pool.
    pub codec_threads: usize,
}

impl Default for PixelaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            pool_max_idle_per_host: 8,
            pool_idle_timeout: Duration::from_secs(90),
            proxy_url: None,
            codec_threads: 2,
        }
    }
}

impl PixelaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with any `PIXELA_*` environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().merge_env()
    }

    /// Apply `PIXELA_*` environment overrides on top of `self`.
    pub fn merge_env(mut self) -> Self {
        if let Ok(url) = env::var("PIXELA_BASE_URL") {
            if !url.trim().is_empty() {
                self.base_url = url.trim().to_string();
            }
        }
        if let Some(secs) = env_parse::<u64>("PIXELA_HTTP_TIMEOUT_SECS") {
            self.timeout = Duration::from_secs(secs.max(1));
        }
        if let Some(n) = env_parse::<usize>("PIXELA_HTTP_POOL_MAX_IDLE_PER_HOST") {
            self.pool_max_idle_per_host = n;
        }
        if let Some(secs) = env_parse::<u64>("PIXELA_HTTP_POOL_IDLE_TIMEOUT_SECS") {
            self.pool_idle_timeout = Duration::from_secs(secs);
        }
        if let Ok(proxy) = env::var("PIXELA_PROXY_URL") {
            if !proxy.trim().is_empty() {
                self.proxy_url = Some(proxy.trim().to_string());
            }
        }
        if let Some(n) = env_parse::<usize>("PIXELA_CODEC_THREADS") {
            self.codec_threads = n.max(1);
        }
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_codec_threads(mut self, threads: usize) -> Self {
        self.codec_threads = threads.max(1);
        self
    }

    pub fn with_proxy_url(mut self, proxy_url: impl Into<String>) -> Self {
        self.proxy_url = Some(proxy_url.into());
        self
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse::<T>().ok())
}
