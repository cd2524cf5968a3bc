//! JSON 编解码：在独立的工作线程池上执行序列化与反序列化。
//!
//! # JSON Codec
//!
//! Request bodies are encoded and response bodies decoded on a dedicated
//! multi-threaded tokio runtime owned by the client. Network completions run
//! on the caller's runtime, so serde work never competes with them.
//!
//! The pool is sized once at construction. After [`JsonCodec::shutdown`]
//! every call fails with [`Error::Shutdown`].

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::runtime::{Handle, Runtime};
use tracing::debug;

/// Handle to the codec worker pool. Cloning shares the same pool.
#[derive(Clone)]
pub struct JsonCodec {
    pool: Arc<CodecPool>,
}

struct CodecPool {
    runtime: Mutex<Option<Runtime>>,
    handle: Handle,
    closed: AtomicBool,
    threads: usize,
}

impl JsonCodec {
    pub fn new(threads: usize) -> Result<Self> {
        let threads = threads.max(1);
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(threads)
            .thread_name("pixela-codec")
            .build()
            .map_err(|e| Error::configuration(format!("Failed to start codec pool: {}", e)))?;
        let handle = runtime.handle().clone();
        debug!(threads, "codec pool started");
        Ok(Self {
            pool: Arc::new(CodecPool {
                runtime: Mutex::new(Some(runtime)),
                handle,
                closed: AtomicBool::new(false),
                threads,
            }),
        })
    }

    pub fn threads(&self) -> usize {
        self.pool.threads
    }

    pub fn is_shutdown(&self) -> bool {
        self.pool.closed.load(Ordering::Acquire)
    }

    /// Serialize `value` to JSON text on the codec pool.
    pub async fn encode<T>(&self, value: T) -> Result<String>
    where
        T: Serialize + Send + 'static,
    {
        self.run(move || serde_json::to_string(&value).map_err(Error::Encode))
            .await?
    }

    /// Parse `text` as `T` on the codec pool.
    pub async fn decode<T>(&self, text: String) -> Result<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.run(move || serde_json::from_str::<T>(&text).map_err(Error::Decode))
            .await?
    }

    /// Run `f` over `text` on the codec pool, then hand `text` back.
    pub async fn inspect<R, F>(&self, text: String, f: F) -> Result<(String, R)>
    where
        F: FnOnce(&str) -> R + Send + 'static,
        R: Send + 'static,
    {
        self.run(move || {
            let out = f(&text);
            (text, out)
        })
        .await
    }

    async fn run<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        if self.is_shutdown() {
            return Err(Error::Shutdown);
        }
        self.pool
            .handle
            .spawn(async move { f() })
            .await
            .map_err(|e| {
                if e.is_cancelled() {
                    Error::Shutdown
                } else {
                    Error::Runtime(format!("codec task failed: {}", e))
                }
            })
    }

    /// Stop the worker pool. Idempotent.
    pub fn shutdown(&self) {
        self.pool.shutdown();
    }
}

impl CodecPool {
    fn shutdown(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        let runtime = match self.runtime.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(runtime) = runtime {
            // May be called from inside an async context, where a blocking
            // runtime drop would panic.
            runtime.shutdown_background();
            debug!("codec pool shut down");
        }
    }
}

impl Drop for CodecPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for JsonCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonCodec")
            .field("threads", &self.pool.threads)
            .field("closed", &self.is_shutdown())
            .finish()
    }
}
