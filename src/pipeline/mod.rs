//! 请求/响应管线：编码 → 发送 → 读取 → 错误修饰。
//!
//! Request/response pipeline shared by every endpoint.
//!
//! For one descriptor the stages always run in order: body encoding (on the
//! codec pool), a single transport send, the reader chain, decoding of the
//! structured payload (codec pool again) and finally error decoration. No
//! state is shared between concurrent executions apart from the transport
//! and the codec pool.

pub mod reader;
mod single_flight;

pub use reader::ResponseClass;
pub use single_flight::SingleFlight;

use crate::codec::JsonCodec;
use crate::request::{RequestDescriptor, ResultShape};
use crate::transport::{OutgoingRequest, Transport};
use crate::{Error, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::warn;
use url::Url;
use uuid::Uuid;

/// Typed output of a descriptor.
pub type Output<R> = <<R as RequestDescriptor>::Shape as ResultShape>::Output;

/// Runs descriptors against one service instance.
pub struct Pipeline {
    base_url: Url,
    transport: Arc<dyn Transport>,
    codec: JsonCodec,
    closed: AtomicBool,
}

impl Pipeline {
    pub fn new(base_url: Url, transport: Arc<dyn Transport>, codec: JsonCodec) -> Self {
        Self {
            base_url,
            transport,
            codec,
            closed: AtomicBool::new(false),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn codec(&self) -> &JsonCodec {
        &self.codec
    }

    /// Send `request` once and read the response.
    ///
    /// Protocol failures come back decorated with [`RequestDescriptor::describe`];
    /// transport, encode and decode failures come back as produced.
    pub async fn execute<R: RequestDescriptor>(&self, request: &R) -> Result<Output<R>> {
        self.ensure_open()?;
        let result = self.run(request).await;
        result.map_err(|err| {
            if err.is_protocol() {
                let err = err.decorate(|| request.describe());
                warn!(
                    http_status = err.status().unwrap_or_default(),
                    error = %err,
                    "pixela request rejected"
                );
                err
            } else {
                err
            }
        })
    }

    async fn run<R: RequestDescriptor>(&self, request: &R) -> Result<Output<R>> {
        let url = request.resolve_endpoint(&self.base_url)?;
        let body = match request.body() {
            Some(body) if request.has_body() => Some(self.codec.encode(body.clone()).await?),
            _ => None,
        };
        let outgoing = OutgoingRequest {
            method: request.method(),
            url,
            token: request.token().map(|t| t.expose().to_string()),
            body,
            request_id: Uuid::new_v4().to_string(),
        };
        let raw = self.transport.send(outgoing).await?;
        reader::read::<R::Shape>(&self.codec, raw).await
    }

    /// Run `request` lazily, at most once, sharing the outcome with every
    /// observer of the returned handle.
    pub fn execute_once<R>(self: &Arc<Self>, request: R) -> SingleFlight<Output<R>>
    where
        R: RequestDescriptor,
        Output<R>: Clone + Sync,
    {
        let pipeline = Arc::clone(self);
        SingleFlight::new(async move { pipeline.execute(&request).await })
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed.load(Ordering::Acquire) || self.codec.is_shutdown() {
            Err(Error::Shutdown)
        } else {
            Ok(())
        }
    }

    /// Stop accepting work and shut the codec pool down.
    pub fn shutdown(&self) {
        self.closed.store(true, Ordering::Release);
        self.codec.shutdown();
    }

    pub fn is_shutdown(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}
