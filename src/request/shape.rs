//! Expected result shapes and the wire envelope.

use crate::codec::JsonCodec;
use crate::{Error, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// `{ "message": ..., "isSuccess": ... }`, returned by every endpoint that
/// has no structured payload and by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub message: String,
    pub is_success: bool,
}

/// Discriminant of a [`ResultShape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Empty,
    RawText,
    Structured,
}

/// What the reader chain extracted from a successful response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Envelope reported success; nothing to return.
    Nothing,
    /// Body taken verbatim.
    Text(String),
    /// Body still to be decoded as JSON.
    Json(String),
}

/// Type-level description of what a request yields.
#[async_trait]
pub trait ResultShape: Send + Sync + 'static {
    type Output: Send + 'static;

    const KIND: ShapeKind;

    /// Turn the reader chain's payload into the typed output.
    async fn complete(codec: &JsonCodec, payload: Payload) -> Result<Self::Output>;
}

/// No value; the envelope only signals success.
pub struct Empty;

/// The body as text, untouched.
pub struct RawText;

/// A JSON object decoded into `T`.
pub struct Structured<T>(PhantomData<fn() -> T>);

fn mismatch(kind: ShapeKind, payload: &Payload) -> Error {
    Error::Runtime(format!(
        "reader chain produced {:?} for a {:?} result",
        payload, kind
    ))
}

#[async_trait]
impl ResultShape for Empty {
    type Output = ();

    const KIND: ShapeKind = ShapeKind::Empty;

    async fn complete(_codec: &JsonCodec, payload: Payload) -> Result<()> {
        match payload {
            Payload::Nothing => Ok(()),
            other => Err(mismatch(Self::KIND, &other)),
        }
    }
}

#[async_trait]
impl ResultShape for RawText {
    type Output = String;

    const KIND: ShapeKind = ShapeKind::RawText;

    async fn complete(_codec: &JsonCodec, payload: Payload) -> Result<String> {
        match payload {
            Payload::Text(body) => Ok(body),
            other => Err(mismatch(Self::KIND, &other)),
        }
    }
}

#[async_trait]
impl<T> ResultShape for Structured<T>
where
    T: DeserializeOwned + Send + 'static,
{
    type Output = T;

    const KIND: ShapeKind = ShapeKind::Structured;

    async fn complete(codec: &JsonCodec, payload: Payload) -> Result<T> {
        match payload {
            Payload::Json(body) => codec.decode::<T>(body).await,
            other => Err(mismatch(Self::KIND, &other)),
        }
    }
}
