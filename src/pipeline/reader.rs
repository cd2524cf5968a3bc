//! Response reader chain.
//!
//! Readers are tried in a fixed order and the first match wins:
//!
//! 1. error: non-2xx status, or a 2xx envelope with `isSuccess: false`
//! 2. empty: the request expects no value; the envelope must report success
//! 3. raw text: the body is returned verbatim
//! 4. default: the body is decoded as JSON into the structured result
//!
//! Error detection always precedes shape-specific handling, so a failing
//! response never reaches the text or JSON readers.

use crate::codec::JsonCodec;
use crate::request::{Envelope, Payload, ResultShape, ShapeKind};
use crate::transport::RawResponse;
use crate::{Error, Result};
use serde::Deserialize;

/// Which reader handles a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass {
    Error,
    Empty,
    RawText,
    Structured,
}

impl ResponseClass {
    /// `envelope` is the body parsed as an envelope, when it is one.
    pub fn classify(raw: &RawResponse, envelope: Option<&Envelope>, kind: ShapeKind) -> Self {
        let failed_envelope = envelope.map_or(false, |e| !e.is_success);
        if !raw.is_success_status() || failed_envelope {
            return ResponseClass::Error;
        }
        match kind {
            ShapeKind::Empty => ResponseClass::Empty,
            ShapeKind::RawText => ResponseClass::RawText,
            ShapeKind::Structured => ResponseClass::Structured,
        }
    }
}

/// Run the chain for a response expected to have shape `S`.
pub async fn read<S: ResultShape>(codec: &JsonCodec, raw: RawResponse) -> Result<S::Output> {
    let (raw, envelope) = probe_envelope(codec, raw, S::KIND).await?;
    let payload = match ResponseClass::classify(&raw, envelope.as_ref(), S::KIND) {
        ResponseClass::Error => return Err(read_error(raw, envelope)),
        ResponseClass::Empty => read_empty(codec, raw, envelope).await?,
        ResponseClass::RawText => Payload::Text(raw.body),
        ResponseClass::Structured => Payload::Json(raw.body),
    };
    S::complete(codec, payload).await
}

/// Only the `isSuccess` flag of a body; every other field is skipped unparsed.
#[derive(Deserialize)]
struct SuccessFlag {
    #[serde(rename = "isSuccess")]
    is_success: Option<bool>,
}

/// Parse the body as an envelope without failing when it is something else.
///
/// Successful text and structured bodies are scanned for `isSuccess: false`
/// only. The full envelope is decoded when that flag is false, when the
/// status failed, or when the request expects no value.
async fn probe_envelope(
    codec: &JsonCodec,
    raw: RawResponse,
    kind: ShapeKind,
) -> Result<(RawResponse, Option<Envelope>)> {
    // SVG and HTML bodies are never envelopes; skip the codec round trip.
    if !raw.body.trim_start().starts_with('{') {
        return Ok((raw, None));
    }
    let RawResponse {
        status,
        mut body,
        content_type,
    } = raw;
    if (200..300).contains(&status) && kind != ShapeKind::Empty {
        let (text, failed) = codec
            .inspect(body, |text| {
                serde_json::from_str::<SuccessFlag>(text)
                    .map_or(false, |flag| flag.is_success == Some(false))
            })
            .await?;
        if !failed {
            return Ok((RawResponse { status, body: text, content_type }, None));
        }
        body = text;
    }
    let (body, envelope) = codec
        .inspect(body, |text| serde_json::from_str::<Envelope>(text).ok())
        .await?;
    Ok((RawResponse { status, body, content_type }, envelope))
}

fn read_error(raw: RawResponse, envelope: Option<Envelope>) -> Error {
    let message = match envelope {
        Some(envelope) => envelope.message,
        None => {
            let body = raw.body.trim();
            if body.is_empty() {
                let reason = reqwest::StatusCode::from_u16(raw.status)
                    .ok()
                    .and_then(|s| s.canonical_reason());
                match reason {
                    Some(reason) => format!("HTTP {} {}", raw.status, reason),
                    None => format!("HTTP {}", raw.status),
                }
            } else {
                body.to_string()
            }
        }
    };
    Error::protocol(message, raw.status)
}

async fn read_empty(
    codec: &JsonCodec,
    raw: RawResponse,
    envelope: Option<Envelope>,
) -> Result<Payload> {
    let status = raw.status;
    let envelope = match envelope {
        Some(envelope) => envelope,
        // Not an envelope: let the codec report why.
        None => codec.decode::<Envelope>(raw.body).await?,
    };
    if envelope.is_success {
        Ok(Payload::Nothing)
    } else {
        Err(Error::protocol(envelope.message, status))
    }
}
