//! Request descriptors.
//!
//! A descriptor is an immutable value describing one HTTP call: method,
//! endpoint, optional token, optional JSON body and the shape of the result.
//! Descriptors are produced by the staged builders of each endpoint module
//! and can be sent any number of times.

mod shape;

pub use shape::{Empty, Envelope, Payload, RawText, ResultShape, ShapeKind, Structured};

use crate::transport::Method;
use crate::types::UserToken;
use crate::{Error, ErrorContext, Result};
use serde::Serialize;
use std::fmt::Write as _;
use url::Url;

/// Body placeholder for requests that never send one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NoBody;

/// Everything the pipeline needs to know about one call.
pub trait RequestDescriptor: Send + Sync + 'static {
    /// JSON payload type.
    type Body: Serialize + Clone + Send + Sync + 'static;

    /// What a successful response is turned into.
    type Shape: ResultShape;

    fn method(&self) -> Method;

    /// Path below the base URL, one entry per segment (unescaped).
    fn path_segments(&self) -> Vec<String>;

    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn token(&self) -> Option<&UserToken>;

    fn body(&self) -> Option<&Self::Body>;

    fn has_body(&self) -> bool {
        self.body().is_some()
    }

    /// Notable parameters shown in diagnostics. Never includes the token.
    fn diagnostic_params(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Absolute URL of this request against `base`.
    fn resolve_endpoint(&self, base: &Url) -> Result<Url> {
        resolve_endpoint(base, &self.path_segments(), &self.query())
    }

    /// Human-readable rendering used to decorate protocol errors, e.g.
    /// `PUT /v1/users/alice/graphs/steps [date=20240307, quantity=5]`.
    fn describe(&self) -> String {
        render(
            self.method(),
            &self.path_segments(),
            &self.query(),
            &self.diagnostic_params(),
        )
    }
}

/// Join `segments` onto `base` and replace its query with `query`.
pub fn resolve_endpoint(
    base: &Url,
    segments: &[String],
    query: &[(&'static str, String)],
) -> Result<Url> {
    let mut url = base.clone();
    url.set_fragment(None);
    {
        let mut path = url.path_segments_mut().map_err(|_| {
            Error::configuration_with_context(
                "base URL cannot carry a path",
                ErrorContext::new()
                    .with_field_path("base_url")
                    .with_details(base.to_string()),
            )
        })?;
        path.pop_if_empty();
        path.extend(segments.iter().map(String::as_str));
    }
    url.set_query(None);
    if !query.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
    }
    Ok(url)
}

fn render(
    method: crate::transport::Method,
    segments: &[String],
    query: &[(&'static str, String)],
    params: &[(&'static str, String)],
) -> String {
    let mut out = format!("{} /{}", method, segments.join("/"));
    if !query.is_empty() {
        let q: Vec<String> = query.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        let _ = write!(out, "?{}", q.join("&"));
    }
    if !params.is_empty() {
        let p: Vec<String> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        let _ = write!(out, " [{}]", p.join(", "));
    }
    out
}
