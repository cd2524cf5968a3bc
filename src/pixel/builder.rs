//! Staged builder for `POST .../graphs/{id}`.
//!
//! ```text
//! PostPixelBuilder
//!   → .date(..) | .today()             → PostPixelQuantity
//!   → .quantity(..) | .parse_quantity(..)? → PostPixelOptions
//!   → [.optional_data(..)?] .build()   → PostPixel
//! ```
//!
//! ```compile_fail
//! # fn f(graph: &pixela::graph::Graph) {
//! // no quantity yet
//! let _ = graph.post_pixel().today().build();
//! # }
//! ```

use super::types::{PostPixelBody, MAX_OPTIONAL_DATA_BYTES};
use super::PostPixel;
use crate::types::{format_date, GraphId, Quantity};
use crate::user::UserScope;
use crate::{Error, ErrorContext, Result};
use chrono::NaiveDate;

pub struct PostPixelBuilder {
    scope: UserScope,
    graph: GraphId,
}

impl PostPixelBuilder {
    pub(crate) fn new(scope: UserScope, graph: GraphId) -> Self {
        Self { scope, graph }
    }

    pub fn date(self, date: NaiveDate) -> PostPixelQuantity {
        PostPixelQuantity {
            scope: self.scope,
            graph: self.graph,
            date,
        }
    }

    /// Local calendar date.
    pub fn today(self) -> PostPixelQuantity {
        self.date(chrono::Local::now().date_naive())
    }
}

pub struct PostPixelQuantity {
    scope: UserScope,
    graph: GraphId,
    date: NaiveDate,
}

impl PostPixelQuantity {
    pub fn quantity(self, quantity: impl Into<Quantity>) -> PostPixelOptions {
        PostPixelOptions {
            scope: self.scope,
            graph: self.graph,
            body: PostPixelBody {
                date: format_date(self.date),
                quantity: quantity.into(),
                optional_data: None,
            },
        }
    }

    pub fn parse_quantity(self, quantity: &str) -> Result<PostPixelOptions> {
        Ok(self.quantity(quantity.parse::<Quantity>()?))
    }
}

pub struct PostPixelOptions {
    scope: UserScope,
    graph: GraphId,
    body: PostPixelBody,
}

impl PostPixelOptions {
    /// Free-form JSON object stored alongside the pixel.
    pub fn optional_data(mut self, json: impl Into<String>) -> Result<Self> {
        self.body.optional_data = Some(validate_optional_data(json.into())?);
        Ok(self)
    }

    pub fn build(self) -> PostPixel {
        PostPixel {
            scope: self.scope,
            graph: self.graph,
            body: self.body,
        }
    }
}

/// `optionalData` must be a JSON object of at most 10 KiB.
pub(crate) fn validate_optional_data(json: String) -> Result<String> {
    let context = || ErrorContext::new().with_field_path("optionalData");
    if json.len() > MAX_OPTIONAL_DATA_BYTES {
        return Err(Error::validation_with_context(
            format!("optional data is {} bytes", json.len()),
            context().with_details(format!("at most {} bytes", MAX_OPTIONAL_DATA_BYTES)),
        ));
    }
    match serde_json::from_str::<serde_json::Value>(&json) {
        Ok(serde_json::Value::Object(_)) => Ok(json),
        Ok(_) => Err(Error::validation_with_context(
            "optional data must be a JSON object",
            context(),
        )),
        Err(e) => Err(Error::validation_with_context(
            format!("optional data is not valid JSON: {}", e),
            context(),
        )),
    }
}
