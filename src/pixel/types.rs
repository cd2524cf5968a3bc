//! Pixel payloads.

use crate::types::Quantity;
use serde::{Deserialize, Serialize};

/// Largest accepted `optionalData`, in bytes.
pub const MAX_OPTIONAL_DATA_BYTES: usize = 10 * 1024;

/// A pixel as returned by `GET .../graphs/{id}/{yyyyMMdd}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pixel {
    pub quantity: Quantity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional_data: Option<String>,
}

/// Body of `POST .../graphs/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPixelBody {
    /// `yyyyMMdd`
    pub date: String,
    pub quantity: Quantity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional_data: Option<String>,
}

/// Body of `PUT .../graphs/{id}/{yyyyMMdd}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePixelBody {
    pub quantity: Quantity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional_data: Option<String>,
}
