//! Graph payloads.

use crate::types::{GraphColor, GraphType, SelfSufficient};
use serde::{Deserialize, Serialize};

/// Graph definition as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphDefinition {
    pub id: String,
    pub name: String,
    pub unit: String,
    #[serde(rename = "type")]
    pub graph_type: GraphType,
    pub color: GraphColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, rename = "purgeCacheURLs", skip_serializing_if = "Vec::is_empty")]
    pub purge_cache_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_sufficient: Option<SelfSufficient>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_secret: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_optional_data: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphList {
    pub graphs: Vec<GraphDefinition>,
}

/// Dates (`yyyyMMdd`) that carry a pixel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelDates {
    pub pixels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub total_pixels_count: u64,
    pub max_quantity: f64,
    pub min_quantity: f64,
    pub total_quantity: f64,
    #[serde(default)]
    pub avg_quantity: f64,
    #[serde(default)]
    pub todays_quantity: f64,
}

/// Body of `POST /v1/users/{username}/graphs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGraphBody {
    pub id: crate::types::GraphId,
    pub name: String,
    pub unit: String,
    #[serde(rename = "type")]
    pub graph_type: GraphType,
    pub color: GraphColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<crate::types::Timezone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_sufficient: Option<SelfSufficient>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_secret: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_optional_data: Option<bool>,
}

/// Body of `PUT /v1/users/{username}/graphs/{graphID}`. Unset fields keep
/// their server-side values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGraphBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<GraphColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<crate::types::Timezone>,
    #[serde(default, rename = "purgeCacheURLs", skip_serializing_if = "Vec::is_empty")]
    pub purge_cache_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_sufficient: Option<SelfSufficient>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_secret: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_optional_data: Option<bool>,
}
