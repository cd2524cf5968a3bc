//! Webhook payloads.

use crate::types::{GraphId, WebhookType};
use serde::{Deserialize, Serialize};

/// Body of `POST /v1/users/{u}/webhooks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateWebhookBody {
    #[serde(rename = "graphID")]
    pub graph_id: GraphId,
    #[serde(rename = "type")]
    pub webhook_type: WebhookType,
}

/// Success envelope of webhook creation, carrying the new hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookCreated {
    pub webhook_hash: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub is_success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookDefinition {
    #[serde(rename = "webhookHash")]
    pub webhook_hash: String,
    #[serde(rename = "graphID")]
    pub graph_id: String,
    #[serde(rename = "type")]
    pub webhook_type: WebhookType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookList {
    pub webhooks: Vec<WebhookDefinition>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_body_wire_names() {
        let body = CreateWebhookBody {
            graph_id: GraphId::parse("steps").unwrap(),
            webhook_type: WebhookType::Decrement,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"graphID":"steps","type":"decrement"}"#);
        assert_eq!(serde_json::from_str::<CreateWebhookBody>(&json).unwrap(), body);
    }

    #[test]
    fn test_list_decode() {
        let json = r#"{"webhooks":[{"webhookHash":"abc123","graphID":"steps","type":"increment"}]}"#;
        let list: WebhookList = serde_json::from_str(json).unwrap();
        assert_eq!(list.webhooks[0].webhook_hash, "abc123");
        assert_eq!(list.webhooks[0].webhook_type, WebhookType::Increment);
    }

    #[test]
    fn test_created_decode() {
        let json = r#"{"message":"Success.","isSuccess":true,"webhookHash":"h"}"#;
        let created: WebhookCreated = serde_json::from_str(json).unwrap();
        assert_eq!(created.webhook_hash, "h");
        assert!(created.is_success);
    }
}
