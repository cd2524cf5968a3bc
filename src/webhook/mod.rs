//! Webhooks: registration, listing, invocation and removal.
//!
//! Creation is staged:
//!
//! ```text
//! CreateWebhookBuilder
//!   → .graph_id(..)?                         → CreateWebhookType
//!   → .increment() | .decrement() | .webhook_type(..) → CreateWebhookReady
//!   → .build()                               → CreateWebhook
//! ```
//!
//! ```compile_fail
//! # fn f(pixela: &pixela::Pixela) -> pixela::Result<()> {
//! // the webhook type has not been chosen
//! let _ = pixela.create_webhook().graph_id("steps")?.build();
//! # Ok(()) }
//! ```

pub mod types;

pub use types::{CreateWebhookBody, WebhookCreated, WebhookDefinition, WebhookList};

use crate::pipeline::SingleFlight;
use crate::request::{Empty, NoBody, RequestDescriptor, Structured};
use crate::transport::Method;
use crate::types::{GraphId, UserToken, WebhookHash, WebhookType};
use crate::user::{Pixela, UserScope};
use crate::Result;

pub struct CreateWebhookBuilder {
    scope: UserScope,
}

impl CreateWebhookBuilder {
    pub(crate) fn new(scope: UserScope) -> Self {
        Self { scope }
    }

    pub fn graph_id(self, id: impl Into<String>) -> Result<CreateWebhookType> {
        Ok(CreateWebhookType {
            scope: self.scope,
            graph_id: GraphId::parse(id)?,
        })
    }
}

pub struct CreateWebhookType {
    scope: UserScope,
    graph_id: GraphId,
}

impl CreateWebhookType {
    pub fn webhook_type(self, webhook_type: WebhookType) -> CreateWebhookReady {
        CreateWebhookReady {
            scope: self.scope,
            body: CreateWebhookBody {
                graph_id: self.graph_id,
                webhook_type,
            },
        }
    }

    pub fn increment(self) -> CreateWebhookReady {
        self.webhook_type(WebhookType::Increment)
    }

    pub fn decrement(self) -> CreateWebhookReady {
        self.webhook_type(WebhookType::Decrement)
    }
}

pub struct CreateWebhookReady {
    scope: UserScope,
    body: CreateWebhookBody,
}

impl CreateWebhookReady {
    pub fn build(self) -> CreateWebhook {
        CreateWebhook {
            scope: self.scope,
            body: self.body,
        }
    }
}

/// `POST /v1/users/{u}/webhooks`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateWebhook {
    scope: UserScope,
    body: CreateWebhookBody,
}

impl RequestDescriptor for CreateWebhook {
    type Body = CreateWebhookBody;
    type Shape = Structured<WebhookCreated>;

    fn method(&self) -> Method {
        Method::Post
    }

    fn path_segments(&self) -> Vec<String> {
        self.scope.path(&["webhooks"])
    }

    fn token(&self) -> Option<&UserToken> {
        Some(&self.scope.token)
    }

    fn body(&self) -> Option<&CreateWebhookBody> {
        Some(&self.body)
    }

    fn diagnostic_params(&self) -> Vec<(&'static str, String)> {
        vec![("graphID", self.body.graph_id.to_string())]
    }
}

/// `GET /v1/users/{u}/webhooks`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListWebhooks {
    scope: UserScope,
}

impl ListWebhooks {
    pub(crate) fn new(scope: UserScope) -> Self {
        Self { scope }
    }
}

impl RequestDescriptor for ListWebhooks {
    type Body = NoBody;
    type Shape = Structured<WebhookList>;

    fn method(&self) -> Method {
        Method::Get
    }

    fn path_segments(&self) -> Vec<String> {
        self.scope.path(&["webhooks"])
    }

    fn token(&self) -> Option<&UserToken> {
        Some(&self.scope.token)
    }

    fn body(&self) -> Option<&NoBody> {
        None
    }
}

/// One registered webhook.
#[derive(Debug, Clone)]
pub struct Webhook {
    owner: Pixela,
    hash: WebhookHash,
}

impl Webhook {
    pub fn new(owner: Pixela, hash: WebhookHash) -> Self {
        Self { owner, hash }
    }

    pub fn hash(&self) -> &WebhookHash {
        &self.hash
    }

    /// Fire the webhook. Sent on first await, replayed afterwards.
    pub fn invoke(&self) -> SingleFlight<()> {
        self.owner.client().execute_once(InvokeWebhook {
            scope: self.owner.scope().clone(),
            hash: self.hash.clone(),
        })
    }

    pub fn delete(&self) -> DeleteWebhook {
        DeleteWebhook {
            scope: self.owner.scope().clone(),
            hash: self.hash.clone(),
        }
    }
}

/// `POST /v1/users/{u}/webhooks/{hash}`. The hash is the credential; no
/// token header is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeWebhook {
    scope: UserScope,
    hash: WebhookHash,
}

impl RequestDescriptor for InvokeWebhook {
    type Body = NoBody;
    type Shape = Empty;

    fn method(&self) -> Method {
        Method::Post
    }

    fn path_segments(&self) -> Vec<String> {
        self.scope.path(&["webhooks", self.hash.as_str()])
    }

    fn token(&self) -> Option<&UserToken> {
        None
    }

    fn body(&self) -> Option<&NoBody> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteWebhook {
    scope: UserScope,
    hash: WebhookHash,
}

impl RequestDescriptor for DeleteWebhook {
    type Body = NoBody;
    type Shape = Empty;

    fn method(&self) -> Method {
        Method::Delete
    }

    fn path_segments(&self) -> Vec<String> {
        self.scope.path(&["webhooks", self.hash.as_str()])
    }

    fn token(&self) -> Option<&UserToken> {
        Some(&self.scope.token)
    }

    fn body(&self) -> Option<&NoBody> {
        None
    }
}
