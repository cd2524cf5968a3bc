//! 用户：账户注册、令牌更新、账户删除，以及用户上下文 [`Pixela`]。
//!
//! User accounts and the per-user context every other endpoint hangs off.

mod builder;

pub use builder::{
    CreateUserAgreement, CreateUserBuilder, CreateUserMinor, CreateUserOptions,
    CreateUserUsername,
};

use crate::client::PixelaClient;
use crate::credentials::Credentials;
use crate::graph::{CreateGraphBuilder, Graph, ListGraphs};
use crate::pipeline::Output;
use crate::request::{Empty, NoBody, RequestDescriptor};
use crate::transport::Method;
use crate::types::{GraphId, UserToken, Username, WebhookHash};
use crate::webhook::{CreateWebhookBuilder, ListWebhooks, Webhook};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Username plus token: who a request acts as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserScope {
    pub username: Username,
    pub token: UserToken,
}

impl UserScope {
    pub fn new(username: Username, token: UserToken) -> Self {
        Self { username, token }
    }

    /// `v1/users/{username}/{rest...}`
    pub(crate) fn path(&self, rest: &[&str]) -> Vec<String> {
        let mut segments = vec![
            "v1".to_string(),
            "users".to_string(),
            self.username.as_str().to_string(),
        ];
        segments.extend(rest.iter().map(|s| s.to_string()));
        segments
    }

    /// `v1/users/{username}/graphs/{graphID}/{rest...}`
    pub(crate) fn graph_path(&self, graph: &GraphId, rest: &[&str]) -> Vec<String> {
        let mut segments = self.path(&["graphs", graph.as_str()]);
        segments.extend(rest.iter().map(|s| s.to_string()));
        segments
    }
}

/// Context for one Pixela user.
///
/// Holds the owning client explicitly; graphs and webhooks obtained from it
/// hold a clone of this context in turn.
#[derive(Debug, Clone)]
pub struct Pixela {
    client: PixelaClient,
    scope: UserScope,
}

impl Pixela {
    pub fn new(client: PixelaClient, scope: UserScope) -> Self {
        Self { client, scope }
    }

    pub fn client(&self) -> &PixelaClient {
        &self.client
    }

    pub fn scope(&self) -> &UserScope {
        &self.scope
    }

    pub fn username(&self) -> &Username {
        &self.scope.username
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.scope.username.clone(), self.scope.token.clone())
    }

    /// A copy of this context using a different token.
    pub fn with_token(&self, token: UserToken) -> Self {
        Self {
            client: self.client.clone(),
            scope: UserScope::new(self.scope.username.clone(), token),
        }
    }

    /// Execute `request` with the owning client.
    pub async fn send<R: RequestDescriptor>(&self, request: &R) -> Result<Output<R>> {
        self.client.execute(request).await
    }

    /// `PUT /v1/users/{username}` replacing the token.
    pub fn update_token(&self, new_token: impl Into<String>) -> Result<UpdateToken> {
        Ok(UpdateToken {
            scope: self.scope.clone(),
            body: UpdateTokenBody {
                new_token: UserToken::parse(new_token)?,
            },
        })
    }

    /// `DELETE /v1/users/{username}`
    pub fn delete(&self) -> DeleteUser {
        DeleteUser {
            scope: self.scope.clone(),
        }
    }

    pub fn create_graph(&self) -> CreateGraphBuilder {
        CreateGraphBuilder::new(self.scope.clone())
    }

    pub fn graphs(&self) -> ListGraphs {
        ListGraphs::new(self.scope.clone())
    }

    pub fn graph(&self, id: impl Into<String>) -> Result<Graph> {
        Ok(Graph::new(self.clone(), GraphId::parse(id)?))
    }

    pub fn create_webhook(&self) -> CreateWebhookBuilder {
        CreateWebhookBuilder::new(self.scope.clone())
    }

    pub fn webhooks(&self) -> ListWebhooks {
        ListWebhooks::new(self.scope.clone())
    }

    pub fn webhook(&self, hash: impl Into<String>) -> Result<Webhook> {
        Ok(Webhook::new(self.clone(), WebhookHash::parse(hash)?))
    }
}

/// `"yes"` / `"no"` flags of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    No,
}

impl From<bool> for YesNo {
    fn from(v: bool) -> Self {
        if v {
            YesNo::Yes
        } else {
            YesNo::No
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserBody {
    pub token: UserToken,
    pub username: Username,
    pub agree_terms_of_service: YesNo,
    pub not_minor: YesNo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thanks_code: Option<String>,
}

/// `POST /v1/users`. The token travels in the body, not the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUser {
    body: CreateUserBody,
}

impl CreateUser {
    pub fn scope(&self) -> UserScope {
        UserScope::new(self.body.username.clone(), self.body.token.clone())
    }

    pub fn body(&self) -> &CreateUserBody {
        &self.body
    }
}

impl RequestDescriptor for CreateUser {
    type Body = CreateUserBody;
    type Shape = Empty;

    fn method(&self) -> Method {
        Method::Post
    }

    fn path_segments(&self) -> Vec<String> {
        vec!["v1".to_string(), "users".to_string()]
    }

    fn token(&self) -> Option<&UserToken> {
        None
    }

    fn body(&self) -> Option<&CreateUserBody> {
        Some(&self.body)
    }

    fn diagnostic_params(&self) -> Vec<(&'static str, String)> {
        vec![("username", self.body.username.to_string())]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTokenBody {
    pub new_token: UserToken,
}

/// `PUT /v1/users/{username}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateToken {
    scope: UserScope,
    body: UpdateTokenBody,
}

impl UpdateToken {
    pub fn new_token(&self) -> &UserToken {
        &self.body.new_token
    }
}

impl RequestDescriptor for UpdateToken {
    type Body = UpdateTokenBody;
    type Shape = Empty;

    fn method(&self) -> Method {
        Method::Put
    }

    fn path_segments(&self) -> Vec<String> {
        self.scope.path(&[])
    }

    fn token(&self) -> Option<&UserToken> {
        Some(&self.scope.token)
    }

    fn body(&self) -> Option<&UpdateTokenBody> {
        Some(&self.body)
    }
}

/// `DELETE /v1/users/{username}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteUser {
    scope: UserScope,
}

impl RequestDescriptor for DeleteUser {
    type Body = NoBody;
    type Shape = Empty;

    fn method(&self) -> Method {
        Method::Delete
    }

    fn path_segments(&self) -> Vec<String> {
        self.scope.path(&[])
    }

    fn token(&self) -> Option<&UserToken> {
        Some(&self.scope.token)
    }

    fn body(&self) -> Option<&NoBody> {
        None
    }
}
