use crate::client::builder::PixelaClientBuilder;
use crate::config::PixelaConfig;
use crate::credentials::Credentials;
use crate::pipeline::{Output, Pipeline, SingleFlight};
use crate::request::RequestDescriptor;
use crate::types::{UserToken, Username};
use crate::user::{CreateUser, CreateUserBuilder, Pixela, UserScope};
use crate::Result;
use std::sync::Arc;
use tracing::info;
use url::Url;

/// Pixela client. Cloning is cheap and shares the transport and codec pool.
#[derive(Clone)]
pub struct PixelaClient {
    pub(crate) pipeline: Arc<Pipeline>,
    pub(crate) config: Arc<PixelaConfig>,
}

impl PixelaClient {
    pub fn builder() -> PixelaClientBuilder {
        PixelaClientBuilder::new()
    }

    /// Client against the public service with default settings.
    pub fn new() -> Result<Self> {
        PixelaClientBuilder::new().build()
    }

    /// Client configured from `PIXELA_*` environment variables.
    pub fn from_env() -> Result<Self> {
        PixelaClientBuilder::new().from_env().build()
    }

    pub fn config(&self) -> &PixelaConfig {
        &self.config
    }

    pub fn base_url(&self) -> &Url {
        self.pipeline.base_url()
    }

    /// Send `request` and read its typed result.
    pub async fn execute<R: RequestDescriptor>(&self, request: &R) -> Result<Output<R>> {
        self.pipeline.execute(request).await
    }

    /// Memoized execution: the request is sent on the first await of the
    /// returned handle and never again.
    pub fn execute_once<R>(&self, request: R) -> SingleFlight<Output<R>>
    where
        R: RequestDescriptor,
        Output<R>: Clone + Sync,
    {
        self.pipeline.execute_once(request)
    }

    /// Start a staged user registration.
    pub fn create_user(&self) -> CreateUserBuilder {
        CreateUserBuilder::new()
    }

    /// Register the user described by `request` and return its context.
    pub async fn register(&self, request: &CreateUser) -> Result<Pixela> {
        self.execute(request).await?;
        info!(username = %request.body().username, "pixela user registered");
        Ok(Pixela::new(self.clone(), request.scope()))
    }

    /// Context for an existing user. Both values are validated locally.
    pub fn user(&self, username: impl Into<String>, token: impl Into<String>) -> Result<Pixela> {
        Ok(self.login(Credentials::new(
            Username::parse(username)?,
            UserToken::parse(token)?,
        )))
    }

    pub fn login(&self, credentials: Credentials) -> Pixela {
        let (username, token) = credentials.into_parts();
        Pixela::new(self.clone(), UserScope::new(username, token))
    }

    /// Stop the codec pool. Every later call fails with
    /// [`Error::Shutdown`](crate::Error::Shutdown) without touching the network.
    pub fn shutdown(&self) {
        self.pipeline.shutdown();
        info!("pixela client shut down");
    }

    pub fn is_shutdown(&self) -> bool {
        self.pipeline.is_shutdown()
    }
}

impl std::fmt::Debug for PixelaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelaClient")
            .field("base_url", &self.pipeline.base_url().as_str())
            .field("codec", self.pipeline.codec())
            .field("closed", &self.is_shutdown())
            .finish()
    }
}
