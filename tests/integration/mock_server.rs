//! Mock HTTP server setup for integration tests

use mockito::{Mock, Server, ServerGuard};
use pixela::{Pixela, PixelaClient};

pub const USERNAME: &str = "alice";
pub const TOKEN: &str = "secret-token";
pub const SUCCESS: &str = r#"{"message":"Success.","isSuccess":true}"#;

/// Install a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Test fixture that owns a mock server and a client pointed at it
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub client: PixelaClient,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        init_tracing();
        let server = Server::new_async().await;
        let client = PixelaClient::builder()
            .base_url(server.url())
            .codec_threads(1)
            .build()
            .expect("client");
        Self { server, client }
    }

    pub fn pixela(&self) -> Pixela {
        self.client.user(USERNAME, TOKEN).expect("valid credentials")
    }

    /// Mock that requires the user token header.
    pub async fn mock_authed(&mut self, method: &str, path: &str, status: usize, body: &str) -> Mock {
        self.server
            .mock(method, path)
            .match_header("x-user-token", TOKEN)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    /// Mock that must be hit exactly `hits` times.
    pub async fn mock_counted(
        &mut self,
        method: &str,
        path: &str,
        status: usize,
        body: &str,
        hits: usize,
    ) -> Mock {
        self.server
            .mock(method, path)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(hits)
            .create_async()
            .await
    }
}
