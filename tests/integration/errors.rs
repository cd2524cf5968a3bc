use crate::integration::mock_server::{MockServerFixture, SUCCESS};
use pixela::{Error, PixelaClient};

const NOT_FOUND: &str = r#"{"message":"Specified graph not found.","isSuccess":false}"#;

#[tokio::test]
async fn test_protocol_error_for_every_shape() {
    let mut fixture = MockServerFixture::new().await;
    let _def = fixture
        .mock_authed("GET", "/v1/users/alice/graphs/steps/graph-def", 400, NOT_FOUND)
        .await;
    let _svg = fixture
        .mock_authed("GET", "/v1/users/alice/graphs/steps", 400, NOT_FOUND)
        .await;
    let _delete = fixture
        .mock_authed("DELETE", "/v1/users/alice/graphs/steps", 400, NOT_FOUND)
        .await;

    let pixela = fixture.pixela();
    let graph = pixela.graph("steps").unwrap();

    let structured = pixela.send(&graph.definition()).await.unwrap_err();
    let raw = pixela.send(&graph.svg()).await.unwrap_err();
    let empty = pixela.send(&graph.delete()).await.unwrap_err();

    for err in [&structured, &raw, &empty] {
        assert!(err.is_protocol(), "{:?}", err);
        assert_eq!(err.protocol_message(), Some("Specified graph not found."));
        assert_eq!(err.status(), Some(400));
    }
    assert_eq!(
        empty.to_string(),
        "Specified graph not found. :: DELETE /v1/users/alice/graphs/steps"
    );
}

#[tokio::test]
async fn test_success_status_with_failed_envelope_is_protocol_error() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_authed(
            "PUT",
            "/v1/users/alice/graphs/steps/increment",
            200,
            r#"{"message":"Please retry this request.","isSuccess":false}"#,
        )
        .await;

    let err = fixture.pixela().graph("steps").unwrap().increment().get().await.unwrap_err();
    assert!(err.is_protocol());
    assert!(err.to_string().contains(" :: PUT /v1/users/alice/graphs/steps/increment"));
}

#[tokio::test]
async fn test_success_envelope_yields_unit() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_authed("DELETE", "/v1/users/alice", 200, r#"{"message":"ok","isSuccess":true}"#)
        .await;
    let pixela = fixture.pixela();
    let () = pixela.send(&pixela.delete()).await.unwrap();
}

#[tokio::test]
async fn test_non_json_success_body_is_a_decode_error() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_authed("GET", "/v1/users/alice/graphs/steps/stats", 200, "<html>maintenance</html>")
        .await;

    let pixela = fixture.pixela();
    let err = pixela
        .send(&pixela.graph("steps").unwrap().stats())
        .await
        .unwrap_err();
    assert!(err.is_decode(), "{:?}", err);
    assert!(!err.is_protocol());
    assert!(!err.to_string().contains("/v1/users/alice"));
}

#[tokio::test]
async fn test_connection_failure_is_not_decorated() {
    crate::integration::mock_server::init_tracing();
    let client = PixelaClient::builder()
        .base_url("http://127.0.0.1:1")
        .codec_threads(1)
        .build()
        .unwrap();
    let pixela = client.user("alice", "secret-token").unwrap();
    let graph = pixela.graph("steps").unwrap();

    let err = graph.increment().get().await.unwrap_err();
    assert!(err.is_transport(), "{:?}", err);
    assert!(matches!(err.root(), Error::Transport(_)));
    assert!(!err.to_string().contains(" :: "));
    assert!(!err.to_string().contains("PUT /v1/users/alice/graphs/steps/increment"));
}

#[tokio::test]
async fn test_shutdown_issues_no_request() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_counted("DELETE", "/v1/users/alice", 200, SUCCESS, 0)
        .await;

    let pixela = fixture.pixela();
    fixture.client.shutdown();
    let err = pixela.send(&pixela.delete()).await.unwrap_err();
    assert!(matches!(err, Error::Shutdown));
    mock.assert_async().await;
}
