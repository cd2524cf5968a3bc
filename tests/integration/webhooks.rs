use crate::integration::mock_server::{MockServerFixture, SUCCESS};
use mockito::Matcher;
use pixela::types::WebhookType;
use serde_json::json;

#[tokio::test]
async fn test_create_and_list_webhooks() {
    let mut fixture = MockServerFixture::new().await;
    let create = fixture
        .server
        .mock("POST", "/v1/users/alice/webhooks")
        .match_header("x-user-token", "secret-token")
        .match_body(Matcher::Json(json!({"graphID": "steps", "type": "increment"})))
        .with_status(200)
        .with_body(r#"{"message":"Success.","webhookHash":"0123abcd","isSuccess":true}"#)
        .create_async()
        .await;
    let _list = fixture
        .mock_authed(
            "GET",
            "/v1/users/alice/webhooks",
            200,
            r#"{"webhooks":[{"webhookHash":"0123abcd","graphID":"steps","type":"increment"}]}"#,
        )
        .await;

    let pixela = fixture.pixela();
    let request = pixela.create_webhook().graph_id("steps").unwrap().increment().build();
    let created = pixela.send(&request).await.unwrap();
    assert_eq!(created.webhook_hash, "0123abcd");

    let list = pixela.send(&pixela.webhooks()).await.unwrap();
    assert_eq!(list.webhooks.len(), 1);
    assert_eq!(list.webhooks[0].webhook_type, WebhookType::Increment);
    create.assert_async().await;
}

#[tokio::test]
async fn test_invoke_is_anonymous_and_single_flight() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", "/v1/users/alice/webhooks/0123abcd")
        .match_header("x-user-token", Matcher::Missing)
        .with_status(200)
        .with_body(SUCCESS)
        .expect(1)
        .create_async()
        .await;

    let webhook = fixture.pixela().webhook("0123abcd").unwrap();
    let handle = webhook.invoke();
    handle.get().await.unwrap();
    handle.get().await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_delete_webhook() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_authed("DELETE", "/v1/users/alice/webhooks/0123abcd", 200, SUCCESS)
        .await;

    let pixela = fixture.pixela();
    let webhook = pixela.webhook("0123abcd").unwrap();
    pixela.send(&webhook.delete()).await.unwrap();
    mock.assert_async().await;
}
