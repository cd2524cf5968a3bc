use crate::integration::mock_server::{MockServerFixture, SUCCESS, TOKEN};
use mockito::Matcher;
use pixela::Credentials;
use serde_json::json;

#[tokio::test]
async fn test_register_sends_body_without_token_header() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", "/v1/users")
        .match_header("x-user-token", Matcher::Missing)
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "token": TOKEN,
            "username": "alice",
            "agreeTermsOfService": "yes",
            "notMinor": "yes"
        })))
        .with_status(200)
        .with_body(SUCCESS)
        .create_async()
        .await;

    let request = fixture
        .client
        .create_user()
        .token(TOKEN)
        .unwrap()
        .username("alice")
        .unwrap()
        .agree_terms_of_service(true)
        .not_minor(true)
        .build();
    let pixela = fixture.client.register(&request).await.unwrap();

    mock.assert_async().await;
    assert_eq!(pixela.username().as_str(), "alice");
    assert_eq!(pixela.credentials().token().expose(), TOKEN);
}

#[tokio::test]
async fn test_update_token_and_delete_user() {
    let mut fixture = MockServerFixture::new().await;
    let update = fixture
        .server
        .mock("PUT", "/v1/users/alice")
        .match_header("x-user-token", TOKEN)
        .match_body(Matcher::Json(json!({"newToken": "brand-new-token"})))
        .with_status(200)
        .with_body(SUCCESS)
        .create_async()
        .await;
    let delete = fixture.mock_authed("DELETE", "/v1/users/alice", 200, SUCCESS).await;

    let pixela = fixture.pixela();
    let request = pixela.update_token("brand-new-token").unwrap();
    pixela.send(&request).await.unwrap();
    let renewed = pixela.with_token(request.new_token().clone());
    assert_eq!(renewed.credentials().token().expose(), "brand-new-token");

    pixela.send(&pixela.delete()).await.unwrap();
    update.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn test_login_from_saved_credentials() {
    let fixture = MockServerFixture::new().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pixela.properties");
    fixture.pixela().credentials().save(&path).await.unwrap();

    let pixela = fixture.client.login(Credentials::load(&path).await.unwrap());
    assert_eq!(pixela.username().as_str(), "alice");
}
