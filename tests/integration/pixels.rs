use crate::integration::mock_server::{MockServerFixture, SUCCESS};
use chrono::NaiveDate;
use mockito::Matcher;
use pixela::types::Quantity;
use serde_json::json;

fn march_7() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
}

#[tokio::test]
async fn test_post_get_update_delete_pixel() {
    let mut fixture = MockServerFixture::new().await;
    let post = fixture
        .server
        .mock("POST", "/v1/users/alice/graphs/steps")
        .match_body(Matcher::Json(json!({
            "date": "20240307",
            "quantity": "5",
            "optionalData": "{\"mood\":\"good\"}"
        })))
        .with_status(200)
        .with_body(SUCCESS)
        .create_async()
        .await;
    let _get = fixture
        .mock_authed(
            "GET",
            "/v1/users/alice/graphs/steps/20240307",
            200,
            r#"{"quantity":"5","optionalData":"{\"mood\":\"good\"}"}"#,
        )
        .await;
    let put = fixture
        .server
        .mock("PUT", "/v1/users/alice/graphs/steps/20240307")
        .match_body(Matcher::Json(json!({"quantity": "8"})))
        .with_status(200)
        .with_body(SUCCESS)
        .create_async()
        .await;
    let delete = fixture
        .mock_authed("DELETE", "/v1/users/alice/graphs/steps/20240307", 200, SUCCESS)
        .await;

    let pixela = fixture.pixela();
    let graph = pixela.graph("steps").unwrap();
    let request = graph
        .post_pixel()
        .date(march_7())
        .quantity(5)
        .optional_data(r#"{"mood":"good"}"#)
        .unwrap()
        .build();
    pixela.send(&request).await.unwrap();

    let pixel = graph.pixel(march_7());
    let got = pixela.send(&pixel.get()).await.unwrap();
    assert_eq!(got.quantity, Quantity::Int(5));

    pixela.send(&pixel.update(8, None).unwrap()).await.unwrap();
    pixela.send(&pixel.delete()).await.unwrap();

    post.assert_async().await;
    put.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn test_increment_awaited_twice_sends_once() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_counted("PUT", "/v1/users/alice/graphs/steps/increment", 200, SUCCESS, 1)
        .await;

    let graph = fixture.pixela().graph("steps").unwrap();
    let handle = graph.increment();
    handle.get().await.unwrap();
    handle.get().await.unwrap();
    handle.clone().await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_concurrent_decrement_observers_share_one_call() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_counted("PUT", "/v1/users/alice/graphs/steps/decrement", 200, SUCCESS, 1)
        .await;

    let graph = fixture.pixela().graph("steps").unwrap();
    let handle = graph.decrement();
    let handle2 = handle.clone();
    let (a, b) = tokio::join!(handle.get(), handle2.get());
    a.unwrap();
    b.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_failed_increment_is_replayed_without_resending() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_counted(
            "PUT",
            "/v1/users/alice/graphs/steps/increment",
            404,
            r#"{"message":"Specified graph not found.","isSuccess":false}"#,
            1,
        )
        .await;

    let graph = fixture.pixela().graph("steps").unwrap();
    let handle = graph.increment();
    let first = handle.get().await.unwrap_err();
    let second = handle.get().await.unwrap_err();
    assert!(first.is_protocol());
    assert_eq!(first.to_string(), second.to_string());

    mock.assert_async().await;
}
