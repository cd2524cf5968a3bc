use crate::integration::mock_server::{MockServerFixture, SUCCESS, TOKEN};
use chrono::NaiveDate;
use mockito::Matcher;
use pixela::transport::TransportError;
use pixela::types::{GraphColor, GraphType, SvgMode};
use serde_json::json;

#[tokio::test]
async fn test_create_graph_posts_camel_case_body() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", "/v1/users/alice/graphs")
        .match_header("x-user-token", TOKEN)
        .match_body(Matcher::Json(json!({
            "id": "steps",
            "name": "Steps",
            "unit": "step",
            "type": "int",
            "color": "shibafu",
            "timezone": "Asia/Tokyo",
            "isSecret": true
        })))
        .with_status(200)
        .with_body(SUCCESS)
        .create_async()
        .await;

    let pixela = fixture.pixela();
    let request = pixela
        .create_graph()
        .id("steps")
        .unwrap()
        .name("Steps")
        .unit("step")
        .int()
        .shibafu()
        .timezone("Asia/Tokyo")
        .unwrap()
        .secret(true)
        .build();
    pixela.send(&request).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_graphs_and_definition() {
    let mut fixture = MockServerFixture::new().await;
    let graph_json = json!({
        "id": "steps",
        "name": "Steps",
        "unit": "step",
        "type": "int",
        "color": "sora",
        "timezone": "UTC",
        "purgeCacheURLs": [],
        "selfSufficient": "none",
        "isSecret": false,
        "publishOptionalData": false
    });
    let list_body = json!({ "graphs": [graph_json.clone()] }).to_string();
    let _list = fixture.mock_authed("GET", "/v1/users/alice/graphs", 200, &list_body).await;
    let _def = fixture
        .mock_authed("GET", "/v1/users/alice/graphs/steps/graph-def", 200, &graph_json.to_string())
        .await;

    let pixela = fixture.pixela();
    let list = pixela.send(&pixela.graphs()).await.unwrap();
    assert_eq!(list.graphs.len(), 1);
    assert_eq!(list.graphs[0].color, GraphColor::Sora);

    let graph = pixela.graph("steps").unwrap();
    let def = pixela.send(&graph.definition()).await.unwrap();
    assert_eq!(def.graph_type, GraphType::Int);
    assert_eq!(def.id, "steps");
}

#[tokio::test]
async fn test_svg_body_is_returned_verbatim() {
    let mut fixture = MockServerFixture::new().await;
    let svg = "<svg xmlns=\"http://www.w3.org/2000/svg\">\n  <rect width=\"11\" height=\"11\"/>\n</svg>\n";
    let mock = fixture
        .server
        .mock("GET", Matcher::Regex(r"^/v1/users/alice/graphs/steps(\?.*)?$".to_string()))
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("date".into(), "20240307".into()),
            Matcher::UrlEncoded("mode".into(), "short".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "image/svg+xml")
        .with_body(svg)
        .create_async()
        .await;

    let pixela = fixture.pixela();
    let graph = pixela.graph("steps").unwrap();
    let request = graph
        .svg()
        .date(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap())
        .mode(SvgMode::Short);
    let text = pixela.send(&request).await.unwrap();
    assert_eq!(text, svg);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_svg_keeps_byte_order_mark() {
    let mut fixture = MockServerFixture::new().await;
    let svg = "\u{FEFF}<svg/>";
    let _mock = fixture
        .server
        .mock("GET", "/v1/users/alice/graphs/steps")
        .with_status(200)
        .with_header("content-type", "image/svg+xml; charset=utf-8")
        .with_body(svg)
        .create_async()
        .await;

    let pixela = fixture.pixela();
    let graph = pixela.graph("steps").unwrap();
    let text = pixela.send(&graph.svg()).await.unwrap();
    assert_eq!(text.as_bytes(), svg.as_bytes());
    assert!(text.starts_with('\u{FEFF}'));
}

#[tokio::test]
async fn test_non_utf8_svg_is_a_transport_error() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .server
        .mock("GET", "/v1/users/alice/graphs/steps")
        .with_status(200)
        .with_header("content-type", "image/svg+xml; charset=iso-8859-1")
        .with_body(b"<svg>caf\xE9</svg>".to_vec())
        .create_async()
        .await;

    let pixela = fixture.pixela();
    let graph = pixela.graph("steps").unwrap();
    let err = pixela.send(&graph.svg()).await.unwrap_err();
    assert!(err.is_transport());
    assert!(matches!(
        err,
        pixela::Error::Transport(TransportError::InvalidBody(_))
    ));
    assert!(!err.to_string().contains(" :: "));
}

#[tokio::test]
async fn test_update_stats_and_delete() {
    let mut fixture = MockServerFixture::new().await;
    let update = fixture
        .server
        .mock("PUT", "/v1/users/alice/graphs/steps")
        .match_body(Matcher::Json(json!({
            "name": "Daily steps",
            "purgeCacheURLs": ["https://camo.githubusercontent.com/x"],
            "selfSufficient": "increment"
        })))
        .with_status(200)
        .with_body(SUCCESS)
        .create_async()
        .await;
    let _stats = fixture
        .mock_authed(
            "GET",
            "/v1/users/alice/graphs/steps/stats",
            200,
            r#"{"totalPixelsCount":3,"maxQuantity":7,"minQuantity":1,"totalQuantity":12,"avgQuantity":4,"todaysQuantity":7}"#,
        )
        .await;
    let delete = fixture.mock_authed("DELETE", "/v1/users/alice/graphs/steps", 200, SUCCESS).await;

    let pixela = fixture.pixela();
    let graph = pixela.graph("steps").unwrap();
    let request = graph
        .update()
        .name("Daily steps")
        .purge_cache_urls(["https://camo.githubusercontent.com/x"])
        .unwrap()
        .increment()
        .build();
    pixela.send(&request).await.unwrap();

    let stats = pixela.send(&graph.stats()).await.unwrap();
    assert_eq!(stats.total_pixels_count, 3);
    assert_eq!(stats.todays_quantity, 7.0);

    pixela.send(&graph.delete()).await.unwrap();
    update.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn test_graph_page_url() {
    let fixture = MockServerFixture::new().await;
    let graph = fixture.pixela().graph("steps").unwrap();
    let url = graph.url().unwrap();
    assert_eq!(
        url.as_str(),
        format!("{}/v1/users/alice/graphs/steps.html", fixture.server.url())
    );
}
