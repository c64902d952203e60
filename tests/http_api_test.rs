use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use steamgraph::http::{router, AppState};
use steamgraph::sparql::{Cell, FixtureTransport, QueryKind, Row, TabularResult};
use steamgraph::{CatalogService, PageLimits};

fn app(fixture: Arc<FixtureTransport>) -> axum::Router {
    router(AppState::new(CatalogService::new(fixture), PageLimits::default()))
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn genre_rows(pairs: &[(&str, u64)]) -> TabularResult {
    let rows = pairs
        .iter()
        .map(|(g, n)| {
            Row::new()
                .with("genreName", Cell::literal(*g))
                .with("n", Cell::literal(n.to_string()))
        })
        .collect();
    TabularResult::new(vec!["genreName".into(), "n".into()], rows)
}

#[tokio::test]
async fn test_search_endpoint() {
    let rows = vec![Row::new()
        .with("appid", Cell::literal("620"))
        .with("label", Cell::literal("Portal 2"))];
    let fixture = Arc::new(
        FixtureTransport::new()
            .with_result(QueryKind::Search, TabularResult::new(vec![], rows))
            .with_result(
                QueryKind::Count,
                TabularResult::new(vec![], vec![Row::new().with("total", Cell::literal("41"))]),
            ),
    );

    let (status, body) = get(app(fixture.clone()), "/api/search?q=portal&offset=20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 41);
    assert_eq!(body["offset"], 20);
    assert_eq!(body["limit"], 20);
    assert_eq!(body["items"][0]["title"], "Portal 2");
    assert_eq!(body["error"], Value::Null);

    let search = fixture
        .executed()
        .into_iter()
        .find(|q| q.kind() == QueryKind::Search)
        .unwrap();
    assert!(search.as_str().ends_with("LIMIT 20 OFFSET 20"));
    assert!(search.as_str().contains(r#"LCASE("portal")"#));
}

#[tokio::test]
async fn test_search_endpoint_failure() {
    let fixture = Arc::new(FixtureTransport::new().with_failure(QueryKind::Count, 500, "oops"));
    let (status, body) = get(app(fixture), "/api/search").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Endpoint returned 500: oops");
    assert_eq!(body["items"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_detail_endpoint() {
    let fixture = Arc::new(FixtureTransport::new());

    let (status, body) = get(app(fixture.clone()), "/api/games/620").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["appid"], 620);
    assert_eq!(body["detail"], Value::Null);

    let (status, body) = get(app(fixture.clone()), "/api/games/portal").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid appid in route.");
    assert_eq!(fixture.executed().len(), 2);
}

#[tokio::test]
async fn test_genre_stats_pie() {
    let pairs: Vec<(String, u64)> = (0..12).map(|i| (format!("Genre {i}"), 100 - i as u64)).collect();
    let borrowed: Vec<(&str, u64)> = pairs.iter().map(|(g, n)| (g.as_str(), *n)).collect();
    let fixture = Arc::new(
        FixtureTransport::new().with_result(QueryKind::TopGenres, genre_rows(&borrowed)),
    );

    let (status, body) = get(app(fixture), "/api/stats/genres?chart=pie").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["chartKind"], "pie");
    assert_eq!(body["stats"]["genres"].as_array().unwrap().len(), 12);

    let series = body["chart"]["series"].as_array().unwrap();
    assert_eq!(series.len(), 11);
    assert_eq!(series[10]["genre"], "Others");
    assert_eq!(series[10]["count"], 90 + 89);
}

#[tokio::test]
async fn test_genre_stats_limit_and_bar() {
    let fixture = Arc::new(
        FixtureTransport::new().with_result(QueryKind::TopGenres, genre_rows(&[("Indie", 3)])),
    );

    let (status, body) = get(app(fixture.clone()), "/api/stats/genres?limit=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["chart"]["kind"], "bar");
    assert_eq!(body["chart"]["series"][0]["genre"], "Indie");
    assert!(fixture.executed()[0].as_str().ends_with("LIMIT 5"));
}

#[tokio::test]
async fn test_status_and_index() {
    let fixture = Arc::new(FixtureTransport::new());

    let (status, body) = get(app(fixture.clone()), "/api/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], steamgraph::VERSION);

    let response = app(fixture)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&bytes).contains("<title>Steamgraph</title>"));
}
