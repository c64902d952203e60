use std::sync::Arc;

use steamgraph::catalog::{CatalogService, GenreStat};
use steamgraph::sparql::{Cell, FixtureTransport, QueryKind, Row, TabularResult};

const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

fn search_rows() -> TabularResult {
    TabularResult::from_json(
        r#"{
        "head": { "vars": ["g", "appid", "label", "img", "price", "discount"] },
        "results": { "bindings": [
            {
                "g": { "type": "uri", "value": "http://steam.com/game/620" },
                "appid": { "type": "literal", "datatype": "http://www.w3.org/2001/XMLSchema#integer", "value": "620" },
                "label": { "type": "literal", "value": "Portal 2" },
                "img": { "type": "literal", "value": "https://cdn.example/620.jpg" },
                "price": { "type": "literal", "datatype": "http://www.w3.org/2001/XMLSchema#decimal", "value": "9.99" }
            },
            {
                "g": { "type": "uri", "value": "http://steam.com/game/x" },
                "appid": { "type": "literal", "value": "bad" },
                "label": { "type": "literal", "value": "X" }
            },
            {
                "g": { "type": "uri", "value": "http://steam.com/game/400" },
                "appid": { "type": "literal", "value": "400" },
                "label": { "type": "literal", "value": "Portal" },
                "discount": { "type": "literal", "value": "90" }
            }
        ] }
    }"#,
    )
    .unwrap()
}

#[tokio::test]
async fn test_search_drops_rows_without_appid() {
    let fixture = Arc::new(FixtureTransport::new().with_result(QueryKind::Search, search_rows()));
    let catalog = CatalogService::new(fixture.clone());

    let items = catalog.search_games("portal", 20, 0).await.unwrap();
    assert_eq!(items.len(), 2);

    assert_eq!(items[0].id, 620);
    assert_eq!(items[0].title, "Portal 2");
    assert_eq!(items[0].price, Some(9.99));
    assert_eq!(items[0].discount_percent, None);
    assert_eq!(items[0].image_url.as_deref(), Some("https://cdn.example/620.jpg"));

    assert_eq!(items[1].id, 400);
    assert_eq!(items[1].price, None);
    assert_eq!(items[1].discount_percent, Some(90));

    let sent = fixture.executed();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].as_str().ends_with("LIMIT 20 OFFSET 0"));
}

#[tokio::test]
async fn test_count_reads_total() {
    let fixture = FixtureTransport::new().with_result(
        QueryKind::Count,
        TabularResult::new(
            vec!["total".to_string()],
            vec![Row::new().with("total", Cell::typed("1234", XSD_INTEGER))],
        ),
    );
    let catalog = CatalogService::new(Arc::new(fixture));
    assert_eq!(catalog.count_games(r#"say "hi""#).await.unwrap(), 1234);
}

#[tokio::test]
async fn test_detail_row() {
    let row = Row::new()
        .with("label", Cell::literal("Portal 2"))
        .with("appid", Cell::typed("620", XSD_INTEGER))
        .with("price", Cell::literal("9.99"))
        .with("discount", Cell::literal("0"))
        .with("dlc", Cell::literal("2"))
        .with("owners", Cell::literal("20000000 - 50000000"))
        .with("peak", Cell::literal("4128"))
        .with("age", Cell::literal("0"))
        .with("userScore", Cell::literal("98"))
        .with("description", Cell::literal("Cooperative puzzles."))
        .with("genres", Cell::literal("Action | Adventure"))
        .with("developers", Cell::literal("Valve"))
        .with("publishers", Cell::literal("Valve"))
        .with("langs", Cell::literal("English | French"));
    let fixture = FixtureTransport::new()
        .with_result(QueryKind::Detail, TabularResult::new(vec![], vec![row]));
    let catalog = CatalogService::new(Arc::new(fixture));

    let detail = catalog.game_detail(620).await.unwrap().unwrap();
    assert_eq!(detail.id, 620);
    assert_eq!(detail.dlc_count, Some(2));
    assert_eq!(detail.estimated_owners.as_deref(), Some("20000000 - 50000000"));
    assert_eq!(detail.peak_concurrent_users, Some(4128));
    assert_eq!(detail.user_score, Some(98));
    assert_eq!(detail.image_url, None);
    assert_eq!(detail.genre_list(), vec!["Action", "Adventure"]);
    assert_eq!(detail.supported_languages.as_deref(), Some("English | French"));
}

#[tokio::test]
async fn test_recommendations() {
    let rows = vec![
        Row::new()
            .with("appid", Cell::literal("400"))
            .with("label", Cell::literal("Portal"))
            .with("sharedGenres", Cell::literal("2")),
        Row::new()
            .with("appid", Cell::literal("nope"))
            .with("label", Cell::literal("Broken"))
            .with("sharedGenres", Cell::literal("2")),
        Row::new()
            .with("appid", Cell::literal("70"))
            .with("label", Cell::literal("Half-Life")),
    ];
    let fixture = Arc::new(
        FixtureTransport::new()
            .with_result(QueryKind::Recommendations, TabularResult::new(vec![], rows)),
    );
    let catalog = CatalogService::new(fixture.clone());

    let recos = catalog.recommend_by_shared_genres(620, 12).await.unwrap();
    assert_eq!(recos.len(), 2);
    assert_eq!(recos[0].shared_genre_count, 2);
    assert_eq!(recos[1].id, 70);
    assert_eq!(recos[1].shared_genre_count, 0);

    let sent = &fixture.executed()[0];
    assert!(sent.as_str().contains(":appid 620 ;"));
    assert!(sent.as_str().ends_with("LIMIT 12"));
}

#[tokio::test]
async fn test_top_genres_ties_keep_endpoint_order() {
    let rows = [("Strategy", "7"), ("Indie", "12"), ("Casual", "7"), ("Action", "7")]
        .into_iter()
        .map(|(g, n)| Row::new().with("genreName", Cell::literal(g)).with("n", Cell::literal(n)))
        .collect();
    let fixture = FixtureTransport::new()
        .with_result(QueryKind::TopGenres, TabularResult::new(vec![], rows));
    let catalog = CatalogService::new(Arc::new(fixture));

    let stats = catalog.top_genres(20).await.unwrap();
    assert_eq!(
        stats,
        vec![
            GenreStat::new("Indie", 12),
            GenreStat::new("Strategy", 7),
            GenreStat::new("Casual", 7),
            GenreStat::new("Action", 7),
        ]
    );
}

#[tokio::test]
async fn test_endpoint_failure_propagates() {
    let fixture = FixtureTransport::new().with_failure(QueryKind::Search, 503, "unavailable");
    let catalog = CatalogService::new(Arc::new(fixture));

    let err = catalog.search_games("x", 20, 0).await.unwrap_err();
    assert_eq!(err.to_string(), "Endpoint returned 503: unavailable");
}
