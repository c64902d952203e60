//! Game catalog operations
//!
//! `CatalogService` pairs each query builder with its row mapping: it asks
//! the builder for query text, runs it through a [`SparqlTransport`] and
//! turns the rows into typed records.

mod models;

pub use models::{
    split_list, AppId, GameDetail, GameListItem, GenreStat, RecommendationItem,
};

use std::sync::Arc;
use tracing::debug;

use crate::sparql::{QueryBuilder, SparqlQuery, SparqlResult, SparqlTransport, TabularResult};

/// Catalog facade over a query transport
#[derive(Clone)]
pub struct CatalogService {
    transport: Arc<dyn SparqlTransport>,
}

impl CatalogService {
    pub fn new(transport: Arc<dyn SparqlTransport>) -> Self {
        Self { transport }
    }

    /// Number of games whose title contains `keyword`, case-insensitively.
    ///
    /// An empty or unreadable answer counts as zero.
    pub async fn count_games(&self, keyword: &str) -> SparqlResult<u64> {
        let result = self.transport.execute(&QueryBuilder::count(keyword)).await?;
        let total = result
            .first()
            .and_then(|row| row.get_int("total"))
            .and_then(|n| u64::try_from(n).ok())
            .unwrap_or(0);
        Ok(total)
    }

    /// One page of matching games, ordered by title
    pub async fn search_games(
        &self,
        keyword: &str,
        limit: u32,
        offset: u32,
    ) -> SparqlResult<Vec<GameListItem>> {
        let result = self
            .transport
            .execute(&QueryBuilder::search(keyword, limit, offset))
            .await?;
        let items: Vec<GameListItem> = result.rows.iter().filter_map(GameListItem::from_row).collect();
        if items.len() < result.len() {
            debug!(dropped = result.len() - items.len(), "search rows without a usable appid");
        }
        Ok(items)
    }

    /// Detail record for `appid`, `None` when the catalog has no such game
    pub async fn game_detail(&self, appid: AppId) -> SparqlResult<Option<GameDetail>> {
        let result = self.transport.execute(&QueryBuilder::detail(appid)).await?;
        Ok(result.first().map(|row| GameDetail::from_row(row, appid)))
    }

    /// Most common genres, largest first
    pub async fn top_genres(&self, limit: u32) -> SparqlResult<Vec<GenreStat>> {
        let result = self.transport.execute(&QueryBuilder::top_genres(limit)).await?;
        let mut stats: Vec<GenreStat> = result.rows.iter().filter_map(GenreStat::from_row).collect();
        // stable: equal counts keep endpoint order
        stats.sort_by(|a, b| b.count.cmp(&a.count));
        Ok(stats)
    }

    /// Games sharing the most genres with `appid`
    pub async fn recommend_by_shared_genres(
        &self,
        appid: AppId,
        limit: u32,
    ) -> SparqlResult<Vec<RecommendationItem>> {
        let result = self
            .transport
            .execute(&QueryBuilder::recommendations(appid, limit))
            .await?;
        Ok(result
            .rows
            .iter()
            .filter_map(RecommendationItem::from_row)
            .collect())
    }

    /// Run caller-supplied SPARQL and return the untyped result
    pub async fn raw_query(&self, text: &str) -> SparqlResult<TabularResult> {
        self.transport.execute(&SparqlQuery::raw(text)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sparql::{Cell, FixtureTransport, QueryKind, Row};

    fn service(fixture: FixtureTransport) -> (CatalogService, Arc<FixtureTransport>) {
        let fixture = Arc::new(fixture);
        (CatalogService::new(fixture.clone()), fixture)
    }

    #[tokio::test]
    async fn test_count_defaults_to_zero() {
        let (catalog, _) = service(FixtureTransport::new());
        assert_eq!(catalog.count_games("anything").await.unwrap(), 0);

        let (catalog, _) = service(FixtureTransport::new().with_result(
            QueryKind::Count,
            TabularResult::new(vec!["total".into()], vec![Row::new().with("total", Cell::literal("n/a"))]),
        ));
        assert_eq!(catalog.count_games("x").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_top_genres_sorted_stably() {
        let rows = [("Indie", "5"), ("Action", "9"), ("RPG", "5"), ("", "99")]
            .into_iter()
            .map(|(g, n)| Row::new().with("genreName", Cell::literal(g)).with("n", Cell::literal(n)))
            .collect();
        let (catalog, fixture) = service(
            FixtureTransport::new()
                .with_result(QueryKind::TopGenres, TabularResult::new(vec![], rows)),
        );

        let stats = catalog.top_genres(10).await.unwrap();
        assert_eq!(
            stats,
            vec![GenreStat::new("Action", 9), GenreStat::new("Indie", 5), GenreStat::new("RPG", 5)]
        );
        assert!(fixture.executed()[0].as_str().ends_with("LIMIT 10"));
    }

    #[tokio::test]
    async fn test_missing_detail_is_none() {
        let (catalog, _) = service(FixtureTransport::new());
        assert_eq!(catalog.game_detail(999_999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_raw_query_passthrough() {
        let (catalog, fixture) = service(FixtureTransport::new());
        catalog.raw_query("ASK { ?s ?p ?o }").await.unwrap();
        assert_eq!(fixture.executed()[0].kind(), QueryKind::Raw);
        assert_eq!(fixture.executed()[0].as_str(), "ASK { ?s ?p ?o }");
    }
}
