//! Keyword search with offset paging

use serde::Serialize;
use tracing::warn;

use crate::catalog::{CatalogService, GameListItem};

/// Search page view state
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    #[serde(skip)]
    catalog: CatalogService,
    pub keyword: String,
    pub limit: u32,
    pub offset: u32,
    pub total: u64,
    pub loading: bool,
    pub error: Option<String>,
    pub items: Vec<GameListItem>,
}

impl SearchPage {
    pub fn new(catalog: CatalogService, limit: u32) -> Self {
        Self {
            catalog,
            keyword: String::new(),
            limit,
            offset: 0,
            total: 0,
            loading: false,
            error: None,
            items: Vec::new(),
        }
    }

    /// Run the current keyword, optionally going back to the first page.
    ///
    /// The page query and the count query run concurrently; state is
    /// updated once both have finished.
    pub async fn search(&mut self, reset_page: bool) {
        if reset_page {
            self.offset = 0;
        }
        self.loading = true;
        self.error = None;

        let outcome = tokio::try_join!(
            self.catalog.search_games(&self.keyword, self.limit, self.offset),
            self.catalog.count_games(&self.keyword),
        );

        match outcome {
            Ok((items, total)) => {
                self.items = items;
                self.total = total;
            }
            Err(e) => {
                warn!(keyword = %self.keyword, "search failed: {}", e);
                self.error = Some(e.to_string());
                self.items.clear();
                self.total = 0;
            }
        }
        self.loading = false;
    }

    /// Set the keyword and search from the first page
    pub async fn search_for(&mut self, keyword: impl Into<String>) {
        self.keyword = keyword.into();
        self.search(true).await;
    }

    pub async fn next_page(&mut self) {
        self.offset = self.offset.saturating_add(self.limit);
        self.search(false).await;
    }

    pub async fn prev_page(&mut self) {
        self.offset = self.offset.saturating_sub(self.limit);
        self.search(false).await;
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.offset) + u64::from(self.limit) < self.total
    }

    pub fn has_prev(&self) -> bool {
        self.offset > 0
    }
}
