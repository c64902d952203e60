//! Steamgraph
//!
//! A dashboard for exploring a video game catalog stored in a SPARQL
//! knowledge graph: keyword search with paging, per-game detail with
//! shared-genre recommendations, and genre statistics charts.
//!
//! # Layers
//!
//! - [`sparql`] builds query text, sends it to the endpoint and parses the
//!   tabular `application/sparql-results+json` reply.
//! - [`catalog`] maps result rows into typed records.
//! - [`pages`] holds per-page view state (search, detail, stats).
//! - [`chart`] is the seam to whatever draws genre statistics.
//! - [`http`] serves the browser dashboard and its JSON API.
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use steamgraph::catalog::CatalogService;
//! use steamgraph::sparql::{Cell, FixtureTransport, QueryKind, Row, TabularResult};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let rows = vec![
//!     Row::new().with("appid", Cell::literal("620")).with("label", Cell::literal("Portal 2")),
//!     Row::new().with("appid", Cell::literal("bad")).with("label", Cell::literal("X")),
//! ];
//! let fixture = FixtureTransport::new()
//!     .with_result(QueryKind::Search, TabularResult::new(vec![], rows));
//! let catalog = CatalogService::new(Arc::new(fixture));
//!
//! let games = catalog.search_games("portal", 20, 0).await.unwrap();
//! assert_eq!(games.len(), 1);
//! assert_eq!(games[0].title, "Portal 2");
//! # }
//! ```

#![warn(clippy::all)]

pub mod catalog;
pub mod chart;
pub mod config;
pub mod http;
pub mod pages;
pub mod sparql;

// Re-export main types for convenience
pub use catalog::{
    AppId, CatalogService, GameDetail, GameListItem, GenreStat, RecommendationItem,
};

pub use config::{ConfigError, DashboardConfig, GatewayConfig, PageLimits, ServerConfig};

pub use sparql::{
    FixtureTransport, HttpGateway, QueryBuilder, SparqlError, SparqlQuery, SparqlResult,
    SparqlTransport, TabularResult,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
