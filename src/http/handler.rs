//! HTTP handlers for the dashboard API
//!
//! Every request builds a fresh page controller, runs its load and returns
//! the resulting view state as JSON.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::catalog::CatalogService;
use crate::chart::{ChartKind, SeriesChart};
use crate::config::PageLimits;
use crate::pages::{DetailPage, SearchPage, StatsPage};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub limits: PageLimits,
}

impl AppState {
    pub fn new(catalog: CatalogService, limits: PageLimits) -> Self {
        Self { catalog, limits }
    }
}

fn load_status(error: &Option<String>) -> StatusCode {
    if error.is_some() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: u32,
}

/// `GET /api/search?q=&limit=&offset=`
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let mut page = SearchPage::new(state.catalog, params.limit.unwrap_or(state.limits.search));
    page.keyword = params.q;
    page.offset = params.offset;
    page.search(false).await;

    (load_status(&page.error), Json(page)).into_response()
}

/// `GET /api/games/:appid`
pub async fn detail_handler(
    State(state): State<AppState>,
    Path(appid): Path<String>,
) -> Response {
    let mut page = DetailPage::from_route(state.catalog, &appid, state.limits.recommendations);
    page.load().await;

    let status = if page.appid.is_none() {
        StatusCode::BAD_REQUEST
    } else {
        load_status(&page.error)
    };
    (status, Json(page)).into_response()
}

#[derive(Debug, Deserialize)]
pub struct GenreParams {
    pub limit: Option<u32>,
    #[serde(default)]
    pub chart: ChartKind,
}

/// `GET /api/stats/genres?limit=&chart=bar|pie`
pub async fn genres_handler(
    State(state): State<AppState>,
    Query(params): Query<GenreParams>,
) -> Response {
    let mut page = StatsPage::new(state.catalog, params.limit.unwrap_or(state.limits.genres));
    let mut chart = SeriesChart::default();
    page.chart_kind = params.chart;
    page.load(&mut chart).await;

    let status = load_status(&page.error);
    (status, Json(json!({ "stats": page, "chart": chart }))).into_response()
}

/// `GET /api/status`
pub async fn status_handler() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "version": crate::VERSION,
    }))
}
