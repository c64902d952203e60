//! Single-game detail with shared-genre recommendations

use serde::Serialize;
use tracing::warn;

use crate::catalog::{AppId, CatalogService, GameDetail, RecommendationItem};
use crate::sparql::coerce::parse_int_prefix;

/// Error shown when the route parameter is not a usable appid
pub const INVALID_ROUTE_APPID: &str = "Invalid appid in route.";

/// Detail page view state
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailPage {
    #[serde(skip)]
    catalog: CatalogService,
    #[serde(skip)]
    recommendation_limit: u32,
    pub appid: Option<AppId>,
    pub loading: bool,
    pub error: Option<String>,
    pub detail: Option<GameDetail>,
    pub recommendations: Vec<RecommendationItem>,
}

impl DetailPage {
    /// Build from the raw `appid` route parameter
    pub fn from_route(catalog: CatalogService, param: &str, recommendation_limit: u32) -> Self {
        let appid = parse_int_prefix(param).and_then(|id| AppId::try_from(id).ok());
        Self {
            catalog,
            recommendation_limit,
            appid,
            loading: false,
            error: None,
            detail: None,
            recommendations: Vec::new(),
        }
    }

    /// Fetch the detail record, then the recommendations
    pub async fn load(&mut self) {
        let Some(appid) = self.appid else {
            self.error = Some(INVALID_ROUTE_APPID.to_string());
            return;
        };

        self.loading = true;
        self.error = None;

        let outcome = async {
            let detail = self.catalog.game_detail(appid).await?;
            let recommendations = self
                .catalog
                .recommend_by_shared_genres(appid, self.recommendation_limit)
                .await?;
            Ok::<_, crate::sparql::SparqlError>((detail, recommendations))
        }
        .await;

        match outcome {
            Ok((detail, recommendations)) => {
                self.detail = detail;
                self.recommendations = recommendations;
            }
            Err(e) => {
                warn!(appid, "detail load failed: {}", e);
                self.error = Some(e.to_string());
                self.detail = None;
                self.recommendations.clear();
            }
        }
        self.loading = false;
    }
}
