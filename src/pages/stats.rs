//! Genre statistics handed to a chart

use serde::Serialize;
use tracing::warn;

use crate::catalog::{CatalogService, GenreStat};
use crate::chart::{ChartKind, GenreChart};

/// Stats page view state
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsPage {
    #[serde(skip)]
    catalog: CatalogService,
    pub limit: u32,
    pub chart_kind: ChartKind,
    pub loading: bool,
    pub error: Option<String>,
    pub genres: Vec<GenreStat>,
}

impl StatsPage {
    pub fn new(catalog: CatalogService, limit: u32) -> Self {
        Self {
            catalog,
            limit,
            chart_kind: ChartKind::default(),
            loading: false,
            error: None,
            genres: Vec::new(),
        }
    }

    /// Load the top genres and draw them; on failure the chart is cleared
    pub async fn load(&mut self, chart: &mut dyn GenreChart) {
        self.loading = true;
        self.error = None;

        match self.catalog.top_genres(self.limit).await {
            Ok(genres) => {
                self.genres = genres;
                self.render(chart);
            }
            Err(e) => {
                warn!("genre statistics failed: {}", e);
                self.error = Some(e.to_string());
                self.genres.clear();
                chart.clear();
            }
        }
        self.loading = false;
    }

    /// Switch chart kind and redraw the current data
    pub fn set_chart_kind(&mut self, kind: ChartKind, chart: &mut dyn GenreChart) {
        self.chart_kind = kind;
        self.render(chart);
    }

    fn render(&self, chart: &mut dyn GenreChart) {
        if self.genres.is_empty() {
            chart.clear();
        } else {
            chart.render(self.chart_kind, &self.genres);
        }
    }
}
