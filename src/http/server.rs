//! HTTP server for the dashboard

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use rust_embed::RustEmbed;
use tower_http::cors::CorsLayer;
use tracing::info;

use super::handler::{detail_handler, genres_handler, search_handler, status_handler, AppState};
use crate::config::ServerConfig;

#[derive(RustEmbed)]
#[folder = "src/http/static/"]
struct Assets;

async fn static_handler() -> Response {
    match Assets::get("index.html") {
        Some(file) => Html(String::from_utf8_lossy(file.data.as_ref()).into_owned()).into_response(),
        None => (StatusCode::NOT_FOUND, [(header::CONTENT_TYPE, "text/plain")], "index.html missing").into_response(),
    }
}

/// Routes of the dashboard
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(static_handler))
        .route("/api/search", get(search_handler))
        .route("/api/games/:appid", get(detail_handler))
        .route("/api/stats/genres", get(genres_handler))
        .route("/api/status", get(status_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// HTTP server serving the dashboard UI and API
pub struct HttpServer {
    config: ServerConfig,
    state: AppState,
}

impl HttpServer {
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Bind and serve until the process is stopped
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error>> {
        let app = router(self.state.clone());

        let addr = format!("{}:{}", self.config.address, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!("Dashboard available at http://{}", addr);

        axum::serve(listener, app).await?;

        Ok(())
    }
}
