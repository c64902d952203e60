//! Query gateway: ships query text to the SPARQL endpoint over HTTP

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use tracing::{debug, warn};

use super::builder::SparqlQuery;
use super::results::TabularResult;
use super::{SparqlError, SparqlResult};
use crate::config::GatewayConfig;

/// Anything that can execute a query and hand back a tabular result.
///
/// Implemented by:
/// - `HttpGateway`: the configured remote endpoint
/// - `FixtureTransport`: in-process canned results, for tests and demos
#[async_trait]
pub trait SparqlTransport: Send + Sync {
    /// Execute a query and wait for the complete result
    async fn execute(&self, query: &SparqlQuery) -> SparqlResult<TabularResult>;
}

/// Gateway to a fixed SPARQL endpoint.
///
/// Queries are sent as a GET with `query` and `format` URL parameters and a
/// matching `Accept` header.
pub struct HttpGateway {
    endpoint: Url,
    format: String,
    http_client: Client,
}

impl HttpGateway {
    /// Create a gateway for the configured endpoint
    ///
    /// # Example
    /// ```no_run
    /// # use steamgraph::config::GatewayConfig;
    /// # use steamgraph::sparql::HttpGateway;
    /// let gateway = HttpGateway::new(GatewayConfig {
    ///     endpoint: "http://localhost:3030/steam/query".to_string(),
    ///     ..GatewayConfig::default()
    /// }).unwrap();
    /// ```
    pub fn new(config: GatewayConfig) -> SparqlResult<Self> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| SparqlError::Config(format!("invalid endpoint {}: {}", config.endpoint, e)))?;
        Ok(Self {
            endpoint,
            format: config.format,
            http_client: Client::new(),
        })
    }

    fn request_url(&self, query: &SparqlQuery) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("query", query.as_str())
            .append_pair("format", &self.format);
        url
    }
}

#[async_trait]
impl SparqlTransport for HttpGateway {
    async fn execute(&self, query: &SparqlQuery) -> SparqlResult<TabularResult> {
        debug!(kind = %query.kind(), endpoint = %self.endpoint, "executing query:\n{}", query);

        let response = self
            .http_client
            .get(self.request_url(query))
            .header(ACCEPT, &self.format)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(kind = %query.kind(), %status, "endpoint rejected query");
            return Err(SparqlError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let result = TabularResult::from_json(&body)?;
        debug!(kind = %query.kind(), rows = result.len(), "query returned");
        Ok(result)
    }
}
