//! SPARQL client layer
//!
//! Turns catalog parameters into query text, ships it to the configured
//! endpoint and reshapes the `application/sparql-results+json` reply into
//! a typed tabular form.
//!
//! # Example
//!
//! ```rust,no_run
//! use steamgraph::config::GatewayConfig;
//! use steamgraph::sparql::{HttpGateway, QueryBuilder, SparqlTransport};
//!
//! # async fn run() -> steamgraph::sparql::SparqlResult<()> {
//! let gateway = HttpGateway::new(GatewayConfig::default())?;
//! let result = gateway.execute(&QueryBuilder::search("portal", 20, 0)).await?;
//! for row in &result.rows {
//!     println!("{:?}", row.get_str("label"));
//! }
//! # Ok(())
//! # }
//! ```

mod builder;
pub mod coerce;
mod fixture;
mod http;
pub mod namespace;
mod results;

pub use builder::{escape_keyword, QueryBuilder, QueryKind, SparqlQuery, LIST_SEPARATOR};
pub use fixture::FixtureTransport;
pub use http::{HttpGateway, SparqlTransport};
pub use results::{Cell, CellKind, Row, TabularResult};

use thiserror::Error;

/// SPARQL errors
#[derive(Error, Debug)]
pub enum SparqlError {
    /// Network failure reaching the endpoint
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("Endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Reply body is not a SPARQL results document
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Query text is not valid SPARQL
    #[error("Syntax error: {0}")]
    Syntax(String),

    /// Gateway misconfiguration (bad endpoint URL, client setup)
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type SparqlResult<T> = Result<T, SparqlError>;
