//! In-process transport serving canned results

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use super::builder::{QueryKind, SparqlQuery};
use super::http::SparqlTransport;
use super::results::TabularResult;
use super::{SparqlError, SparqlResult};

#[derive(Debug, Clone)]
enum Outcome {
    Rows(TabularResult),
    Failure { status: u16, body: String },
}

/// Transport answering each [`QueryKind`] with a fixed result.
///
/// Kinds without a registered outcome return an empty result. Every query is
/// recorded so callers can inspect what was sent.
#[derive(Debug, Default)]
pub struct FixtureTransport {
    outcomes: Mutex<HashMap<QueryKind, Outcome>>,
    executed: Mutex<Vec<SparqlQuery>>,
    latency: Option<Duration>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl FixtureTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `kind` with `result`
    pub fn with_result(self, kind: QueryKind, result: TabularResult) -> Self {
        self.set_result(kind, result);
        self
    }

    /// Fail `kind` as if the endpoint returned `status`
    pub fn with_failure(self, kind: QueryKind, status: u16, body: impl Into<String>) -> Self {
        self.set_failure(kind, status, body);
        self
    }

    /// Delay every answer, so concurrent callers overlap
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn set_result(&self, kind: QueryKind, result: TabularResult) {
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(kind, Outcome::Rows(result));
    }

    pub fn set_failure(&self, kind: QueryKind, status: u16, body: impl Into<String>) {
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(kind, Outcome::Failure { status, body: body.into() });
    }

    /// Queries executed so far, in start order
    pub fn executed(&self) -> Vec<SparqlQuery> {
        self.executed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Highest number of queries that were in flight at the same time
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SparqlTransport for FixtureTransport {
    async fn execute(&self, query: &SparqlQuery) -> SparqlResult<TabularResult> {
        self.executed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(query.clone());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let outcome = self
            .outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&query.kind())
            .cloned();

        match outcome {
            Some(Outcome::Rows(result)) => Ok(result),
            Some(Outcome::Failure { status, body }) => Err(SparqlError::Status { status, body }),
            None => Ok(TabularResult::default()),
        }
    }
}
