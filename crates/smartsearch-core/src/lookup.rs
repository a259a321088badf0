//! Collaborator traits: where results come from and where selections go.

use crate::error::LookupError;
use crate::types::SearchResult;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Asynchronous source of results for a query.
///
/// Implementations must tolerate rapid, repeated calls. The controller
/// cancels a call by dropping its future when the query is superseded, and
/// enforces no timeout of its own; wrap with [`TimeoutLookup`] if needed.
#[async_trait]
pub trait Lookup: Send + Sync {
    /// Return the ordered matches for `query`.
    async fn lookup(&self, query: &str) -> Result<Vec<SearchResult>, LookupError>;
}

/// Receives committed selections. Called exactly once per selection.
pub trait SelectionSink: Send + Sync {
    /// A result was selected by keyboard or pointer.
    fn on_select(&self, result: &SearchResult);
}

impl<F> SelectionSink for F
where
    F: Fn(&SearchResult) + Send + Sync,
{
    fn on_select(&self, result: &SearchResult) {
        self(result)
    }
}

/// Selection sink that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSelection;

impl SelectionSink for NoopSelection {
    fn on_select(&self, _result: &SearchResult) {}
}

/// [`Lookup`] backed by an async closure.
pub struct FnLookup<F> {
    f: F,
}

impl<F> FnLookup<F> {
    /// Wrap `f`.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F, Fut> Lookup for FnLookup<F>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<SearchResult>, LookupError>> + Send + 'static,
{
    async fn lookup(&self, query: &str) -> Result<Vec<SearchResult>, LookupError> {
        (self.f)(query.to_string()).await
    }
}

/// Build a shared [`Lookup`] from an async closure.
pub fn lookup_fn<F, Fut>(f: F) -> Arc<dyn Lookup>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<SearchResult>, LookupError>> + Send + 'static,
{
    Arc::new(FnLookup::new(f))
}

/// Caller-side timeout around another lookup.
pub struct TimeoutLookup {
    inner: Arc<dyn Lookup>,
    timeout: Duration,
}

impl TimeoutLookup {
    /// Fail lookups on `inner` that take longer than `timeout`.
    pub fn new(inner: Arc<dyn Lookup>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl Lookup for TimeoutLookup {
    async fn lookup(&self, query: &str) -> Result<Vec<SearchResult>, LookupError> {
        match tokio::time::timeout(self.timeout, self.inner.lookup(query)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                debug!(query, timeout_ms = self.timeout.as_millis() as u64, "lookup timed out");
                Err(LookupError::Timeout(self.timeout.as_millis() as u64))
            }
        }
    }
}
