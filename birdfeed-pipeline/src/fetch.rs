//! Source fetchers: one per configured list or search.
//!
//! Each fetcher pulls a single bounded batch, normalizes it into
//! [`TweetRecord`]s and applies the filter stage before handing it back.
//! Errors are returned, never swallowed here; the aggregator decides which
//! ones are fatal.
use async_trait::async_trait;
use birdfeed_social::twitter::{TwitterUpstream, UpstreamError};
use std::sync::Arc;

use crate::filter::filter;
use crate::query::{FilterConfig, SourceQuery};
use crate::record::{normalize_statuses, TweetRecord};

/// Upper bound on statuses requested from a list timeline.
pub const MAX_LIST_COUNT: u32 = 1000;
/// Upper bound on statuses requested from search; upstream ignores anything higher.
pub const MAX_SEARCH_COUNT: u32 = 100;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("the specified list does not exist: {name}")]
    ListNotFound { name: String },

    #[error("failed to enumerate lists: {0}")]
    ListEnumeration(#[source] UpstreamError),

    #[error("upstream fetch failed: {0}")]
    Upstream(#[source] UpstreamError),
}

impl FetchError {
    /// Whether this failure must abort the run rather than degrade the source to nothing.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Upstream(_))
    }
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Short human-readable name of the source, used in logs and reports.
    fn label(&self) -> String;

    async fn fetch(&self) -> Result<Vec<TweetRecord>, FetchError>;
}

pub struct ListFetcher {
    upstream: Arc<dyn TwitterUpstream>,
    name: String,
    filter: Arc<FilterConfig>,
}

impl ListFetcher {
    pub fn new(upstream: Arc<dyn TwitterUpstream>, name: String, filter: Arc<FilterConfig>) -> Self {
        Self {
            upstream,
            name,
            filter,
        }
    }
}

#[async_trait]
impl Fetcher for ListFetcher {
    fn label(&self) -> String {
        SourceQuery::list(self.name.as_str()).to_string()
    }

    async fn fetch(&self) -> Result<Vec<TweetRecord>, FetchError> {
        let lists = self
            .upstream
            .lists()
            .await
            .map_err(FetchError::ListEnumeration)?;

        let wanted = self.name.to_lowercase();
        let list = lists
            .iter()
            .find(|l| l.name.to_lowercase() == wanted)
            .ok_or_else(|| FetchError::ListNotFound {
                name: self.name.clone(),
            })?;
        tracing::debug!(list = %self.name, list_id = %list.id_str, "list resolved");

        let statuses = self
            .upstream
            .list_statuses(&list.id_str, MAX_LIST_COUNT)
            .await
            .map_err(FetchError::Upstream)?;

        let label = self.label();
        Ok(filter(normalize_statuses(statuses, &label), &self.filter))
    }
}

pub struct SearchFetcher {
    upstream: Arc<dyn TwitterUpstream>,
    query: String,
    filter: Arc<FilterConfig>,
}

impl SearchFetcher {
    pub fn new(upstream: Arc<dyn TwitterUpstream>, query: String, filter: Arc<FilterConfig>) -> Self {
        Self {
            upstream,
            query,
            filter,
        }
    }
}

#[async_trait]
impl Fetcher for SearchFetcher {
    fn label(&self) -> String {
        SourceQuery::search(self.query.as_str()).to_string()
    }

    async fn fetch(&self) -> Result<Vec<TweetRecord>, FetchError> {
        let statuses = self
            .upstream
            .search(&self.query, MAX_SEARCH_COUNT, self.filter.single_language())
            .await
            .map_err(FetchError::Upstream)?;

        let label = self.label();
        Ok(filter(normalize_statuses(statuses, &label), &self.filter))
    }
}

/// Build the fetcher matching a source query.
pub fn fetcher_for(
    query: &SourceQuery,
    upstream: Arc<dyn TwitterUpstream>,
    filter: Arc<FilterConfig>,
) -> Box<dyn Fetcher> {
    match query {
        SourceQuery::List { name } => Box::new(ListFetcher::new(upstream, name.clone(), filter)),
        SourceQuery::Search { query } => {
            Box::new(SearchFetcher::new(upstream, query.clone(), filter))
        }
    }
}
