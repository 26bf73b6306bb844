//! The seam between the feed pipeline and whatever serves tweets.
use async_trait::async_trait;
use birdfeed_http::HttpError;

use crate::twitter::types::{Status, TwitterList};

/// Failure talking to the upstream API.
///
/// Distinct from an empty `Ok(vec![])`, which is a successful fetch that
/// happened to return nothing.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("upstream unavailable: {0}")]
    Unavailable(String),
}

/// The three upstream operations the pipeline needs.
#[async_trait]
pub trait TwitterUpstream: Send + Sync {
    /// Lists owned by the configured account.
    async fn lists(&self) -> Result<Vec<TwitterList>, UpstreamError>;

    /// Up to `count` recent statuses of the list with id `list_id`.
    async fn list_statuses(&self, list_id: &str, count: u32)
    -> Result<Vec<Status>, UpstreamError>;

    /// Recent (not "popular") statuses matching `query`, optionally restricted
    /// to one language.
    async fn search(
        &self,
        query: &str,
        count: u32,
        lang: Option<&str>,
    ) -> Result<Vec<Status>, UpstreamError>;
}
