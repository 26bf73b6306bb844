//! The fetch → merge → dedupe → sort → render pipeline behind birdfeed.
//!
//! A run takes a [`FeedRequest`] (feed name, sources, filter settings) and an
//! upstream implementing [`TwitterUpstream`], and produces a [`FeedDocument`]
//! ready for [`render::render_atom`]. Data flows strictly forward:
//!
//! 1. [`fetch`]: one fetcher per list or search, each filtered on its own
//! 2. [`aggregate`]: all fetchers run concurrently, output concatenated in
//!    configuration order
//! 3. [`dedupe`]: by id, then by text keeping the earliest record
//! 4. [`sort`]: newest first
//! 5. [`feed`]: projection into feed entries
//!
//! Nothing is cached or persisted between runs; given the same upstream
//! answers, a run always produces the same document.
use birdfeed_common::{BirdfeedError, Result};
use birdfeed_social::twitter::TwitterUpstream;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::Instrument;

pub mod aggregate;
pub mod dedupe;
pub mod feed;
pub mod fetch;
pub mod filter;
pub mod query;
pub mod record;
pub mod render;
pub mod sort;

pub use aggregate::{SourceOutcome, SourceReport};
pub use feed::{FeedAuthor, FeedDocument, FeedEntry};
pub use query::{FilterConfig, SourceQuery};
pub use record::{Author, TweetRecord};

/// Everything a run needs from the invoking context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRequest {
    pub feed_name: String,
    pub sources: Vec<SourceQuery>,
    pub filter: FilterConfig,
}

impl FeedRequest {
    /// Checked before anything touches the network.
    pub fn validate(&self) -> Result<()> {
        if self.feed_name.trim().is_empty() {
            return Err(BirdfeedError::Validation("a feed name is required".into()));
        }
        for source in &self.sources {
            let blank = match source {
                SourceQuery::List { name } => name.trim().is_empty(),
                SourceQuery::Search { query } => query.trim().is_empty(),
            };
            if blank {
                return Err(BirdfeedError::Validation(format!(
                    "empty source `{source}`"
                )));
            }
        }
        Ok(())
    }
}

/// What happened along the way, for logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub sources: Vec<SourceReport>,
    /// Records out of the aggregator, already filtered per source.
    pub aggregated: usize,
    pub duplicate_ids: usize,
    pub duplicate_texts: usize,
    pub entries: usize,
}

#[derive(Debug, Clone)]
pub struct FeedRun {
    pub document: FeedDocument,
    pub report: RunReport,
}

/// Dedupe and order already aggregated records.
///
/// Returns the survivors plus how many records each dedupe phase removed.
pub fn process(records: Vec<TweetRecord>) -> (Vec<TweetRecord>, usize, usize) {
    let total = records.len();
    let distinct_ids = records
        .iter()
        .map(|r| r.id.as_str())
        .collect::<HashSet<_>>()
        .len();

    let mut survivors = dedupe::dedupe(records);
    sort::sort_newest_first(&mut survivors);

    let duplicate_texts = distinct_ids - survivors.len();
    (survivors, total - distinct_ids, duplicate_texts)
}

/// Execute a full run against `upstream`.
pub async fn run_pipeline(
    upstream: Arc<dyn TwitterUpstream>,
    request: &FeedRequest,
) -> Result<FeedRun> {
    request.validate()?;

    let span = tracing::info_span!("feed", name = %request.feed_name);
    async move {
        let filter = Arc::new(request.filter.clone());
        let fetchers = request
            .sources
            .iter()
            .map(|q| fetch::fetcher_for(q, upstream.clone(), filter.clone()))
            .collect();

        let aggregated = aggregate::aggregate(fetchers).await?;
        let total = aggregated.records.len();

        let (survivors, duplicate_ids, duplicate_texts) = process(aggregated.records);
        let document = feed::map_feed(&request.feed_name, &survivors);

        let report = RunReport {
            sources: aggregated.reports,
            aggregated: total,
            duplicate_ids,
            duplicate_texts,
            entries: document.entries.len(),
        };
        tracing::info!(
            sources = report.sources.len(),
            aggregated = report.aggregated,
            duplicate_ids = report.duplicate_ids,
            duplicate_texts = report.duplicate_texts,
            entries = report.entries,
            "pipeline finished"
        );

        Ok(FeedRun { document, report })
    }
    .instrument(span)
    .await
}
