//! Fan-out/fan-in over all configured sources.
//!
//! Every fetcher runs as its own task. Results land in a slot per fetcher and
//! are only inspected once every task has finished, so the merged order (and
//! which fatal error wins) depends on configuration order, never on network
//! timing.
use birdfeed_common::{BirdfeedError, Result};
use tokio::task::JoinSet;

use crate::fetch::{FetchError, Fetcher};
use crate::record::TweetRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    Fetched { count: usize },
    /// The source failed non-fatally and contributed nothing.
    Degraded { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub source: String,
    pub outcome: SourceOutcome,
}

#[derive(Debug, Default)]
pub struct Aggregated {
    pub records: Vec<TweetRecord>,
    pub reports: Vec<SourceReport>,
}

type Slot = (String, std::result::Result<Vec<TweetRecord>, FetchError>);

/// Run all fetchers concurrently and concatenate their output in fetcher order.
pub async fn aggregate(fetchers: Vec<Box<dyn Fetcher>>) -> Result<Aggregated> {
    let mut slots: Vec<Option<Slot>> = Vec::new();
    slots.resize_with(fetchers.len(), || None);

    let mut tasks = JoinSet::new();
    for (idx, fetcher) in fetchers.into_iter().enumerate() {
        tasks.spawn(async move {
            let label = fetcher.label();
            let result = fetcher.fetch().await;
            (idx, label, result)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        let (idx, label, result) = joined.map_err(|e| BirdfeedError::Task(e.to_string()))?;
        slots[idx] = Some((label, result));
    }

    let mut out = Aggregated::default();
    for (label, result) in slots.into_iter().flatten() {
        match result {
            Ok(records) => {
                tracing::info!(source = %label, count = records.len(), "source fetched");
                out.reports.push(SourceReport {
                    source: label,
                    outcome: SourceOutcome::Fetched {
                        count: records.len(),
                    },
                });
                out.records.extend(records);
            }
            Err(err) if !err.is_fatal() => {
                tracing::warn!(source = %label, error = %err, "source degraded to empty");
                out.reports.push(SourceReport {
                    source: label,
                    outcome: SourceOutcome::Degraded {
                        reason: err.to_string(),
                    },
                });
            }
            Err(FetchError::ListNotFound { name }) => {
                tracing::error!(source = %label, "requested list does not exist");
                return Err(BirdfeedError::ListNotFound { name });
            }
            Err(FetchError::ListEnumeration(err) | FetchError::Upstream(err)) => {
                tracing::error!(source = %label, error = %err, "could not enumerate lists");
                return Err(BirdfeedError::ListEnumeration(err.to_string()));
            }
        }
    }

    Ok(out)
}
