//! Projection of surviving tweets into feed entries.
use chrono::{DateTime, Utc};

use crate::record::TweetRecord;

/// Link advertised at the feed level.
pub const PROJECT_URL: &str = "https://github.com/Digital-Contraptions-Imaginarium/twitter2newsbeuter";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedAuthor {
    pub name: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub id: String,
    pub author: FeedAuthor,
    pub title: String,
    pub link: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedDocument {
    pub id: String,
    pub title: String,
    pub link: String,
    /// Newest entry date; `None` for an empty feed.
    pub updated: Option<DateTime<Utc>>,
    pub entries: Vec<FeedEntry>,
}

pub fn map_entry(record: &TweetRecord) -> FeedEntry {
    let handle = &record.author.handle;
    FeedEntry {
        id: record.id.clone(),
        author: FeedAuthor {
            name: format!("{} (@{})", record.author.display_name, handle),
            link: format!("https://twitter/{handle}"),
        },
        title: record.text.clone(),
        link: format!("https://twitter.com/{handle}/status/{}", record.id),
        date: record.created_at,
    }
}

/// Map records, already in output order, into a feed named `feed_name`.
pub fn map_feed(feed_name: &str, records: &[TweetRecord]) -> FeedDocument {
    FeedDocument {
        id: feed_name.to_string(),
        title: feed_name.to_string(),
        link: PROJECT_URL.to_string(),
        updated: records.iter().map(|r| r.created_at).max(),
        entries: records.iter().map(map_entry).collect(),
    }
}
