use regex::Regex;
use std::sync::LazyLock;

use crate::query::FilterConfig;
use crate::record::TweetRecord;

/// `RT @handle: ` at the very start; handles are 1-15 ASCII word characters.
static RETWEET_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^RT @[A-Za-z0-9_]{1,15}: ").expect("retweet pattern compiles")
});

pub fn is_retweet(text: &str) -> bool {
    RETWEET_MARKER.is_match(text)
}

fn keep(record: &TweetRecord, config: &FilterConfig) -> bool {
    (config.allow_retweets || !is_retweet(&record.text))
        && config.accepts_language(&record.language_code)
}

/// Drop retweets (unless allowed) and records outside the accepted languages,
/// preserving the relative order of what remains.
pub fn filter(records: Vec<TweetRecord>, config: &FilterConfig) -> Vec<TweetRecord> {
    records.into_iter().filter(|r| keep(r, config)).collect()
}
