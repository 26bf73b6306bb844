use crate::record::TweetRecord;

/// Most recent first. Stable: equal timestamps keep their relative order.
pub fn sort_newest_first(records: &mut [TweetRecord]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Author;
    use chrono::{TimeZone, Utc};

    fn record(id: &str, hour: u32) -> TweetRecord {
        TweetRecord {
            id: id.into(),
            text: format!("text {id}"),
            created_at: Utc.with_ymd_and_hms(2020, 1, 1, hour, 0, 0).unwrap(),
            language_code: "en".into(),
            author: Author {
                display_name: "Alice".into(),
                handle: "alice".into(),
            },
        }
    }

    #[test]
    fn descending_and_stable() {
        let mut records = vec![
            record("a", 1),
            record("b", 3),
            record("c", 2),
            record("d", 3),
            record("e", 1),
        ];
        sort_newest_first(&mut records);
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d", "c", "a", "e"]);
    }
}
