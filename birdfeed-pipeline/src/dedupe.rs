use std::collections::{HashMap, HashSet};

use crate::record::TweetRecord;

/// Keep the first occurrence of every id.
pub fn dedupe_by_id(records: Vec<TweetRecord>) -> Vec<TweetRecord> {
    let mut seen: HashSet<String> = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|r| seen.insert(r.id.clone()))
        .collect()
}

/// Keep one record per distinct text: the earliest created one.
///
/// Equal timestamps keep the record seen first. Survivors come out in the
/// order their text first appeared.
pub fn dedupe_by_text(records: Vec<TweetRecord>) -> Vec<TweetRecord> {
    let mut slot_for_text: HashMap<String, usize> = HashMap::with_capacity(records.len());
    let mut kept: Vec<TweetRecord> = Vec::with_capacity(records.len());

    for record in records {
        match slot_for_text.get(&record.text).copied() {
            Some(slot) => {
                if record.created_at < kept[slot].created_at {
                    kept[slot] = record;
                }
            }
            None => {
                slot_for_text.insert(record.text.clone(), kept.len());
                kept.push(record);
            }
        }
    }

    kept
}

/// Id dedup followed by text dedup.
pub fn dedupe(records: Vec<TweetRecord>) -> Vec<TweetRecord> {
    dedupe_by_text(dedupe_by_id(records))
}
