#![allow(dead_code)]

use async_trait::async_trait;
use birdfeed_social::twitter::{Status, TwitterList, TwitterUpstream, UpstreamError, User};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// In-memory upstream serving canned answers.
///
/// Lists, list timelines and searches that were not registered fail with
/// [`UpstreamError::Unavailable`].
#[derive(Default)]
pub struct FakeUpstream {
    lists: Option<Vec<TwitterList>>,
    timelines: HashMap<String, Vec<Status>>,
    searches: HashMap<String, Vec<Status>>,
    delays: HashMap<String, Duration>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list(mut self, id: &str, name: &str, statuses: Vec<Status>) -> Self {
        self.lists.get_or_insert_with(Vec::new).push(TwitterList {
            id_str: id.into(),
            name: name.into(),
            slug: None,
            full_name: None,
            member_count: None,
        });
        self.timelines.insert(id.into(), statuses);
        self
    }

    /// A list that resolves but whose timeline call fails.
    pub fn with_broken_list(mut self, id: &str, name: &str) -> Self {
        self.lists.get_or_insert_with(Vec::new).push(TwitterList {
            id_str: id.into(),
            name: name.into(),
            slug: None,
            full_name: None,
            member_count: None,
        });
        self
    }

    pub fn with_search(mut self, query: &str, statuses: Vec<Status>) -> Self {
        self.searches.insert(query.into(), statuses);
        self
    }

    /// Delay the answer for a list id or a search query.
    pub fn with_delay(mut self, key: &str, delay: Duration) -> Self {
        self.delays.insert(key.into(), delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    async fn pause(&self, key: &str) {
        if let Some(delay) = self.delays.get(key) {
            tokio::time::sleep(*delay).await;
        }
    }
}

#[async_trait]
impl TwitterUpstream for FakeUpstream {
    async fn lists(&self) -> Result<Vec<TwitterList>, UpstreamError> {
        self.record("lists".into());
        self.lists
            .clone()
            .ok_or_else(|| UpstreamError::Unavailable("lists/list".into()))
    }

    async fn list_statuses(
        &self,
        list_id: &str,
        count: u32,
    ) -> Result<Vec<Status>, UpstreamError> {
        self.record(format!("list_statuses:{list_id}:{count}"));
        self.pause(list_id).await;
        self.timelines
            .get(list_id)
            .cloned()
            .ok_or_else(|| UpstreamError::Unavailable(format!("lists/statuses {list_id}")))
    }

    async fn search(
        &self,
        query: &str,
        count: u32,
        lang: Option<&str>,
    ) -> Result<Vec<Status>, UpstreamError> {
        self.record(format!("search:{query}:{count}:{}", lang.unwrap_or("-")));
        self.pause(query).await;
        self.searches
            .get(query)
            .cloned()
            .ok_or_else(|| UpstreamError::Unavailable(format!("search {query}")))
    }
}

pub fn status(id: &str, text: &str, created_at: &str, lang: &str, handle: &str) -> Status {
    Status {
        id_str: id.into(),
        text: text.into(),
        created_at: created_at.into(),
        lang: Some(lang.into()),
        user: User {
            id_str: None,
            name: format!("{handle} display"),
            screen_name: handle.into(),
        },
    }
}
