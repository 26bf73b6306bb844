//! Thin wrapper around the Twitter REST v1.1 endpoints birdfeed reads.
//!
//! Handles bearer auth and request parameter shaping before delegating to the
//! shared HTTP client. Requests are never retried: a failed call surfaces as
//! an [`UpstreamError`] and the caller decides whether that is fatal.
use async_trait::async_trait;
use birdfeed_http::{Auth, HttpClient, HttpError, RequestOpts};
use std::borrow::Cow;
use std::time::Duration;

use crate::twitter::types::{SearchResponse, Status, TwitterList};
use crate::twitter::upstream::{TwitterUpstream, UpstreamError};

pub const DEFAULT_BASE_URL: &str = "https://api.twitter.com";
/// Search rejects anything above this.
pub const SEARCH_COUNT_CEILING: u32 = 100;

#[derive(Clone)]
pub struct TwitterApi {
    http: HttpClient,
    bearer: String,
    screen_name: Option<String>,
}

impl TwitterApi {
    pub fn new(bearer_token: String) -> Result<Self, HttpError> {
        Self::with_base_url(DEFAULT_BASE_URL, bearer_token)
    }

    /// Point the client somewhere other than `api.twitter.com` (proxies, mocks).
    pub fn with_base_url(base_url: &str, bearer_token: String) -> Result<Self, HttpError> {
        let http = HttpClient::new(base_url)?;
        Ok(Self {
            http,
            bearer: bearer_token,
            screen_name: None,
        })
    }

    /// Owner whose lists `lists/list.json` enumerates. App-only bearer tokens
    /// have no account of their own, so list lookups need this set.
    pub fn with_screen_name(mut self, screen_name: Option<String>) -> Self {
        self.screen_name = screen_name.filter(|s| !s.trim().is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = self.http.with_timeout(timeout);
        self
    }

    fn opts<'a>(&'a self, query: Vec<(&'a str, Cow<'a, str>)>) -> RequestOpts<'a> {
        RequestOpts {
            auth: Some(Auth::Bearer(&self.bearer)),
            query: Some(query),
            ..Default::default()
        }
    }

    pub async fn get_lists(&self) -> Result<Vec<TwitterList>, HttpError> {
        let mut params: Vec<(&str, Cow<'_, str>)> = Vec::new();
        if let Some(owner) = &self.screen_name {
            params.push(("screen_name", owner.as_str().into()));
        }
        let lists: Vec<TwitterList> = self
            .http
            .get_json("1.1/lists/list.json", self.opts(params))
            .await?;
        tracing::debug!(count = lists.len(), "twitter.lists");
        Ok(lists)
    }

    pub async fn get_list_statuses(
        &self,
        list_id: &str,
        count: u32,
    ) -> Result<Vec<Status>, HttpError> {
        let params: Vec<(&str, Cow<'_, str>)> = vec![
            ("list_id", list_id.into()),
            ("count", count.to_string().into()),
        ];
        let statuses: Vec<Status> = self
            .http
            .get_json("1.1/lists/statuses.json", self.opts(params))
            .await?;
        tracing::debug!(list_id, count = statuses.len(), "twitter.list_statuses");
        Ok(statuses)
    }

    /// `result_type=recent` keeps the upstream from reordering or curating
    /// results by relevance.
    pub async fn search_recent(
        &self,
        query: &str,
        count: u32,
        lang: Option<&str>,
    ) -> Result<SearchResponse, HttpError> {
        let count = count.clamp(1, SEARCH_COUNT_CEILING);
        let mut params: Vec<(&str, Cow<'_, str>)> = vec![
            ("q", query.into()),
            ("result_type", "recent".into()),
            ("count", count.to_string().into()),
        ];
        if let Some(lang) = lang {
            params.push(("lang", lang.into()));
        }
        let resp: SearchResponse = self
            .http
            .get_json("1.1/search/tweets.json", self.opts(params))
            .await?;
        tracing::debug!(query, count = resp.statuses.len(), "twitter.search");
        Ok(resp)
    }
}

#[async_trait]
impl TwitterUpstream for TwitterApi {
    async fn lists(&self) -> Result<Vec<TwitterList>, UpstreamError> {
        Ok(self.get_lists().await?)
    }

    async fn list_statuses(
        &self,
        list_id: &str,
        count: u32,
    ) -> Result<Vec<Status>, UpstreamError> {
        Ok(self.get_list_statuses(list_id, count).await?)
    }

    async fn search(
        &self,
        query: &str,
        count: u32,
        lang: Option<&str>,
    ) -> Result<Vec<Status>, UpstreamError> {
        Ok(self.search_recent(query, count, lang).await?.statuses)
    }
}
