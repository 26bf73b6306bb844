use serde::{Deserialize, Serialize};

/// One entry of `lists/list.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwitterList {
    pub id_str: String,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub member_count: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id_str: Option<String>,
    /// Display name.
    pub name: String,
    /// Handle, without the leading `@`.
    pub screen_name: String,
}

/// A v1.1 status as returned by list timelines and search.
///
/// `created_at` stays a string here (`Wed Oct 10 20:19:24 +0000 2018`);
/// parsing it is the consumer's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Status {
    pub id_str: String,
    pub text: String,
    pub created_at: String,
    #[serde(default)]
    pub lang: Option<String>,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub statuses: Vec<Status>,
    #[serde(default)]
    pub search_metadata: Option<SearchMetadata>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchMetadata {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next_results: Option<String>,
}
