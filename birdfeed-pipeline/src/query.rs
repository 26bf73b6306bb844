use std::collections::BTreeSet;
use std::fmt;

/// Where tweets come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceQuery {
    /// A list owned by the configured account, matched case-insensitively by name.
    List { name: String },
    Search { query: String },
}

impl SourceQuery {
    pub fn list(name: impl Into<String>) -> Self {
        Self::List { name: name.into() }
    }

    pub fn search(query: impl Into<String>) -> Self {
        Self::Search {
            query: query.into(),
        }
    }
}

impl fmt::Display for SourceQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List { name } => write!(f, "list:{name}"),
            Self::Search { query } => write!(f, "search:{query}"),
        }
    }
}

/// Filter settings fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    pub allow_retweets: bool,
    pub accepted_languages: BTreeSet<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::new(false, ["en"])
    }
}

impl FilterConfig {
    /// Language codes are trimmed and lowercased; blanks are ignored.
    pub fn new<I, S>(allow_retweets: bool, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let accepted_languages = languages
            .into_iter()
            .map(|l| l.as_ref().trim().to_ascii_lowercase())
            .filter(|l| !l.is_empty())
            .collect();
        Self {
            allow_retweets,
            accepted_languages,
        }
    }

    pub fn accepts_language(&self, code: &str) -> bool {
        self.accepted_languages.contains(code)
    }

    /// The only accepted language, if there is exactly one. Used as a search hint.
    pub fn single_language(&self) -> Option<&str> {
        let mut it = self.accepted_languages.iter();
        match (it.next(), it.next()) {
            (Some(only), None) => Some(only.as_str()),
            _ => None,
        }
    }
}
