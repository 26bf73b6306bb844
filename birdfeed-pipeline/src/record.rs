//! Normalized tweet records.
//!
//! Upstream statuses carry their timestamp as text; a [`TweetRecord`] is a new
//! immutable value built from a status with the timestamp already parsed.
use birdfeed_social::twitter::Status;
use chrono::{DateTime, Utc};

/// Language code assigned when upstream did not report one.
pub const UNDETERMINED_LANGUAGE: &str = "und";

/// `Wed Oct 10 20:19:24 +0000 2018`
const TWITTER_DATE_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub display_name: String,
    /// Without the leading `@`.
    pub handle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TweetRecord {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub language_code: String,
    pub author: Author,
}

#[derive(Debug, thiserror::Error)]
#[error("status {id} has an unparseable created_at `{raw}`")]
pub struct InvalidTimestamp {
    pub id: String,
    pub raw: String,
}

/// Parse the v1.1 `created_at` format, falling back to RFC 3339.
pub fn parse_created_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_str(raw, TWITTER_DATE_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

impl TryFrom<Status> for TweetRecord {
    type Error = InvalidTimestamp;

    fn try_from(status: Status) -> Result<Self, Self::Error> {
        let Status {
            id_str,
            text,
            created_at,
            lang,
            user,
        } = status;

        let Some(parsed) = parse_created_at(&created_at) else {
            return Err(InvalidTimestamp {
                id: id_str,
                raw: created_at,
            });
        };

        Ok(Self {
            id: id_str,
            text,
            created_at: parsed,
            language_code: lang
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| UNDETERMINED_LANGUAGE.to_string()),
            author: Author {
                display_name: user.name,
                handle: user.screen_name,
            },
        })
    }
}

/// Convert a batch of statuses, dropping (and logging) the ones whose
/// timestamp cannot be parsed since they cannot be ordered.
pub fn normalize_statuses(statuses: Vec<Status>, source: &str) -> Vec<TweetRecord> {
    statuses
        .into_iter()
        .filter_map(|status| match TweetRecord::try_from(status) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(source, error = %err, "dropping status");
                None
            }
        })
        .collect()
}
