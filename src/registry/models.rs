use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Referer recorded when the visitor did not send one.
pub const DIRECT_REFERER: &str = "Direct";

/// One shortcode and everything the registry knows about it.
///
/// Records are never deleted; expiry is a predicate on `expiry_at`, not a
/// removal event. `click_count` only ever grows, and only through
/// [`Registry::resolve`](crate::registry::Registry::resolve).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlRecord {
    pub shortcode: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "expiryDate")]
    pub expiry_at: DateTime<Utc>,
    #[serde(rename = "clicks")]
    pub click_count: u64,
}

impl UrlRecord {
    /// Expiry is strict: a record is still live at exactly `expiry_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expiry_at
    }
}

/// One successful resolution of a shortcode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickEvent {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "ip")]
    pub source_ip: String,
    pub user_agent: String,
    pub referer: String,
}

/// Visit metadata supplied by the calling layer per resolution.
#[derive(Debug, Clone, Default)]
pub struct VisitMetadata {
    pub source_ip: String,
    pub user_agent: String,
    pub referer: Option<String>,
}

impl VisitMetadata {
    pub fn into_event(self, timestamp: DateTime<Utc>) -> ClickEvent {
        ClickEvent {
            timestamp,
            source_ip: self.source_ip,
            user_agent: self.user_agent,
            referer: self.referer.unwrap_or_else(|| DIRECT_REFERER.to_string()),
        }
    }
}

/// Result of a successful `create`: the caller builds the shareable link.
#[derive(Debug, Clone)]
pub struct CreatedLink {
    pub shortcode: String,
    pub expiry_at: DateTime<Utc>,
}

/// Point-in-time snapshot of a record together with its click history.
///
/// The snapshot is consistent (the count always matches what the history
/// showed at capture time) but goes stale as soon as concurrent resolutions
/// continue.
#[derive(Debug, Clone, Serialize)]
pub struct LinkStats {
    #[serde(flatten)]
    pub record: UrlRecord,
    #[serde(rename = "clickDetails")]
    pub clicks: Vec<ClickEvent>,
}
