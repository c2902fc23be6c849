pub use serde::{Deserialize, Serialize};

use chrono::{DateTime, Utc};

use crate::registry::models::LinkStats;

/// Body of `POST /shorturls`.
#[derive(Deserialize, Clone, Debug)]
pub struct CreateShortUrlRequest {
    pub url: String,
    pub validity: Option<i64>,
    pub shortcode: Option<String>,
}

/// Body of a successful `POST /shorturls` (201).
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateShortUrlResponse {
    pub short_link: String,
    pub expiry: DateTime<Utc>,
}

/// Error body shared by every route.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

/// One element of `GET /api/urls`.
#[derive(Serialize, Clone, Debug)]
pub struct UrlListItem {
    #[serde(rename = "shortLink")]
    pub short_link: String,
    #[serde(flatten)]
    pub stats: LinkStats,
}
