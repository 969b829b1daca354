pub mod error;

pub use error::{FeedError, Result};

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::header::CACHE_CONTROL;
use serde_json::Value;
use tracing::warn;
use url::Url;

use streamic_common::RawItem;

/// HTTP client for the static feed files. Feeds regenerate on an hourly
/// cadence, so every request carries an hour-resolution `ts` query parameter
/// plus a `Cache-Control: no-cache` header; an intermediary copy older than
/// the current hour is never served.
pub struct FeedClient {
    client: reqwest::Client,
    base_url: String,
}

impl FeedClient {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch one feed and return its items. `target` is either a path
    /// relative to the configured feed origin (`data/newsroom.json`) or an
    /// absolute URL taken verbatim from a mount declaration.
    ///
    /// A payload that parses as JSON but is not an array degrades to an
    /// empty feed; array entries that are not objects are skipped. Transport
    /// failures, non-success statuses and unparseable bodies are returned as
    /// typed errors for the page layer to turn into placeholders.
    pub async fn fetch_items(&self, target: &str) -> Result<Vec<RawItem>> {
        let url = self.feed_url(target, Utc::now())?;

        let resp = self
            .client
            .get(url.clone())
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = resp.text().await?;
        let value: Value =
            serde_json::from_str(&body).map_err(|e| FeedError::Decode(e.to_string()))?;

        let Value::Array(entries) = value else {
            warn!(url = %url, "Feed payload is not an array, treating as empty");
            return Ok(Vec::new());
        };

        let total = entries.len();
        let items: Vec<RawItem> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect();
        if items.len() < total {
            warn!(
                url = %url,
                skipped = total - items.len(),
                "Skipped malformed feed entries"
            );
        }

        Ok(items)
    }

    fn feed_url(&self, target: &str, now: DateTime<Utc>) -> Result<Url> {
        let absolute = if target.starts_with("http://") || target.starts_with("https://") {
            target.to_string()
        } else {
            format!("{}/{}", self.base_url, target.trim_start_matches('/'))
        };

        let mut url = Url::parse(&absolute).map_err(|e| FeedError::InvalidUrl {
            url: absolute.clone(),
            reason: e.to_string(),
        })?;
        url.query_pairs_mut()
            .append_pair("ts", &cache_bust_token(now));
        Ok(url)
    }
}

/// Hour-resolution UTC token appended to every feed request, matching the
/// producer's regeneration cadence.
pub fn cache_bust_token(now: DateTime<Utc>) -> String {
    now.format("%Y%m%d%H").to_string()
}
