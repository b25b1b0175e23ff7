// crates/patchbot-fetch/src/versions.rs
//
// Version resolver: version feed -> VersionTag.
//
// Only element 0 of the feed is consulted; the upstream list is already
// newest-first and is not re-sorted here.

use std::time::Duration;

use chrono::Datelike;
use patchbot_core::{FallbackPolicy, FeedConfig, VersionTag};

use crate::http::HttpFetcher;

/// Derive a tag from a raw feed body.
///
/// Returns `None` when the body is not a JSON array, the array is empty,
/// element 0 is not a string, or it has no second dot-separated part.
pub fn tag_from_feed(body: &str, season: &str) -> Option<VersionTag> {
    let versions: serde_json::Value = serde_json::from_str(body).ok()?;
    let newest = versions.as_array()?.first()?.as_str()?;
    VersionTag::from_feed_entry(season, newest)
}

/// Resolves the newest patch tag from the configured version feed.
#[derive(Debug, Clone)]
pub struct VersionResolver {
    fetcher: HttpFetcher,
    feed: FeedConfig,
}

impl VersionResolver {
    pub fn new(fetcher: HttpFetcher, feed: FeedConfig) -> Self {
        Self { fetcher, feed }
    }

    /// Resolve the newest tag. Never fails: any fetch or parse problem
    /// yields the configured fallback.
    pub async fn resolve(&self) -> VersionTag {
        let timeout = Duration::from_secs(self.feed.timeout_secs);
        match self.fetcher.get_text(&self.feed.versions_url, timeout).await {
            Ok(body) => match tag_from_feed(&body, &self.feed.season_prefix) {
                Some(tag) => {
                    tracing::debug!("Resolved latest version {}", tag);
                    tag
                }
                None => {
                    tracing::warn!(
                        "Version feed at {} had no usable entry, using fallback",
                        self.feed.versions_url
                    );
                    self.fallback()
                }
            },
            Err(e) => {
                tracing::warn!(
                    "Version feed at {} unavailable: {}. Using fallback",
                    self.feed.versions_url,
                    e
                );
                self.fallback()
            }
        }
    }

    /// The tag returned when the feed cannot be used.
    pub fn fallback(&self) -> VersionTag {
        match self.feed.fallback {
            FallbackPolicy::Fixed => VersionTag::new(self.feed.fallback_tag.clone()),
            FallbackPolicy::MonthEstimate => {
                let month = chrono::Local::now().month();
                VersionTag::month_estimate(&self.feed.season_prefix, month)
            }
        }
    }
}
