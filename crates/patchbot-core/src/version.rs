// crates/patchbot-core/src/version.rs
//
// VersionTag: the bot's normalised patch identifier, e.g. "25-16".
//
// Tags are derived on every resolution call. The season part comes from
// configuration; the feed only ever contributes the minor component.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BotError;

/// Upper bound for the month-based estimate (two patches a month, 24 a year).
const MAX_ESTIMATED_MINOR: u32 = 24;

/// A patch identifier of the form `"{major}-{zero-padded-minor}"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionTag(String);

impl VersionTag {
    /// Wrap a trusted, already-formatted tag (e.g. a configured fallback).
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Build a tag from a season prefix and a minor component, left-padding
    /// the minor with zeros to width 2.
    pub fn from_minor(season: &str, minor: &str) -> Self {
        Self(format!("{}-{:0>2}", season, minor))
    }

    /// Derive a tag from a version-feed entry such as `"15.7.1"`.
    ///
    /// Takes the second dot-separated component as-is and pads it. Returns
    /// `None` only when the entry has fewer than two parts.
    pub fn from_feed_entry(season: &str, entry: &str) -> Option<Self> {
        let minor = entry.split('.').nth(1)?;
        Some(Self::from_minor(season, minor))
    }

    /// Month-based estimate used when the feed is unreachable:
    /// `min(month * 2, 24)`, zero-padded.
    pub fn month_estimate(season: &str, month: u32) -> Self {
        let minor = (month * 2).min(MAX_ESTIMATED_MINOR);
        Self(format!("{}-{:02}", season, minor))
    }

    /// Parse a user-supplied tag. Accepts `"25-16"`, `"25-6"` and `"25.16"`;
    /// the result always uses the dash form with a two-digit minor.
    pub fn parse(input: &str) -> Result<Self, BotError> {
        let trimmed = input.trim();
        let parts: Vec<&str> = trimmed.split(|c| c == '-' || c == '.').collect();

        let is_number = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
        match parts.as_slice() {
            [major, minor] if is_number(major) && is_number(minor) => {
                Ok(Self::from_minor(major, minor))
            }
            _ => Err(BotError::InvalidArgument(format!(
                "'{}' is not a patch version (expected e.g. 25-16)",
                trimmed
            ))),
        }
    }

    /// The tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
