// crates/patchbot-core/src/patch.rs
//
// PatchInfo: the result of one patch-notes page lookup.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::version::VersionTag;

/// Which of the two configured locales served the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    /// The preferred locale (tried first).
    Primary,
    /// The fallback locale.
    Secondary,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Primary => write!(f, "Primary"),
            Language::Secondary => write!(f, "Secondary"),
        }
    }
}

/// A patch-notes page and the summary image selected from it.
///
/// Produced fresh per fetch; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchInfo {
    pub version: VersionTag,
    /// URL of the page that was actually served.
    pub page_url: String,
    /// Best-scoring image, if any image scored above zero.
    pub image_url: Option<String>,
    pub language: Language,
    /// Human-readable locale tag shown to users, e.g. "PT-BR".
    pub language_tag: String,
}
