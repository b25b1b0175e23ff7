// crates/patchbot-core/src/image.rs
//
// Summary-image selection for patch-notes pages.
//
// Every `<img src>` on a page becomes a RawImage. Each one is normalised to
// an absolute URL, scored with an additive heuristic, and the highest
// scoring candidate wins. Scoring is a pure function of (url, alt, rules):
// no randomness and no state carried between pages.

use serde::{Deserialize, Serialize};

/// An `<img>` element as found in the page, before normalisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage {
    /// The `src` attribute, verbatim.
    pub src: String,
    /// The `alt` attribute, or empty when absent.
    pub alt: String,
}

impl RawImage {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
        }
    }
}

/// A scored image. Transient: lives for one selection pass only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageCandidate {
    /// Absolute URL.
    pub url: String,
    pub alt_text: String,
    pub score: u32,
}

/// Keyword tables and point values for the scoring heuristic.
///
/// All matching is case-insensitive: both the inputs and the configured
/// markers are lower-cased before comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    /// Words that mark an infographic/summary image (URL or alt).
    pub summary_keywords: Vec<String>,
    /// URL fragments that indicate a high-resolution asset.
    pub high_res_markers: Vec<String>,
    /// Marker for patch-related images (URL or alt).
    pub patch_marker: String,
    /// Marker for PNG assets (URL).
    pub png_marker: String,
    /// URL marker that forfeits `clean_points` (per-champion art).
    pub penalty_marker: String,

    pub keyword_points: u32,
    pub high_res_points: u32,
    pub patch_points: u32,
    pub png_points: u32,
    /// Awarded when the URL does not contain `penalty_marker`.
    pub clean_points: u32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            summary_keywords: owned(&[
                "summary",
                "resumo",
                "infographic",
                "infografia",
                "nerfs",
                "buffs",
                "ajustes",
                "changes",
                "patch-notes",
                "overview",
                "visao-geral",
                "highlights",
                "destaques",
            ]),
            high_res_markers: owned(&["1920", "1200", "1080", "large", "full"]),
            patch_marker: "patch".to_string(),
            png_marker: ".png".to_string(),
            penalty_marker: "champion".to_string(),
            keyword_points: 10,
            high_res_points: 5,
            patch_points: 3,
            png_points: 2,
            clean_points: 1,
        }
    }
}

/// Normalise an image `src` to an absolute URL.
///
/// - `//host/path` gets an `https:` scheme.
/// - `/path` is resolved against `origin`.
/// - anything already starting with `http` is kept as is.
/// - anything else (bare relative paths, `data:` URIs) is rejected.
pub fn normalize_url(src: &str, origin: &str) -> Option<String> {
    if let Some(rest) = src.strip_prefix("//") {
        Some(format!("https://{}", rest))
    } else if src.starts_with('/') {
        Some(format!("{}{}", origin.trim_end_matches('/'), src))
    } else if src.starts_with("http") {
        Some(src.to_string())
    } else {
        None
    }
}

/// Score a normalised URL and its alt text.
pub fn score_image(url: &str, alt: &str, rules: &ScoringRules) -> u32 {
    let url = url.to_lowercase();
    let alt = alt.to_lowercase();
    let in_url = |marker: &str| url.contains(&marker.to_lowercase());
    let in_url_or_alt = |marker: &str| {
        let marker = marker.to_lowercase();
        url.contains(&marker) || alt.contains(&marker)
    };

    let mut score = 0;
    if rules.summary_keywords.iter().any(|k| in_url_or_alt(k)) {
        score += rules.keyword_points;
    }
    if rules.high_res_markers.iter().any(|m| in_url(m)) {
        score += rules.high_res_points;
    }
    if in_url_or_alt(&rules.patch_marker) {
        score += rules.patch_points;
    }
    if in_url(&rules.png_marker) {
        score += rules.png_points;
    }
    if !in_url(&rules.penalty_marker) {
        score += rules.clean_points;
    }
    score
}

/// Normalise and score every image, dropping rejected URLs and zero scores.
///
/// The result is sorted by score, highest first. The sort is stable, so
/// among equal scores the image that appeared first on the page stays first.
pub fn rank_candidates(
    images: &[RawImage],
    rules: &ScoringRules,
    origin: &str,
) -> Vec<ImageCandidate> {
    let mut candidates: Vec<ImageCandidate> = images
        .iter()
        .filter_map(|img| {
            let url = normalize_url(&img.src, origin)?;
            let score = score_image(&url, &img.alt, rules);
            (score > 0).then(|| ImageCandidate {
                url,
                alt_text: img.alt.clone(),
                score,
            })
        })
        .collect();

    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates
}

/// Pick the single best summary image, if any image scored above zero.
pub fn select_summary_image(
    images: &[RawImage],
    rules: &ScoringRules,
    origin: &str,
) -> Option<ImageCandidate> {
    rank_candidates(images, rules, origin).into_iter().next()
}
