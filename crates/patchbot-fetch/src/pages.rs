// crates/patchbot-fetch/src/pages.rs
//
// Patch-notes page fetcher and summary-image selection.
//
// The primary locale is tried first; the secondary locale only when the
// primary page is unavailable. Only `<img src alt>` is read from the page.

use std::time::Duration;

use patchbot_core::{
    rank_candidates, ImageCandidate, Language, PatchInfo, RawImage, ScoringRules, SiteConfig,
    VersionTag,
};
use scraper::{Html, Selector};
use serde::Serialize;

use crate::http::HttpFetcher;

/// Collect every `<img>` that carries a `src` attribute, in document order.
pub fn extract_images(html: &str) -> Vec<RawImage> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("img[src]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| {
            let src = element.value().attr("src")?;
            let alt = element.value().attr("alt").unwrap_or("");
            Some(RawImage::new(src, alt))
        })
        .collect()
}

/// A fetched page with its full candidate ranking (diagnostics).
#[derive(Debug, Clone, Serialize)]
pub struct PageInspection {
    pub page_url: String,
    pub language: Language,
    pub language_tag: String,
    /// Number of `<img src>` elements on the page.
    pub images_found: usize,
    /// Scored candidates, best first.
    pub candidates: Vec<ImageCandidate>,
}

/// Fetches patch-notes pages and selects their summary image.
#[derive(Debug, Clone)]
pub struct PatchPageFetcher {
    fetcher: HttpFetcher,
    site: SiteConfig,
    scoring: ScoringRules,
}

impl PatchPageFetcher {
    pub fn new(fetcher: HttpFetcher, site: SiteConfig, scoring: ScoringRules) -> Self {
        Self {
            fetcher,
            site,
            scoring,
        }
    }

    /// Fetch the page for `version`, primary locale first.
    ///
    /// Returns the language that served it, the URL, and the HTML body.
    async fn fetch_page(&self, version: &VersionTag) -> Option<(Language, String, String)> {
        let timeout = Duration::from_secs(self.site.timeout_secs);

        for language in [Language::Primary, Language::Secondary] {
            let url = self.site.page_url(language, version.as_str());
            match self.fetcher.get_text(&url, timeout).await {
                Ok(body) => return Some((language, url, body)),
                Err(e) => {
                    tracing::info!("Patch page {} unavailable: {}", url, e);
                }
            }
        }

        None
    }

    /// Fetch and rank every candidate image on the page for `version`.
    pub async fn inspect(&self, version: &VersionTag) -> Option<PageInspection> {
        let (language, page_url, body) = self.fetch_page(version).await?;

        let images = extract_images(&body);
        let candidates = rank_candidates(&images, &self.scoring, &self.site.origin);
        tracing::debug!(
            "Page {}: {} images, {} candidates",
            page_url,
            images.len(),
            candidates.len()
        );

        Some(PageInspection {
            page_url,
            language,
            language_tag: self.site.tag(language).to_string(),
            images_found: images.len(),
            candidates,
        })
    }

    /// Fetch the page for `version` and select its summary image.
    pub async fn patch_info(&self, version: &VersionTag) -> Option<PatchInfo> {
        let inspection = self.inspect(version).await?;
        let image_url = inspection.candidates.into_iter().next().map(|c| c.url);

        match &image_url {
            Some(url) => tracing::info!("Selected summary image for {}: {}", version, url),
            None => tracing::info!("No summary image found for {}", version),
        }

        Some(PatchInfo {
            version: version.clone(),
            page_url: inspection.page_url,
            image_url,
            language: inspection.language,
            language_tag: inspection.language_tag,
        })
    }
}
