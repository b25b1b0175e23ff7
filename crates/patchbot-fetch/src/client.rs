// crates/patchbot-fetch/src/client.rs
//
// PatchNotesClient: the network-backed PatchSource.

use async_trait::async_trait;
use patchbot_core::{PatchInfo, PatchSource, SourceConfig, VersionTag};

use crate::http::HttpFetcher;
use crate::pages::{PageInspection, PatchPageFetcher};
use crate::versions::VersionResolver;

/// Version resolver + page fetcher sharing one HTTP client.
#[derive(Debug, Clone)]
pub struct PatchNotesClient {
    resolver: VersionResolver,
    pages: PatchPageFetcher,
}

impl PatchNotesClient {
    /// Build a client from the source configuration.
    pub fn new(config: &SourceConfig) -> Self {
        let fetcher = HttpFetcher::new(&config.site.user_agent);
        Self {
            resolver: VersionResolver::new(fetcher.clone(), config.feed.clone()),
            pages: PatchPageFetcher::new(
                fetcher,
                config.site.clone(),
                config.scoring.clone(),
            ),
        }
    }

    /// Full candidate ranking for a version's page.
    pub async fn inspect(&self, version: &VersionTag) -> Option<PageInspection> {
        self.pages.inspect(version).await
    }
}

#[async_trait]
impl PatchSource for PatchNotesClient {
    async fn latest_version(&self) -> VersionTag {
        self.resolver.resolve().await
    }

    async fn patch_info(&self, version: &VersionTag) -> Option<PatchInfo> {
        self.pages.patch_info(version).await
    }
}
