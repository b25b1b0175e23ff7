// crates/patchbot-core/src/traits.rs

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::BotError;
use crate::patch::PatchInfo;
use crate::version::VersionTag;

/// A chat channel (or any ordered sink) that notifications are sent to.
///
/// Implemented by patchbot-daemon (Discord channel). Messages must be
/// delivered in the order `send` is awaited.
#[async_trait]
pub trait Destination: Send + Sync {
    /// Send one message.
    async fn send(&self, content: &str) -> Result<(), BotError>;

    /// The channel's identifier.
    fn id(&self) -> u64;

    /// How to reference this channel inside a message.
    fn mention(&self) -> String {
        format!("<#{}>", self.id())
    }
}

/// Lookup of channels and server facts on the chat platform.
///
/// Implemented by patchbot-daemon (Discord cache + HTTP).
#[async_trait]
pub trait ChatDirectory: Send + Sync {
    /// Resolve a channel id. `None` when the channel does not exist or is
    /// not visible to the bot.
    async fn channel(&self, id: u64) -> Option<Arc<dyn Destination>>;

    /// Number of servers the bot is connected to.
    async fn guild_count(&self) -> usize;
}

/// Where versions and patch pages come from.
///
/// Implemented by patchbot-fetch (`PatchNotesClient`).
#[async_trait]
pub trait PatchSource: Send + Sync {
    /// Resolve the newest version tag. Never fails; falls back to a
    /// configured estimate.
    async fn latest_version(&self) -> VersionTag;

    /// Fetch the patch-notes page for a version and select its summary
    /// image. `None` when no locale served the page.
    async fn patch_info(&self, version: &VersionTag) -> Option<PatchInfo>;
}
