// crates/patchbot-monitor/src/shared.rs
//
// BotSharedState: the bot's mutable state, owned in one place.
//
// Constructed once in the daemon's main, then handed to the monitor and
// the command runner. The channel config is written only by the "set
// channel" command; the last-known version only by the monitor task (and
// once at startup).

use std::sync::Arc;
use std::time::Instant;

use patchbot_core::VersionTag;
use tokio::sync::RwLock;

use crate::channel_config::ChannelConfigStore;

/// Shared mutable state, wrapped in Arc<RwLock<>> for access from the
/// monitor task and every command handler.
#[derive(Clone)]
pub struct BotSharedState {
    /// Destination channel, persisted on every change.
    pub channel_config: Arc<RwLock<ChannelConfigStore>>,
    /// Newest version announced (or seen at startup). Not persisted.
    pub last_known_version: Arc<RwLock<Option<VersionTag>>>,
    /// Start time for uptime reporting.
    pub start_time: Instant,
}

impl BotSharedState {
    pub fn new(channel_config: ChannelConfigStore) -> Self {
        Self {
            channel_config: Arc::new(RwLock::new(channel_config)),
            last_known_version: Arc::new(RwLock::new(None)),
            start_time: Instant::now(),
        }
    }

    pub async fn channel_id(&self) -> Option<u64> {
        self.channel_config.read().await.channel_id()
    }

    /// Set the destination channel. A failed write is logged; the new
    /// channel stays in effect for this process.
    pub async fn set_channel(&self, channel_id: u64) {
        let mut store = self.channel_config.write().await;
        if let Err(e) = store.set_channel(channel_id).await {
            tracing::warn!("Failed to persist channel config: {}", e);
        }
        tracing::info!("Destination channel set to {}", channel_id);
    }

    pub async fn last_known_version(&self) -> Option<VersionTag> {
        self.last_known_version.read().await.clone()
    }

    pub async fn set_last_known_version(&self, version: VersionTag) {
        *self.last_known_version.write().await = Some(version);
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
