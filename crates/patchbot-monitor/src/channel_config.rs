// crates/patchbot-monitor/src/channel_config.rs
//
// Channel config store: the one durable value, the destination channel id.
//
// File format: `{"canal_id": <integer|null>}`, pretty-printed and
// rewritten wholesale on every change. A missing or corrupt file is an
// empty config, never an error.

use std::path::{Path, PathBuf};

use patchbot_core::BotError;
use serde::{Deserialize, Serialize};

/// On-disk channel configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfig {
    #[serde(rename = "canal_id", default)]
    pub channel_id: Option<u64>,
}

/// Channel config plus the file it lives in.
///
/// Single writer: only the "set channel" command mutates it.
#[derive(Debug, Clone)]
pub struct ChannelConfigStore {
    path: PathBuf,
    config: ChannelConfig,
}

impl ChannelConfigStore {
    /// Load the config at `path`, falling back to an empty config when the
    /// file is missing or unreadable.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let config = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => match serde_json::from_str::<ChannelConfig>(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded channel config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!(
                        "Channel config at {} is corrupt: {}. Starting unconfigured.",
                        path.display(),
                        e
                    );
                    ChannelConfig::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No channel config at {}, starting unconfigured", path.display());
                ChannelConfig::default()
            }
            Err(e) => {
                tracing::warn!(
                    "Could not read channel config at {}: {}. Starting unconfigured.",
                    path.display(),
                    e
                );
                ChannelConfig::default()
            }
        };

        Self { path, config }
    }

    /// An in-memory store that has not been read from disk.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: ChannelConfig::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn channel_id(&self) -> Option<u64> {
        self.config.channel_id
    }

    /// Set the destination channel and rewrite the file.
    ///
    /// The in-memory value is updated even when the write fails.
    pub async fn set_channel(&mut self, channel_id: u64) -> Result<(), BotError> {
        self.config.channel_id = Some(channel_id);
        self.save().await
    }

    async fn save(&self) -> Result<(), BotError> {
        let json = serde_json::to_string_pretty(&self.config)?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| BotError::Config(format!("write {}: {}", self.path.display(), e)))?;
        tracing::debug!("Saved channel config to {}", self.path.display());
        Ok(())
    }
}
