// crates/patchbot-daemon/src/config.rs
//
// Runtime configuration for the bot process.
// Loaded from a TOML file or populated with sensible defaults.

use std::fs;
use std::time::Duration;

use patchbot_core::{FeedConfig, ScoringRules, SiteConfig, SourceConfig};
use patchbot_monitor::DEFAULT_INTERVAL;
use serde::Deserialize;

/// Runtime configuration for the daemon.
#[derive(Debug, Clone, Deserialize)]
pub struct DaemonConfig {
    /// Prefix that marks a chat message as a command.
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,

    /// JSON file holding the configured destination channel.
    #[serde(default = "default_channel_config_path")]
    pub channel_config_path: String,

    /// Log level: "trace", "debug", "info", "warn", "error".
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub feed: FeedConfig,

    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub scoring: ScoringRules,

    #[serde(default)]
    pub monitor: MonitorSection,
}

/// `[monitor]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorSection {
    /// Seconds between checks.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

fn default_command_prefix() -> String {
    "!".to_string()
}

fn default_channel_config_path() -> String {
    "config.json".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_interval_secs() -> u64 {
    DEFAULT_INTERVAL.as_secs()
}

impl Default for MonitorSection {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            command_prefix: default_command_prefix(),
            channel_config_path: default_channel_config_path(),
            log_level: default_log_level(),
            feed: FeedConfig::default(),
            site: SiteConfig::default(),
            scoring: ScoringRules::default(),
            monitor: MonitorSection::default(),
        }
    }
}

impl DaemonConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: DaemonConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// The part of the configuration the patch source needs.
    pub fn source(&self) -> SourceConfig {
        SourceConfig {
            feed: self.feed.clone(),
            site: self.site.clone(),
            scoring: self.scoring.clone(),
        }
    }

    /// Check interval, never shorter than one second.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.monitor.interval_secs.max(1))
    }
}
