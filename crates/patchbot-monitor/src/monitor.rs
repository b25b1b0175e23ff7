// crates/patchbot-monitor/src/monitor.rs
//
// Change-detection loop: periodically resolves the newest version and
// announces it exactly once.
//
// A version is committed to `last_known_version` only after the whole
// announcement was delivered. A page that is not up yet, or a failed
// send, leaves the old value in place so the next tick retries.

use std::sync::Arc;
use std::time::Duration;

use patchbot_core::{BotError, ChatDirectory, Destination, PatchInfo, PatchSource, VersionTag};
use tokio::sync::Mutex;
use tokio::time::MissedTickBehavior;

use crate::notifier::{announce, NEW_PATCH_HEADLINE};
use crate::ready::ReadyGate;
use crate::shared::BotSharedState;
use crate::state::{MonitorState, MonitorStateMachine};

/// Period between checks.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(30 * 60);

/// What a single tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// No destination configured.
    Idle,
    /// The configured channel no longer resolves; skipped.
    DestinationMissing(u64),
    /// Latest version equals the last known one.
    Unchanged(VersionTag),
    /// New version announced and committed.
    Announced(VersionTag),
    /// New version seen but its page is not available yet.
    PageUnavailable(VersionTag),
    /// New version seen but the announcement could not be delivered.
    DeliveryFailed(VersionTag),
}

/// Owns the periodic check and its lifecycle state.
pub struct PatchMonitor {
    source: Arc<dyn PatchSource>,
    state: BotSharedState,
    gate: ReadyGate,
    interval: Duration,
    machine: Mutex<MonitorStateMachine>,
}

impl PatchMonitor {
    pub fn new(
        source: Arc<dyn PatchSource>,
        state: BotSharedState,
        gate: ReadyGate,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            state,
            gate,
            interval,
            machine: Mutex::new(MonitorStateMachine::new()),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub async fn monitor_state(&self) -> MonitorState {
        self.machine.lock().await.current
    }

    pub async fn is_monitoring(&self) -> bool {
        self.monitor_state().await == MonitorState::Monitoring
    }

    /// Start the periodic task unless it is already running.
    ///
    /// Returns `true` when this call started it. The task waits for the
    /// ready gate before its first tick.
    pub async fn ensure_started(
        self: &Arc<Self>,
        directory: Arc<dyn ChatDirectory>,
    ) -> Result<bool, BotError> {
        let mut machine = self.machine.lock().await;
        if machine.current == MonitorState::Monitoring {
            return Ok(false);
        }
        machine.transition(MonitorState::Monitoring)?;

        let monitor = Arc::clone(self);
        tokio::spawn(async move {
            monitor.run(directory).await;
        });

        Ok(true)
    }

    async fn run(self: Arc<Self>, directory: Arc<dyn ChatDirectory>) {
        self.gate.wait().await;
        tracing::info!(
            "Patch monitor started (interval={}s)",
            self.interval.as_secs()
        );

        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            match self.tick(directory.as_ref()).await {
                TickOutcome::Idle => tracing::trace!("Monitor: no destination configured"),
                TickOutcome::DestinationMissing(id) => {
                    tracing::warn!("Monitor: channel {} not found, skipping", id)
                }
                TickOutcome::Unchanged(version) => {
                    tracing::debug!("Monitor: still on {}", version)
                }
                TickOutcome::Announced(version) => {
                    tracing::info!("Monitor: patch {} announced", version)
                }
                TickOutcome::PageUnavailable(version) => {
                    tracing::warn!("Monitor: page for {} unavailable, will retry", version)
                }
                TickOutcome::DeliveryFailed(version) => {
                    tracing::warn!("Monitor: delivery of {} failed, will retry", version)
                }
            }
        }
    }

    /// Run one check.
    pub async fn tick(&self, directory: &dyn ChatDirectory) -> TickOutcome {
        let Some(channel_id) = self.state.channel_id().await else {
            return TickOutcome::Idle;
        };

        let Some(destination) = directory.channel(channel_id).await else {
            return TickOutcome::DestinationMissing(channel_id);
        };

        let latest = self.source.latest_version().await;
        let known = self.state.last_known_version().await;
        if known.as_ref() == Some(&latest) {
            return TickOutcome::Unchanged(latest);
        }

        tracing::info!(
            "New version detected: {} -> {}",
            known.as_ref().map(VersionTag::as_str).unwrap_or("none"),
            latest
        );

        let Some(info) = self.source.patch_info(&latest).await else {
            return TickOutcome::PageUnavailable(latest);
        };

        if let Err(e) = deliver(destination.as_ref(), &info).await {
            tracing::warn!("Failed to announce patch {}: {}", latest, e);
            return TickOutcome::DeliveryFailed(latest);
        }

        self.state.set_last_known_version(latest.clone()).await;
        TickOutcome::Announced(latest)
    }
}

/// Record the current version as the startup baseline.
///
/// Only the first call has an effect: once a version is known (from an
/// earlier `ready` or an announcement) it is kept, so a reconnect never
/// hides a version that has not been announced yet. Returns the version
/// recorded, or `None` when a baseline already existed.
pub async fn record_baseline(
    state: &BotSharedState,
    source: &dyn PatchSource,
) -> Option<VersionTag> {
    if state.last_known_version().await.is_some() {
        return None;
    }
    let version = source.latest_version().await;
    state.set_last_known_version(version.clone()).await;
    Some(version)
}

async fn deliver(destination: &dyn Destination, info: &PatchInfo) -> Result<(), BotError> {
    destination.send(NEW_PATCH_HEADLINE).await?;
    announce(destination, info).await
}
