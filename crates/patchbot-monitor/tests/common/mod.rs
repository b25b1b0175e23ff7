// crates/patchbot-monitor/tests/common/mod.rs
//
// Test doubles for the chat platform and the patch source.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use patchbot_core::{
    BotError, ChatDirectory, Destination, Language, PatchInfo, PatchSource, VersionTag,
};
use patchbot_monitor::{BotSharedState, ChannelConfigStore, PatchMonitor, ReadyGate};

/// A channel that records every message it is sent.
pub struct RecordingChannel {
    id: u64,
    sent: Mutex<Vec<String>>,
    failing: AtomicBool,
}

impl RecordingChannel {
    pub fn new(id: u64) -> Arc<Self> {
        Arc::new(Self {
            id,
            sent: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        })
    }

    pub fn messages(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl Destination for RecordingChannel {
    async fn send(&self, content: &str) -> Result<(), BotError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(BotError::Chat("Missing Access".to_string()));
        }
        self.sent.lock().unwrap().push(content.to_string());
        Ok(())
    }

    fn id(&self) -> u64 {
        self.id
    }
}

/// A server with a fixed set of channels.
pub struct MockDirectory {
    channels: Mutex<HashMap<u64, Arc<RecordingChannel>>>,
    guilds: usize,
}

impl MockDirectory {
    pub fn new(channels: &[Arc<RecordingChannel>]) -> Arc<Self> {
        Arc::new(Self {
            channels: Mutex::new(channels.iter().map(|c| (c.id, c.clone())).collect()),
            guilds: 2,
        })
    }

    pub fn remove(&self, id: u64) {
        self.channels.lock().unwrap().remove(&id);
    }
}

#[async_trait]
impl ChatDirectory for MockDirectory {
    async fn channel(&self, id: u64) -> Option<Arc<dyn Destination>> {
        let channel = self.channels.lock().unwrap().get(&id).cloned()?;
        Some(channel as Arc<dyn Destination>)
    }

    async fn guild_count(&self) -> usize {
        self.guilds
    }
}

/// A patch source whose latest version and available pages are scripted.
pub struct ScriptedSource {
    latest: Mutex<VersionTag>,
    pages: Mutex<HashMap<VersionTag, PatchInfo>>,
    pub version_calls: AtomicUsize,
    pub page_calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(latest: &str) -> Arc<Self> {
        Arc::new(Self {
            latest: Mutex::new(VersionTag::new(latest)),
            pages: Mutex::new(HashMap::new()),
            version_calls: AtomicUsize::new(0),
            page_calls: AtomicUsize::new(0),
        })
    }

    pub fn set_latest(&self, version: &str) {
        *self.latest.lock().unwrap() = VersionTag::new(version);
    }

    /// Make the page for `version` available, with or without an image.
    pub fn publish(&self, version: &str, image_url: Option<&str>) {
        let info = patch_info(version, image_url);
        self.pages
            .lock()
            .unwrap()
            .insert(VersionTag::new(version), info);
    }

    pub fn page_calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PatchSource for ScriptedSource {
    async fn latest_version(&self) -> VersionTag {
        self.version_calls.fetch_add(1, Ordering::SeqCst);
        self.latest.lock().unwrap().clone()
    }

    async fn patch_info(&self, version: &VersionTag) -> Option<PatchInfo> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        self.pages.lock().unwrap().get(version).cloned()
    }
}

pub fn patch_info(version: &str, image_url: Option<&str>) -> PatchInfo {
    PatchInfo {
        version: VersionTag::new(version),
        page_url: format!(
            "https://www.leagueoflegends.com/pt-br/news/game-updates/patch-{}-notes/",
            version
        ),
        image_url: image_url.map(str::to_string),
        language: Language::Primary,
        language_tag: "PT-BR".to_string(),
    }
}

/// Shared state backed by a throwaway config path.
pub fn temp_state(label: &str) -> BotSharedState {
    let path = std::env::temp_dir().join(format!(
        "patchbot_it_{}_{}.json",
        label,
        uuid::Uuid::now_v7()
    ));
    BotSharedState::new(ChannelConfigStore::empty(path))
}

pub fn monitor_for(
    source: Arc<ScriptedSource>,
    state: BotSharedState,
    gate: ReadyGate,
    interval: Duration,
) -> Arc<PatchMonitor> {
    Arc::new(PatchMonitor::new(source, state, gate, interval))
}
