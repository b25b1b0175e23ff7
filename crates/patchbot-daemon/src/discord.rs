// crates/patchbot-daemon/src/discord.rs
//
// Discord adapter: maps serenity channels and caches onto the chat traits,
// and routes gateway events into the monitor and the command layer.

use std::sync::Arc;

use async_trait::async_trait;
use patchbot_core::{BotError, ChatDirectory, Destination, PatchSource};
use patchbot_monitor::{
    record_baseline, BotSharedState, CommandRunner, Invocation, PatchMonitor, ReadyGate,
};
use serenity::cache::Cache;
use serenity::client::{Context, EventHandler};
use serenity::http::Http;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::model::id::ChannelId;

/// A Discord text channel.
pub struct DiscordChannel {
    http: Arc<Http>,
    id: ChannelId,
}

impl DiscordChannel {
    pub fn new(http: Arc<Http>, id: ChannelId) -> Self {
        Self { http, id }
    }
}

#[async_trait]
impl Destination for DiscordChannel {
    async fn send(&self, content: &str) -> Result<(), BotError> {
        self.id
            .say(&self.http, content)
            .await
            .map(|_| ())
            .map_err(|e| BotError::Chat(e.to_string()))
    }

    fn id(&self) -> u64 {
        self.id.get()
    }
}

/// Channel lookup through the gateway cache, falling back to REST.
pub struct DiscordDirectory {
    http: Arc<Http>,
    cache: Arc<Cache>,
}

impl DiscordDirectory {
    pub fn new(http: Arc<Http>, cache: Arc<Cache>) -> Self {
        Self { http, cache }
    }

    pub fn from_context(ctx: &Context) -> Arc<Self> {
        Arc::new(Self::new(ctx.http.clone(), ctx.cache.clone()))
    }
}

#[async_trait]
impl ChatDirectory for DiscordDirectory {
    async fn channel(&self, id: u64) -> Option<Arc<dyn Destination>> {
        if id == 0 {
            return None;
        }
        let channel_id = ChannelId::new(id);
        let cached = self.cache.channel(channel_id).is_some();
        if !cached {
            if let Err(e) = self.http.get_channel(channel_id).await {
                tracing::debug!("Channel {} lookup failed: {}", id, e);
                return None;
            }
        }
        Some(Arc::new(DiscordChannel::new(self.http.clone(), channel_id)))
    }

    async fn guild_count(&self) -> usize {
        self.cache.guild_count()
    }
}

/// Gateway event handler.
pub struct Handler {
    source: Arc<dyn PatchSource>,
    state: BotSharedState,
    gate: ReadyGate,
    monitor: Arc<PatchMonitor>,
    runner: Arc<CommandRunner>,
}

impl Handler {
    pub fn new(
        source: Arc<dyn PatchSource>,
        state: BotSharedState,
        gate: ReadyGate,
        monitor: Arc<PatchMonitor>,
        runner: Arc<CommandRunner>,
    ) -> Self {
        Self {
            source,
            state,
            gate,
            monitor,
            runner,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!(
            "Connected as {} ({} guild(s))",
            ready.user.name,
            ready.guilds.len()
        );
        for guild in &ready.guilds {
            tracing::debug!("  guild {}", guild.id);
        }

        // Reconnects also fire `ready`; keep an existing baseline.
        if let Some(version) = record_baseline(&self.state, self.source.as_ref()).await {
            tracing::info!("Current version: {}", version);
        }

        self.gate.open();

        if self.state.channel_id().await.is_some() {
            match self
                .monitor
                .ensure_started(DiscordDirectory::from_context(&ctx))
                .await
            {
                Ok(true) => tracing::info!("Automatic monitoring active"),
                Ok(false) => {}
                Err(e) => tracing::error!("Could not start monitoring: {}", e),
            }
        } else {
            tracing::info!(
                "No channel configured; use {}config #channel",
                self.runner.prefix()
            );
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        if !msg.content.trim_start().starts_with(self.runner.prefix()) {
            return;
        }

        let invocation = Invocation {
            reply: Arc::new(DiscordChannel::new(ctx.http.clone(), msg.channel_id)),
            is_admin: is_admin(&ctx, &msg).await,
            directory: DiscordDirectory::from_context(&ctx),
        };
        self.runner.handle_message(&msg.content, &invocation).await;
    }
}

/// Whether the author holds the administrator permission in the guild the
/// message was sent in. Direct messages never qualify.
async fn is_admin(ctx: &Context, msg: &Message) -> bool {
    let Some(guild_id) = msg.guild_id else {
        return false;
    };
    let member = match guild_id.member(ctx, msg.author.id).await {
        Ok(member) => member,
        Err(e) => {
            tracing::warn!("Could not fetch member {}: {}", msg.author.id, e);
            return false;
        }
    };
    ctx.cache
        .guild(guild_id)
        .map(|guild| guild.member_permissions(&member).administrator())
        .unwrap_or(false)
}
