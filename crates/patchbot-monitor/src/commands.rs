// crates/patchbot-monitor/src/commands.rs
//
// Chat command layer.
//
// Commands are parsed from raw message text, checked for privilege, and
// executed against the patch source and shared state. Any error becomes a
// short reply in the invoking channel; the process keeps running.

use std::sync::Arc;

use patchbot_core::{BotError, ChatDirectory, Destination, PatchSource, VersionTag};

use crate::monitor::PatchMonitor;
use crate::notifier::announce;
use crate::shared::BotSharedState;

/// A recognised chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch and post the latest patch.
    Patch,
    /// Fetch and post a specific (or the latest) version. Admin only.
    Test(Option<String>),
    /// Set the destination channel. Admin only.
    Config(Option<String>),
    /// Show the latest version.
    Version,
    /// Show bot status.
    Status,
    /// Show the command list.
    Help,
}

impl Command {
    fn requires_admin(&self) -> bool {
        matches!(self, Command::Test(_) | Command::Config(_))
    }
}

/// Parse a message into a command. Returns `None` for anything that is not
/// a known command, so unknown commands are silently ignored.
pub fn parse_command(prefix: &str, content: &str) -> Option<Command> {
    let rest = content.trim().strip_prefix(prefix)?;
    let mut words = rest.split_whitespace();
    let name = words.next()?.to_lowercase();
    let arg = words.next().map(str::to_string);

    match name.as_str() {
        "patch" => Some(Command::Patch),
        "test" | "teste" => Some(Command::Test(arg)),
        "config" => Some(Command::Config(arg)),
        "version" | "versao" => Some(Command::Version),
        "status" => Some(Command::Status),
        "help" => Some(Command::Help),
        _ => None,
    }
}

/// Parse a channel reference: a mention (`<#123>`) or a bare id.
fn parse_channel_ref(raw: &str) -> Option<u64> {
    let id = raw
        .strip_prefix("<#")
        .and_then(|s| s.strip_suffix('>'))
        .unwrap_or(raw);
    id.parse().ok()
}

/// Context of one command invocation.
#[derive(Clone)]
pub struct Invocation {
    /// Channel the command was sent in; replies go here.
    pub reply: Arc<dyn Destination>,
    /// Whether the author holds the administrator permission.
    pub is_admin: bool,
    pub directory: Arc<dyn ChatDirectory>,
}

/// Executes commands against the patch source, shared state and monitor.
pub struct CommandRunner {
    source: Arc<dyn PatchSource>,
    state: BotSharedState,
    monitor: Arc<PatchMonitor>,
    prefix: String,
}

impl CommandRunner {
    pub fn new(
        source: Arc<dyn PatchSource>,
        state: BotSharedState,
        monitor: Arc<PatchMonitor>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            source,
            state,
            monitor,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Parse and handle a raw message. Returns `false` when the message
    /// was not a command.
    pub async fn handle_message(&self, content: &str, invocation: &Invocation) -> bool {
        match parse_command(&self.prefix, content) {
            Some(command) => {
                self.handle(command, invocation).await;
                true
            }
            None => false,
        }
    }

    /// Execute a command, replying with a short message on failure.
    pub async fn handle(&self, command: Command, invocation: &Invocation) {
        tracing::debug!("Handling command {:?}", command);
        if let Err(e) = self.execute(command, invocation).await {
            let reply = error_reply(&e);
            if !matches!(e, BotError::Permission(_) | BotError::ChannelNotFound(_)) {
                tracing::warn!("Command failed: {}", e);
            }
            if let Err(send_err) = invocation.reply.send(&reply).await {
                tracing::warn!("Could not deliver error reply: {}", send_err);
            }
        }
    }

    /// Execute a command, propagating failures.
    pub async fn execute(&self, command: Command, invocation: &Invocation) -> Result<(), BotError> {
        if command.requires_admin() && !invocation.is_admin {
            return Err(BotError::Permission("administrator required".to_string()));
        }

        match command {
            Command::Patch => self.cmd_patch(invocation).await,
            Command::Test(version) => self.cmd_test(version.as_deref(), invocation).await,
            Command::Config(channel) => self.cmd_config(channel.as_deref(), invocation).await,
            Command::Version => self.cmd_version(invocation).await,
            Command::Status => self.cmd_status(invocation).await,
            Command::Help => invocation.reply.send(&self.help_text()).await,
        }
    }

    async fn cmd_patch(&self, invocation: &Invocation) -> Result<(), BotError> {
        invocation.reply.send("Fetching latest patch...").await?;
        let version = self.source.latest_version().await;
        self.post_patch(&version, invocation).await
    }

    async fn cmd_test(&self, version: Option<&str>, invocation: &Invocation) -> Result<(), BotError> {
        let version = match version {
            Some(raw) => VersionTag::parse(raw)?,
            None => self.source.latest_version().await,
        };
        invocation
            .reply
            .send(&format!("Testing {}...", version))
            .await?;
        self.post_patch(&version, invocation).await
    }

    async fn post_patch(&self, version: &VersionTag, invocation: &Invocation) -> Result<(), BotError> {
        match self.source.patch_info(version).await {
            Some(info) => announce(invocation.reply.as_ref(), &info).await,
            None => {
                invocation
                    .reply
                    .send(&format!("Patch {} not found!", version))
                    .await
            }
        }
    }

    async fn cmd_config(&self, channel: Option<&str>, invocation: &Invocation) -> Result<(), BotError> {
        let raw = channel.ok_or_else(|| {
            BotError::InvalidArgument(format!("usage: {}config #channel", self.prefix))
        })?;
        let channel_id = parse_channel_ref(raw)
            .ok_or_else(|| BotError::ChannelNotFound(raw.to_string()))?;
        let destination = invocation
            .directory
            .channel(channel_id)
            .await
            .ok_or_else(|| BotError::ChannelNotFound(raw.to_string()))?;

        self.state.set_channel(channel_id).await;
        invocation
            .reply
            .send(&format!("Channel configured: {}", destination.mention()))
            .await?;

        if self
            .monitor
            .ensure_started(Arc::clone(&invocation.directory))
            .await?
        {
            invocation.reply.send("Monitoring started!").await?;
        }
        Ok(())
    }

    async fn cmd_version(&self, invocation: &Invocation) -> Result<(), BotError> {
        let version = self.source.latest_version().await;
        invocation
            .reply
            .send(&format!("Version: **{}**", version))
            .await
    }

    async fn cmd_status(&self, invocation: &Invocation) -> Result<(), BotError> {
        let channel = match self.state.channel_id().await {
            None => "Not configured".to_string(),
            Some(id) => match invocation.directory.channel(id).await {
                Some(destination) => destination.mention(),
                None => format!("ID {} (not found)", id),
            },
        };
        let version = self
            .state
            .last_known_version()
            .await
            .map(|v| v.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let monitoring = if self.monitor.is_monitoring().await {
            "Active"
        } else {
            "Inactive"
        };

        let status = format!(
            "**Bot Status**\n\n\
             **Bot:** Online\n\
             **Servers:** {}\n\
             **Current version:** {}\n\
             **Configured channel:** {}\n\
             **Monitoring:** {}\n\
             **Uptime:** {}s\n\n\
             Use `{}config #channel` to configure",
            invocation.directory.guild_count().await,
            version,
            channel,
            monitoring,
            self.state.uptime_secs(),
            self.prefix
        );
        invocation.reply.send(&status).await
    }

    fn help_text(&self) -> String {
        let p = &self.prefix;
        format!(
            "**Patch Notes Bot**\n\n\
             **Commands:**\n\
             • `{p}patch` - Fetch the latest patch\n\
             • `{p}version` - Current game version\n\
             • `{p}status` - Bot status\n\
             • `{p}config #channel` - Set the announcement channel (Admin)\n\
             • `{p}test [version]` - Test a specific patch (Admin)\n\n\
             **Automatic:**\n\
             • Checks for new patches every {} min\n\
             • Posts the summary image + link",
            self.monitor.interval().as_secs() / 60
        )
    }
}

/// The user-visible reply for a failed command.
pub fn error_reply(error: &BotError) -> String {
    match error {
        BotError::Permission(_) => "You do not have permission to use this command!".to_string(),
        BotError::ChannelNotFound(_) => "Channel not found!".to_string(),
        other => format!("Error: {}", other),
    }
}
