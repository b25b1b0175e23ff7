// crates/patchbot-daemon/src/main.rs
//
// Binary entrypoint for the patch-notes bot.
//
// Initializes tracing, parses CLI arguments, loads configuration and the
// stored destination channel, wires the patch source, monitor and command
// layer together, then runs the Discord client until it stops or the
// process receives Ctrl-C.

mod config;
mod discord;
mod token;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use config::DaemonConfig;
use discord::Handler;
use serenity::prelude::GatewayIntents;
use serenity::Client;

use patchbot_core::{expand_tilde, PatchSource};
use patchbot_fetch::PatchNotesClient;
use patchbot_monitor::{BotSharedState, ChannelConfigStore, CommandRunner, PatchMonitor, ReadyGate};

/// Discord bot that announces new League of Legends patch notes.
#[derive(Parser, Debug)]
#[command(name = "patchbot-daemon", version = "0.1.0", about = "Patch-notes Discord bot")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "patchbot.toml")]
    config: String,

    /// Override the channel config JSON path.
    #[arg(long)]
    channel_config: Option<String>,

    /// Override the check interval in seconds.
    #[arg(long)]
    interval_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // A missing .env is the normal case in production.
    let dotenv = dotenvy::dotenv();

    // Config is loaded before tracing so its log level can seed the filter;
    // load errors are reported once the subscriber exists.
    let loaded = DaemonConfig::load(&expand_tilde(&args.config));
    let level = loaded
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();

    if let Ok(path) = dotenv {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let mut daemon_config = match loaded {
        Ok(cfg) => {
            tracing::info!("Loaded configuration from {}", args.config);
            cfg
        }
        Err(e) => {
            tracing::warn!(
                "Could not load config from {}: {}. Using defaults.",
                args.config,
                e
            );
            DaemonConfig::default()
        }
    };

    // CLI flags override the config file values.
    if let Some(path) = args.channel_config {
        daemon_config.channel_config_path = path;
    }
    if let Some(secs) = args.interval_secs {
        daemon_config.monitor.interval_secs = secs;
    }

    let Some(token) = token::find_token(|name| std::env::var(name).ok()) else {
        tracing::error!(
            "Bot token not found. Set one of: {}",
            token::TOKEN_VARS.join(", ")
        );
        let found = token::describe_token_vars(std::env::vars());
        if found.is_empty() {
            tracing::error!("No token-like environment variables are set");
        } else {
            for entry in found {
                tracing::error!("  found {}", entry);
            }
        }
        std::process::exit(1);
    };

    tracing::info!("Patch-notes bot v0.1.0");
    tracing::info!("Command prefix: {}", daemon_config.command_prefix);
    tracing::info!("Check interval: {}s", daemon_config.interval().as_secs());
    tracing::info!("Version feed: {}", daemon_config.feed.versions_url);

    // ---------------------------------------------------------------
    // Shared state and services.
    // ---------------------------------------------------------------
    let channel_config_path = expand_tilde(&daemon_config.channel_config_path);
    let store = ChannelConfigStore::load(&channel_config_path).await;
    match store.channel_id() {
        Some(id) => tracing::info!("Configured channel: {}", id),
        None => tracing::info!("No channel configured yet"),
    }

    let source: Arc<dyn PatchSource> = Arc::new(PatchNotesClient::new(&daemon_config.source()));
    let shared_state = BotSharedState::new(store);
    let gate = ReadyGate::new();

    let monitor = Arc::new(PatchMonitor::new(
        source.clone(),
        shared_state.clone(),
        gate.clone(),
        daemon_config.interval(),
    ));
    let runner = Arc::new(CommandRunner::new(
        source.clone(),
        shared_state.clone(),
        monitor.clone(),
        daemon_config.command_prefix.clone(),
    ));

    let handler = Handler::new(source, shared_state, gate, monitor, runner);

    // ---------------------------------------------------------------
    // Discord client.
    // ---------------------------------------------------------------
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = match Client::builder(&token, intents).event_handler(handler).await {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to build Discord client: {}", e);
            std::process::exit(1);
        }
    };
    let shard_manager = client.shard_manager.clone();

    tokio::select! {
        result = client.start() => {
            if let Err(e) = result {
                tracing::error!("Discord client error: {}", e);
                return Err(e.into());
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted, shutting down");
            shard_manager.shutdown_all().await;
            // Give the gateway a moment to close cleanly.
            tokio::time::sleep(Duration::from_millis(250)).await;
        }
    }

    tracing::info!("Patch-notes bot stopped");
    Ok(())
}
