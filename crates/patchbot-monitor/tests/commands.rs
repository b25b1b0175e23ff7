// crates/patchbot-monitor/tests/commands.rs
//
// Command layer tests against mock chat channels and a scripted source.

mod common;

use std::sync::Arc;
use std::time::Duration;

use patchbot_core::VersionTag;
use patchbot_monitor::{Command, CommandRunner, Invocation, ReadyGate};

use common::{monitor_for, temp_state, MockDirectory, RecordingChannel, ScriptedSource};

const COMMAND_CHANNEL: u64 = 10;
const NEWS_CHANNEL: u64 = 20;

struct Fixture {
    source: Arc<ScriptedSource>,
    runner: CommandRunner,
    reply: Arc<RecordingChannel>,
    news: Arc<RecordingChannel>,
    directory: Arc<MockDirectory>,
    state: patchbot_monitor::BotSharedState,
    monitor: Arc<patchbot_monitor::PatchMonitor>,
}

fn fixture(label: &str) -> Fixture {
    let source = ScriptedSource::new("25-16");
    let state = temp_state(label);
    let monitor = monitor_for(
        source.clone(),
        state.clone(),
        ReadyGate::new(),
        Duration::from_secs(30 * 60),
    );
    let runner = CommandRunner::new(source.clone(), state.clone(), monitor.clone(), "!");
    let reply = RecordingChannel::new(COMMAND_CHANNEL);
    let news = RecordingChannel::new(NEWS_CHANNEL);
    let directory = MockDirectory::new(&[reply.clone(), news.clone()]);

    Fixture {
        source,
        runner,
        reply,
        news,
        directory,
        state,
        monitor,
    }
}

fn invocation(fx: &Fixture, is_admin: bool) -> Invocation {
    Invocation {
        reply: fx.reply.clone(),
        is_admin,
        directory: fx.directory.clone(),
    }
}

#[tokio::test]
async fn patch_command_posts_announcement() {
    let fx = fixture("cmd_patch");
    fx.source.publish("25-16", Some("https://cdn.x.com/summary.png"));

    assert!(fx.runner.handle_message("!patch", &invocation(&fx, false)).await);

    let messages = fx.reply.messages();
    assert_eq!(messages[0], "Fetching latest patch...");
    assert_eq!(messages[1], "**Patch 25-16 - League of Legends**");
    assert_eq!(messages[2], "https://cdn.x.com/summary.png");
    assert_eq!(messages.len(), 4);
}

#[tokio::test]
async fn patch_command_reports_missing_page() {
    let fx = fixture("cmd_patch_missing");
    fx.runner.handle(Command::Patch, &invocation(&fx, false)).await;
    assert_eq!(
        fx.reply.messages(),
        vec!["Fetching latest patch...", "Patch 25-16 not found!"]
    );
}

#[tokio::test]
async fn test_command_requires_admin() {
    let fx = fixture("cmd_test_perm");
    fx.runner
        .handle(Command::Test(Some("25-14".to_string())), &invocation(&fx, false))
        .await;
    assert_eq!(
        fx.reply.messages(),
        vec!["You do not have permission to use this command!"]
    );
    assert_eq!(fx.source.page_calls(), 0);
}

#[tokio::test]
async fn test_command_fetches_given_version() {
    let fx = fixture("cmd_test");
    fx.source.publish("25-04", None);
    fx.runner
        .handle(Command::Test(Some("25.4".to_string())), &invocation(&fx, true))
        .await;
    let messages = fx.reply.messages();
    assert_eq!(messages[0], "Testing 25-04...");
    assert!(messages[1].starts_with("**Patch 25-04 available!**"));
}

#[tokio::test]
async fn test_command_rejects_bad_version() {
    let fx = fixture("cmd_test_bad");
    fx.runner
        .handle(Command::Test(Some("latest".to_string())), &invocation(&fx, true))
        .await;
    let messages = fx.reply.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("Error: "));
}

#[tokio::test]
async fn config_sets_channel_and_starts_monitoring() {
    let fx = fixture("cmd_config");
    let inv = invocation(&fx, true);

    fx.runner.handle_message("!config <#20>", &inv).await;
    assert_eq!(
        fx.reply.messages(),
        vec!["Channel configured: <#20>", "Monitoring started!"]
    );
    assert_eq!(fx.state.channel_id().await, Some(NEWS_CHANNEL));
    assert!(fx.monitor.is_monitoring().await);

    // Re-configuring does not start a second loop.
    fx.runner.handle_message("!config 10", &inv).await;
    let messages = fx.reply.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[2], "Channel configured: <#10>");
    assert_eq!(fx.state.channel_id().await, Some(COMMAND_CHANNEL));

    let persisted = tokio::fs::read_to_string(fx.state.channel_config.read().await.path())
        .await
        .unwrap();
    assert!(persisted.contains("\"canal_id\": 10"));
}

#[tokio::test]
async fn config_unknown_channel() {
    let fx = fixture("cmd_config_unknown");
    fx.runner.handle_message("!config <#999>", &invocation(&fx, true)).await;
    assert_eq!(fx.reply.messages(), vec!["Channel not found!"]);
    assert_eq!(fx.state.channel_id().await, None);
    assert!(!fx.monitor.is_monitoring().await);
}

#[tokio::test]
async fn config_requires_admin() {
    let fx = fixture("cmd_config_perm");
    fx.runner.handle_message("!config <#20>", &invocation(&fx, false)).await;
    assert_eq!(
        fx.reply.messages(),
        vec!["You do not have permission to use this command!"]
    );
    assert_eq!(fx.state.channel_id().await, None);
}

#[tokio::test]
async fn config_without_argument() {
    let fx = fixture("cmd_config_empty");
    fx.runner.handle_message("!config", &invocation(&fx, true)).await;
    let messages = fx.reply.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("usage: !config #channel"));
}

#[tokio::test]
async fn version_command() {
    let fx = fixture("cmd_version");
    fx.runner.handle_message("!versao", &invocation(&fx, false)).await;
    assert_eq!(fx.reply.messages(), vec!["Version: **25-16**"]);
}

#[tokio::test]
async fn status_reports_state() {
    let fx = fixture("cmd_status");
    fx.runner.handle(Command::Status, &invocation(&fx, false)).await;
    let unconfigured = fx.reply.messages().pop().unwrap();
    assert!(unconfigured.contains("**Servers:** 2"));
    assert!(unconfigured.contains("**Current version:** N/A"));
    assert!(unconfigured.contains("**Configured channel:** Not configured"));
    assert!(unconfigured.contains("**Monitoring:** Inactive"));

    fx.state.set_last_known_version(VersionTag::new("25-16")).await;
    fx.state.set_channel(NEWS_CHANNEL).await;
    fx.monitor.ensure_started(fx.directory.clone()).await.unwrap();
    fx.runner.handle(Command::Status, &invocation(&fx, false)).await;
    let configured = fx.reply.messages().pop().unwrap();
    assert!(configured.contains("**Current version:** 25-16"));
    assert!(configured.contains("**Configured channel:** <#20>"));
    assert!(configured.contains("**Monitoring:** Active"));

    fx.directory.remove(NEWS_CHANNEL);
    fx.runner.handle(Command::Status, &invocation(&fx, false)).await;
    let missing = fx.reply.messages().pop().unwrap();
    assert!(missing.contains("ID 20 (not found)"));
}

#[tokio::test]
async fn help_lists_commands() {
    let fx = fixture("cmd_help");
    fx.runner.handle_message("!help", &invocation(&fx, false)).await;
    let help = fx.reply.messages().pop().unwrap();
    for command in ["!patch", "!version", "!status", "!config #channel", "!test [version]"] {
        assert!(help.contains(command), "help should mention {}", command);
    }
    assert!(help.contains("every 30 min"));
    assert!(fx.news.messages().is_empty());
}

#[tokio::test]
async fn unknown_commands_are_ignored() {
    let fx = fixture("cmd_unknown");
    assert!(!fx.runner.handle_message("!dance", &invocation(&fx, true)).await);
    assert!(!fx.runner.handle_message("hello there", &invocation(&fx, true)).await);
    assert!(fx.reply.messages().is_empty());
}
