// crates/patchbot-monitor/src/lib.rs
//
// patchbot-monitor: everything between the patch source and the chat
// platform.
//
// The daemon constructs one BotSharedState, one PatchMonitor and one
// CommandRunner at startup and hands them to the chat event handler. The
// chat platform itself is only seen through the Destination and
// ChatDirectory traits from patchbot-core.

pub mod channel_config;
pub mod commands;
pub mod monitor;
pub mod notifier;
pub mod ready;
pub mod shared;
pub mod state;

pub use channel_config::{ChannelConfig, ChannelConfigStore};
pub use commands::{parse_command, Command, CommandRunner, Invocation};
pub use monitor::{record_baseline, PatchMonitor, TickOutcome, DEFAULT_INTERVAL};
pub use notifier::{announce, announcement_messages, NEW_PATCH_HEADLINE};
pub use ready::ReadyGate;
pub use shared::BotSharedState;
pub use state::{MonitorState, MonitorStateMachine};
