// crates/patchbot-cli/src/commands/mod.rs
//
// Command module declarations for the patchbot CLI.

pub mod inspect;
pub mod score;
pub mod version;
