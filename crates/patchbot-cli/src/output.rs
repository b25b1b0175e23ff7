// crates/patchbot-cli/src/output.rs
//
// Output formatting utilities for the patchbot CLI.
// Supports table and JSON output modes.

use patchbot_core::ImageCandidate;
use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed table output (default).
    Table,
    /// JSON output for machine consumption.
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        }
    }
}

/// One ranked image in table output.
#[derive(Tabled)]
pub struct CandidateRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    #[tabled(rename = "Score")]
    pub score: u32,
    #[tabled(rename = "URL")]
    pub url: String,
    #[tabled(rename = "Alt")]
    pub alt: String,
}

/// Table rows for a ranking, numbered from 1.
pub fn candidate_rows(candidates: &[ImageCandidate]) -> Vec<CandidateRow> {
    candidates
        .iter()
        .enumerate()
        .map(|(i, c)| CandidateRow {
            rank: i + 1,
            score: c.score,
            url: c.url.clone(),
            alt: c.alt_text.clone(),
        })
        .collect()
}

/// Format a slice of Tabled items as a table string.
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    Table::new(data).to_string()
}

/// Format a serializable value as a pretty-printed JSON string.
pub fn format_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|e| format!("JSON serialization error: {}", e))
}
