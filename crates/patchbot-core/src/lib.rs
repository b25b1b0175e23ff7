// crates/patchbot-core/src/lib.rs
//
// patchbot-core: Core types, traits, and the summary-image heuristic.
//
// This is the leaf crate that all other crates in the workspace depend on.
// It defines version tags, patch info, image candidates and their scoring,
// the source configuration shared by the daemon and the CLI, the error
// type, and the trait seams to the chat platform and the patch source.

pub mod config;
pub mod error;
pub mod image;
pub mod patch;
pub mod traits;
pub mod version;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use patchbot_core::VersionTag;`

// Version types
pub use version::VersionTag;

// Patch types
pub use patch::{Language, PatchInfo};

// Image selection
pub use image::{
    normalize_url, rank_candidates, score_image, select_summary_image, ImageCandidate, RawImage,
    ScoringRules,
};

// Configuration
pub use config::{expand_tilde, FallbackPolicy, FeedConfig, SiteConfig, SourceConfig};

// Error type
pub use error::BotError;

// Traits
pub use traits::{ChatDirectory, Destination, PatchSource};
