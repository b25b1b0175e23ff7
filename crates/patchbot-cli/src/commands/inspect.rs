// crates/patchbot-cli/src/commands/inspect.rs
//
// `patchbot inspect [version]`: fetch a patch-notes page and show how
// every image on it was scored.

use clap::Args;
use patchbot_core::{PatchSource, SourceConfig, VersionTag};
use patchbot_fetch::PatchNotesClient;

use crate::output::{candidate_rows, format_json, format_table, OutputFormat};

/// Inspect a patch-notes page.
#[derive(Debug, Args)]
pub struct InspectCmd {
    /// Version tag such as `25-16` or `25.16`. Defaults to the latest.
    #[arg()]
    pub version: Option<String>,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Run the inspect command.
pub async fn run(
    cmd: &InspectCmd,
    config: &SourceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = PatchNotesClient::new(config);
    let version = match &cmd.version {
        Some(raw) => VersionTag::parse(raw)?,
        None => client.latest_version().await,
    };

    let Some(inspection) = client.inspect(&version).await else {
        return Err(format!("Patch {} not found in any configured locale", version).into());
    };

    match OutputFormat::from_json_flag(cmd.json) {
        OutputFormat::Json => println!("{}", format_json(&inspection)),
        OutputFormat::Table => {
            println!("Patch {}", version);
            println!("  Page:     {}", inspection.page_url);
            println!("  Language: {}", inspection.language_tag);
            println!(
                "  Images:   {} found, {} scored",
                inspection.images_found,
                inspection.candidates.len()
            );
            println!();
            if inspection.candidates.is_empty() {
                println!("No summary image candidates.");
            } else {
                println!("{}", format_table(&candidate_rows(&inspection.candidates)));
            }
        }
    }
    Ok(())
}
