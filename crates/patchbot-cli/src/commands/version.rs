// crates/patchbot-cli/src/commands/version.rs
//
// `patchbot version`: resolve the current patch version tag.

use patchbot_core::{PatchSource, SourceConfig};
use patchbot_fetch::PatchNotesClient;

use crate::output::{format_json, OutputFormat};

/// Run the version command.
pub async fn run(
    config: &SourceConfig,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = PatchNotesClient::new(config);
    let version = client.latest_version().await;

    match format {
        OutputFormat::Json => println!("{}", format_json(&version)),
        OutputFormat::Table => println!("{}", version),
    }
    Ok(())
}
