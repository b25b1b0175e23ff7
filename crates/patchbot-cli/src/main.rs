// crates/patchbot-cli/src/main.rs
//
// CLI entrypoint for the patchbot developer tools.
//
// Resolves the current version, inspects live patch-notes pages, and
// scores saved pages offline, using the same source configuration as
// the bot.

mod commands;
mod output;

use clap::{Parser, Subcommand};
use commands::inspect::InspectCmd;
use commands::score::ScoreCmd;
use output::OutputFormat;
use patchbot_core::{expand_tilde, SourceConfig};

/// patchbot CLI: patch-notes diagnostics.
#[derive(Parser, Debug)]
#[command(
    name = "patchbot",
    version = "0.1.0",
    about = "Diagnostics for the League of Legends patch-notes bot"
)]
struct Cli {
    /// Bot configuration file; only the [feed], [site] and [scoring]
    /// tables are used.
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve the current patch version tag.
    Version {
        /// Print JSON instead of plain text.
        #[arg(long)]
        json: bool,
    },

    /// Fetch a patch-notes page and rank its images.
    Inspect(InspectCmd),

    /// Rank the images of a saved HTML page.
    Score(ScoreCmd),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_source_config(cli.config.as_deref())?;

    match &cli.command {
        Commands::Version { json } => {
            commands::version::run(&config, OutputFormat::from_json_flag(*json)).await?
        }
        Commands::Inspect(cmd) => commands::inspect::run(cmd, &config).await?,
        Commands::Score(cmd) => commands::score::run(cmd, &config).await?,
    }

    Ok(())
}

/// Read the source tables from a bot config file, or use defaults.
fn load_source_config(path: Option<&str>) -> Result<SourceConfig, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(SourceConfig::default());
    };
    let path = expand_tilde(path);
    let contents = std::fs::read_to_string(&path)
        .map_err(|e| format!("Cannot read config {}: {}", path, e))?;
    Ok(toml::from_str(&contents)?)
}
