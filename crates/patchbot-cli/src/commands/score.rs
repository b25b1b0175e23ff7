// crates/patchbot-cli/src/commands/score.rs
//
// `patchbot score <file>`: score the images of a saved HTML page, offline.

use std::path::PathBuf;

use clap::Args;
use patchbot_core::{rank_candidates, ImageCandidate, SourceConfig};
use patchbot_fetch::extract_images;
use serde::Serialize;

use crate::output::{candidate_rows, format_json, format_table, OutputFormat};

/// Score images in a local HTML file.
#[derive(Debug, Args)]
pub struct ScoreCmd {
    /// Path to the saved page.
    #[arg()]
    pub file: PathBuf,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ScoreReport {
    images_found: usize,
    selected: Option<ImageCandidate>,
    candidates: Vec<ImageCandidate>,
}

fn score_html(html: &str, config: &SourceConfig) -> ScoreReport {
    let images = extract_images(html);
    let candidates = rank_candidates(&images, &config.scoring, &config.site.origin);
    ScoreReport {
        images_found: images.len(),
        selected: candidates.first().cloned(),
        candidates,
    }
}

/// Run the score command.
pub async fn run(cmd: &ScoreCmd, config: &SourceConfig) -> Result<(), Box<dyn std::error::Error>> {
    let html = tokio::fs::read_to_string(&cmd.file)
        .await
        .map_err(|e| format!("Cannot read {}: {}", cmd.file.display(), e))?;
    let report = score_html(&html, config);

    match OutputFormat::from_json_flag(cmd.json) {
        OutputFormat::Json => println!("{}", format_json(&report)),
        OutputFormat::Table => {
            println!(
                "{}: {} image(s), {} scored",
                cmd.file.display(),
                report.images_found,
                report.candidates.len()
            );
            match &report.selected {
                Some(best) => println!("Selected: {}", best.url),
                None => println!("Selected: none"),
            }
            if !report.candidates.is_empty() {
                println!();
                println!("{}", format_table(&candidate_rows(&report.candidates)));
            }
        }
    }
    Ok(())
}
