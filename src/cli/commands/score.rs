use anyhow::{Context, Result};

use crate::cli::output;
use crate::domain::models::ProgressConfig;
use crate::services::progress::Progress;

/// Run the full pipeline and print per-category scores.
pub async fn execute(config: ProgressConfig, json: bool) -> Result<()> {
    let mut progress = Progress::new(config).context("Failed to initialize pipeline")?;
    let report = progress.score().await.context("Failed to compute score")?;
    let description = progress.commit_description().await;

    if json {
        let output = serde_json::json!({
            "commit": description,
            "scores": report.scores,
            "failures": report.failures,
            "total": report.total,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Commit {}: {}", description.commit, description.description);
        println!("{}", output::score_table(&report));
        println!(
            "{} of {} expected tests still failing",
            report.failures.len(),
            report.total
        );
    }

    Ok(())
}
