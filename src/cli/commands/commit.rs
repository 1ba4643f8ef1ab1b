use anyhow::{Context, Result};

use crate::domain::models::ProgressConfig;
use crate::services::progress::Progress;

/// Show the description of the configured commit ref.
pub async fn execute(config: ProgressConfig, json: bool) -> Result<()> {
    let progress = Progress::new(config).context("Failed to initialize pipeline")?;
    let description = progress.commit_description().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&description)?);
    } else {
        println!("{} {}", description.commit, description.description);
        if !description.href.is_empty() {
            println!("{}", description.href);
        }
    }

    Ok(())
}
