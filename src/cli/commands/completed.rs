use anyhow::{Context, Result};

use crate::cli::output;
use crate::domain::models::ProgressConfig;
use crate::services::progress::Progress;

/// Resolve the newest completed commit and list its task set.
pub async fn execute(config: ProgressConfig, json: bool) -> Result<()> {
    let mut progress = Progress::new(config).context("Failed to initialize pipeline")?;
    let completed = progress
        .completed_tasks()
        .await
        .context("Failed to resolve completed tasks")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&completed)?);
    } else {
        println!(
            "Commit {} is complete with {} tasks",
            completed.commit,
            completed.len()
        );
        println!("{}", output::task_table(&completed.tasks));
    }

    Ok(())
}
