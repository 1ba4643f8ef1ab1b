//! Concurrent wptreport artifact downloads.

use futures::future::join_all;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::models::{ArtifactPolicy, TaskRef, WptReport};
use crate::infrastructure::taskcluster::{QueueClient, TaskclusterError};

/// Filename suffix identifying report artifacts.
pub const REPORT_SUFFIX: &str = "wptreport.json";

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("failed to list artifacts for task {task_id}: {source}")]
    List {
        task_id: String,
        #[source]
        source: TaskclusterError,
    },

    #[error("failed to fetch {name} from task {task_id}: {source}")]
    Fetch {
        task_id: String,
        name: String,
        #[source]
        source: TaskclusterError,
    },
}

pub struct ArtifactFetcher<'a> {
    queue: &'a QueueClient,
    policy: ArtifactPolicy,
}

impl<'a> ArtifactFetcher<'a> {
    pub fn new(queue: &'a QueueClient, policy: ArtifactPolicy) -> Self {
        Self { queue, policy }
    }

    /// Download every report artifact attached to the completed task set.
    ///
    /// Artifact listings stay sequential; only the content downloads fan out.
    /// All downloads settle before the partial-failure policy applies, so a
    /// fail-fast abort never races an in-flight request.
    pub async fn download_reports(
        &self,
        tasks: &[TaskRef],
    ) -> Result<Vec<WptReport>, ArtifactError> {
        info!("downloading artifacts for {} tasks", tasks.len());

        let mut targets: Vec<(String, String)> = Vec::new();
        for task in tasks {
            let artifacts = self
                .queue
                .list_latest_artifacts(&task.task_id)
                .await
                .map_err(|source| ArtifactError::List {
                    task_id: task.task_id.clone(),
                    source,
                })?;
            for artifact in artifacts
                .into_iter()
                .filter(|artifact| artifact.name.ends_with(REPORT_SUFFIX))
            {
                targets.push((task.task_id.clone(), artifact.name));
            }
        }

        let downloads = targets.iter().map(|(task_id, name)| async move {
            self.queue
                .fetch_artifact::<WptReport>(task_id, name)
                .await
                .map_err(|source| ArtifactError::Fetch {
                    task_id: task_id.clone(),
                    name: name.clone(),
                    source,
                })
        });
        let settled = join_all(downloads).await;

        let mut reports = Vec::with_capacity(settled.len());
        for result in settled {
            match result {
                Ok(report) => reports.push(report),
                Err(err) => match self.policy {
                    ArtifactPolicy::FailFast => return Err(err),
                    ArtifactPolicy::SkipFailed => warn!("skipping report: {err}"),
                },
            }
        }
        info!("downloaded {} reports", reports.len());
        Ok(reports)
    }
}
