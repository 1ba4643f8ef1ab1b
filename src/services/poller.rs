//! Completion polling.
//!
//! Finds the newest commit at or behind a starting ref whose filtered task
//! group is fully terminal. Strictly sequential: one page or commit in flight
//! at a time.

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::models::{CompletedTasks, TaskRef};
use crate::infrastructure::hg::{HgClient, HgError};
use crate::infrastructure::taskcluster::types::TaskGroupMember;
use crate::infrastructure::taskcluster::{IndexClient, QueueClient, TaskclusterError};
use crate::services::filter::TaskFilter;

#[derive(Error, Debug)]
pub enum PollError {
    #[error(transparent)]
    Taskcluster(#[from] TaskclusterError),

    #[error(transparent)]
    Hg(#[from] HgError),

    /// Raised only when scan mode is off; scan mode turns this condition into
    /// "try the next older commit".
    #[error("commit {0} is not complete")]
    IncompleteCommit(String),
}

pub struct CompletionPoller<'a> {
    index: &'a IndexClient,
    queue: &'a QueueClient,
    hg: &'a HgClient,
    filter: &'a TaskFilter,
    channel: &'a str,
    scan: bool,
}

impl<'a> CompletionPoller<'a> {
    pub fn new(
        index: &'a IndexClient,
        queue: &'a QueueClient,
        hg: &'a HgClient,
        filter: &'a TaskFilter,
        channel: &'a str,
        scan: bool,
    ) -> Self {
        Self {
            index,
            queue,
            hg,
            filter,
            channel,
            scan,
        }
    }

    /// Poll for the newest complete commit at or behind `start_ref`.
    ///
    /// The attempt budget is the number of indexed revisions; `Ok(None)`
    /// means the budget was exhausted, or the walk ran out of history before
    /// reaching any indexed commit, without finding a complete one. That is a
    /// "not found", not an error.
    pub async fn poll(&self, start_ref: &str) -> Result<Option<CompletedTasks>, PollError> {
        info!("getting revisions for {}", self.channel);
        let revisions = self.index.list_revisions(self.channel).await?;
        info!("got {} revisions", revisions.len());

        let mut remaining = revisions.len();
        info!("finding first completed task group");
        while remaining > 0 {
            let mut walker = self.hg.walk(start_ref);
            let mut evaluated = 0usize;
            while let Some(commit) = walker.next().await? {
                debug!("checking if {commit} has completed");
                if !revisions.contains_key(&commit) {
                    continue;
                }

                let outcome = self.evaluate(&commit).await?;
                remaining = remaining.saturating_sub(1);
                evaluated += 1;

                match outcome {
                    Some(tasks) => {
                        info!("commit {commit} is complete, {} tasks survive", tasks.len());
                        return Ok(Some(CompletedTasks::new(commit, tasks)));
                    }
                    None => {
                        if !self.scan {
                            return Err(PollError::IncompleteCommit(commit));
                        }
                        debug!("commit {commit} is not complete, scanning older commits");
                        if remaining == 0 {
                            return Ok(None);
                        }
                    }
                }
            }
            // A full pass that never reached an indexed commit would loop
            // forever; treat it as exhaustion.
            if evaluated == 0 {
                break;
            }
        }

        Ok(None)
    }

    /// Judge one commit's task group. `None` means at least one surviving
    /// task is not yet terminal; later pages are not fetched once that is
    /// known.
    async fn evaluate(&self, commit: &str) -> Result<Option<Vec<TaskRef>>, PollError> {
        let decision_path = format!(
            "gecko.v2.{}.revision.{commit}.taskgraph.decision",
            self.channel
        );
        let task_group_id = self.index.find_task(&decision_path).await?;

        let mut completed: Vec<TaskRef> = Vec::new();
        let mut token: Option<String> = None;
        loop {
            let page = self
                .queue
                .list_task_group(&task_group_id, token.as_deref())
                .await?;

            let surviving: Vec<TaskRef> = page
                .tasks
                .iter()
                .filter(|member| self.filter.matches(&member.metadata.name))
                .map(TaskGroupMember::to_task_ref)
                .collect();

            if surviving.iter().any(|task| !task.state.is_terminal()) {
                return Ok(None);
            }
            completed.extend(surviving);

            token = page.continuation_token;
            if token.is_none() {
                break;
            }
        }

        Ok(Some(completed))
    }
}
