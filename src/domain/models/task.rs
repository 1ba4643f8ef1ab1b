//! Task domain model.
//!
//! Tasks are the units of work in a commit's task group. The poller only
//! cares about whether a task has reached a terminal state.

use serde::{Deserialize, Serialize};

/// Execution state of a task as reported by the queue service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Unscheduled,
    Pending,
    Running,
    /// Task finished successfully
    Completed,
    /// Task finished unsuccessfully
    Failed,
    /// Task hit an internal error
    Exception,
    /// Any state this crate does not know about
    #[serde(other)]
    Unknown,
}

impl TaskState {
    /// Terminal states admit no further transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unscheduled => "unscheduled",
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Exception => "exception",
            Self::Unknown => "unknown",
        }
    }
}

/// One unit of work in a task group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskRef {
    pub task_id: String,
    pub name: String,
    pub state: TaskState,
}

/// The filtered, fully terminal task set for one commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedTasks {
    pub commit: String,
    pub tasks: Vec<TaskRef>,
}

impl CompletedTasks {
    /// Build a set with duplicate task ids removed, preserving first-seen order.
    pub fn new(commit: impl Into<String>, tasks: Vec<TaskRef>) -> Self {
        let mut seen = std::collections::HashSet::new();
        let tasks = tasks
            .into_iter()
            .filter(|task| seen.insert(task.task_id.clone()))
            .collect();
        Self {
            commit: commit.into(),
            tasks,
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
