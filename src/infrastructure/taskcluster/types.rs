//! Wire types for the index and queue REST APIs.

use serde::Deserialize;

use crate::domain::models::{TaskRef, TaskState};

/// One entry of a `listNamespaces` page.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexedNamespace {
    pub name: String,
    pub namespace: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNamespacesResponse {
    #[serde(default)]
    pub namespaces: Vec<IndexedNamespace>,
    #[serde(default)]
    pub continuation_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindTaskResponse {
    pub task_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatusSummary {
    pub state: TaskState,
    pub task_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskMetadata {
    pub name: String,
}

/// One member of a task-group listing page.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskGroupMember {
    pub status: TaskStatusSummary,
    pub metadata: TaskMetadata,
}

impl TaskGroupMember {
    pub fn to_task_ref(&self) -> TaskRef {
        TaskRef {
            task_id: self.status.task_id.clone(),
            name: self.metadata.name.clone(),
            state: self.status.state.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTaskGroupResponse {
    #[serde(default)]
    pub tasks: Vec<TaskGroupMember>,
    #[serde(default)]
    pub continuation_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Artifact {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListArtifactsResponse {
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}
