//! Task model definition and related functionality.

use std::{collections::BTreeSet, fmt};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Priority, SubjectId, TaskStatus};

/// Unique, generated identifier of a task.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TaskId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A planned piece of study work inside a week plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Unique identifier for the task
    pub id: TaskId,

    /// Title of the task
    pub title: String,

    /// Subject the task belongs to, if one was recognized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<SubjectId>,

    /// Dotted curriculum objective code, e.g. `10.3.2.1`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_goal_id: Option<String>,

    /// When the task is due (UTC instant)
    pub due_date: Timestamp,

    /// Estimated effort in minutes
    pub estimated_effort: u32,

    /// Current status of the task
    #[serde(default)]
    pub status: TaskStatus,

    /// Timestamp when the task was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the task was last modified (UTC)
    pub updated_at: Timestamp,

    /// Sort key within a day or list; creation time in milliseconds
    pub position: i64,

    /// Task priority
    #[serde(default)]
    pub priority: Priority,

    /// Free-form tags; contains the subject id when one is set
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}
