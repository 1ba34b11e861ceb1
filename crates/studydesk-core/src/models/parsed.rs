//! The transient result of parsing Quick-Add text.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Priority, SubjectId, TaskStatus};

/// Structured fields extracted from free text. Has no identity and is never
/// persisted; [`crate::TaskFactory`] turns it into a [`super::Task`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedTask {
    pub subject_id: Option<SubjectId>,
    pub linked_goal_id: Option<String>,
    pub due_date: Timestamp,
    /// Minutes
    pub estimated_effort: u32,
    pub title: String,
    pub priority: Priority,
    /// Always [`TaskStatus::Pending`]
    pub status: TaskStatus,
}

impl ParsedTask {
    /// Default estimated effort when the text names none.
    pub const DEFAULT_EFFORT_MINUTES: u32 = 30;

    /// A draft with every field at its default, due at `due_date`.
    pub fn draft(due_date: Timestamp) -> Self {
        Self {
            subject_id: None,
            linked_goal_id: None,
            due_date,
            estimated_effort: Self::DEFAULT_EFFORT_MINUTES,
            title: String::new(),
            priority: Priority::Medium,
            status: TaskStatus::Pending,
        }
    }
}
