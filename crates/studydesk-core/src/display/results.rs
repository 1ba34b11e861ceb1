//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::models::Task;

/// Wrapper type for displaying a newly created resource.
///
/// ```rust
/// use jiff::Timestamp;
/// use studydesk_core::{
///     display::CreateResult,
///     models::{Priority, Task, TaskId, TaskStatus},
/// };
///
/// let now = Timestamp::now();
/// let task = Task {
///     id: TaskId::new("19a0b1c2d3e-5f3a9c01"),
///     title: "Essay outline".to_string(),
///     subject_id: None,
///     linked_goal_id: None,
///     due_date: now,
///     estimated_effort: 30,
///     status: TaskStatus::Pending,
///     created_at: now,
///     updated_at: now,
///     position: now.as_millisecond(),
///     priority: Priority::Medium,
///     tags: Default::default(),
/// };
///
/// let output = CreateResult::new(task).to_string();
/// assert!(output.starts_with("Added task `19a0b1c2d3e-5f3a9c01`"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Task> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Added task `{}`", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying an updated resource and what changed.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl fmt::Display for UpdateResult<Task> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated task `{}`", self.resource.id)?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for confirming a deletion.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Task> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Removed task '{}' (ID: {})",
            self.resource.title, self.resource.id
        )
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::{Priority, TaskId, TaskStatus};

    fn task() -> Task {
        let ts = Timestamp::from_second(1_792_000_000).unwrap();
        Task {
            id: TaskId::new("t-9"),
            title: "Flashcards".to_string(),
            subject_id: None,
            linked_goal_id: None,
            due_date: ts,
            estimated_effort: 20,
            status: TaskStatus::InProgress,
            created_at: ts,
            updated_at: ts,
            position: 1,
            priority: Priority::Low,
            tags: Default::default(),
        }
    }

    #[test]
    fn test_update_result_lists_changes() {
        let output =
            UpdateResult::with_changes(task(), vec!["Status: in_progress".to_string()]).to_string();
        assert!(output.starts_with("Updated task `t-9`"));
        assert!(output.contains("Changes made:\n- Status: in_progress"));
        assert!(output.contains("➤ In Progress"));

        let plain = UpdateResult::new(task()).to_string();
        assert!(!plain.contains("Changes made:"));
    }

    #[test]
    fn test_delete_result() {
        assert_eq!(
            DeleteResult::new(task()).to_string(),
            "Removed task 'Flashcards' (ID: t-9)\n"
        );
    }
}
