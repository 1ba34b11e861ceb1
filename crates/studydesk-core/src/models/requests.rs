//! Request types for updating models.

use std::collections::BTreeSet;

use jiff::Timestamp;

use super::{Priority, SubjectId, Task, TaskStatus, WeekMeta};

/// Partial update of a task. `None` leaves the field untouched; the doubly
/// optional fields use `Some(None)` to clear a value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub subject_id: Option<Option<SubjectId>>,
    pub linked_goal_id: Option<Option<String>>,
    pub due_date: Option<Timestamp>,
    pub estimated_effort: Option<u32>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub position: Option<i64>,
    pub tags: Option<BTreeSet<String>>,
    pub updated_at: Option<Timestamp>,
}

impl TaskUpdate {
    /// An update that only changes the status.
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Sets the modification timestamp carried by this update.
    pub fn touched_at(mut self, now: Timestamp) -> Self {
        self.updated_at = Some(now);
        self
    }

    /// Whether the update changes nothing besides the timestamp.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.subject_id.is_none()
            && self.linked_goal_id.is_none()
            && self.due_date.is_none()
            && self.estimated_effort.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.position.is_none()
            && self.tags.is_none()
    }

    /// Human readable list of the fields this update sets.
    pub fn change_summary(&self) -> Vec<String> {
        let mut changes = Vec::new();
        if let Some(title) = &self.title {
            changes.push(format!("Title: {title}"));
        }
        if let Some(subject) = &self.subject_id {
            changes.push(match subject {
                Some(id) => format!("Subject: {id}"),
                None => "Subject cleared".to_string(),
            });
        }
        if let Some(goal) = &self.linked_goal_id {
            changes.push(match goal {
                Some(code) => format!("Objective: {code}"),
                None => "Objective cleared".to_string(),
            });
        }
        if let Some(due) = &self.due_date {
            changes.push(format!("Due: {due}"));
        }
        if let Some(effort) = self.estimated_effort {
            changes.push(format!("Effort: {effort} min"));
        }
        if let Some(status) = self.status {
            changes.push(format!("Status: {}", status.as_str()));
        }
        if let Some(priority) = self.priority {
            changes.push(format!("Priority: {}", priority.as_str()));
        }
        if let Some(position) = self.position {
            changes.push(format!("Position: {position}"));
        }
        if self.tags.is_some() {
            changes.push("Tags replaced".to_string());
        }
        changes
    }

    /// Merges this update into `task`.
    pub fn apply_to(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(subject_id) = self.subject_id {
            // Keep the subject tag in step unless tags are replaced below
            if let Some(old) = task.subject_id.take() {
                task.tags.remove(old.as_str());
            }
            if let Some(new) = &subject_id {
                task.tags.insert(new.as_str().to_string());
            }
            task.subject_id = subject_id;
        }
        if let Some(linked_goal_id) = self.linked_goal_id {
            task.linked_goal_id = linked_goal_id;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(effort) = self.estimated_effort {
            task.estimated_effort = effort;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(position) = self.position {
            task.position = position;
        }
        if let Some(tags) = self.tags {
            task.tags = tags;
        }
        if let Some(updated_at) = self.updated_at {
            task.updated_at = updated_at;
        }
    }
}

/// Partial update of the caller-maintained week counters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetaUpdate {
    pub streak: Option<u32>,
    pub total_study_hours: Option<f64>,
}

impl MetaUpdate {
    pub fn apply_to(&self, meta: &mut WeekMeta) {
        if let Some(streak) = self.streak {
            meta.streak = streak;
        }
        if let Some(hours) = self.total_study_hours {
            meta.total_study_hours = hours;
        }
    }
}
