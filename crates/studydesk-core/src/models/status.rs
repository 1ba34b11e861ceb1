//! Status and priority enumerations for tasks.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of task statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has not been started
    #[default]
    Pending,

    /// Task is being worked on
    InProgress,

    /// Task has been completed
    Completed,
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" | "todo" => Ok(TaskStatus::Pending),
            "in_progress" | "inprogress" | "in-progress" => Ok(TaskStatus::InProgress),
            "completed" | "done" => Ok(TaskStatus::Completed),
            _ => Err(format!("Invalid task status: {s}")),
        }
    }
}

impl TaskStatus {
    /// Convert to the persisted string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// ```rust
    /// use studydesk_core::models::TaskStatus;
    ///
    /// assert_eq!(TaskStatus::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(TaskStatus::InProgress.with_icon(), "➤ In Progress");
    /// assert_eq!(TaskStatus::Pending.with_icon(), "○ Pending");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            TaskStatus::Completed => "✓ Completed",
            TaskStatus::InProgress => "➤ In Progress",
            TaskStatus::Pending => "○ Pending",
        }
    }
}

/// Task priority. Quick-Add markers: `!important`/`!high` and `!low`.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" | "normal" => Ok(Priority::Medium),
            "high" | "important" => Ok(Priority::High),
            _ => Err(format!("Invalid priority: {s}")),
        }
    }
}

impl Priority {
    /// Convert to the persisted string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}
