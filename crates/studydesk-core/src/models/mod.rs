//! Data models for subjects, tasks and week plans.
//!
//! Display implementations for these models live in
//! [`crate::display::models`], keeping presentation apart from the data.
//!
//! # Examples
//!
//! ```rust
//! use jiff::{civil::date, Timestamp};
//! use studydesk_core::models::{Priority, Task, TaskId, TaskStatus, WeekPlan};
//!
//! let now = Timestamp::now();
//! let mut plan = WeekPlan::new(date(2026, 10, 19), now);
//! plan.tasks.push(Task {
//!     id: TaskId::new("t-1"),
//!     title: "Solve practice exercises".to_string(),
//!     subject_id: None,
//!     linked_goal_id: Some("10.3.2.1".to_string()),
//!     due_date: now,
//!     estimated_effort: 45,
//!     status: TaskStatus::Pending,
//!     created_at: now,
//!     updated_at: now,
//!     position: now.as_millisecond(),
//!     priority: Priority::Medium,
//!     tags: Default::default(),
//! });
//! plan.sync_counters();
//! assert_eq!(plan.meta.total_tasks, 1);
//! println!("{plan}");
//! ```

pub mod parsed;
pub mod requests;
pub mod status;
pub mod subject;
pub mod task;
pub mod view;
pub mod week;

#[cfg(test)]
mod tests;

pub use parsed::ParsedTask;
pub use requests::{MetaUpdate, TaskUpdate};
pub use status::{Priority, TaskStatus};
pub use subject::{Subject, SubjectId};
pub use task::{Task, TaskId};
pub use view::{UserId, ViewMode, ViewSettings, ViewUpdate};
pub use week::{week_start_of, WeekMeta, WeekPlan};
