//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper renders its items with their own `Display` impl and prints a
//! fixed message when empty.

use std::{fmt, ops::Index};

use super::datetime::LocalDateTime;
use crate::models::{Subject, Task, WeekPlan};

/// Newtype wrapper for displaying a list of tasks.
///
/// # Examples
///
/// ```rust
/// use jiff::Timestamp;
/// use studydesk_core::{
///     display::Tasks,
///     models::{Priority, Task, TaskId, TaskStatus},
/// };
///
/// let now = Timestamp::now();
/// let task = Task {
///     id: TaskId::new("t-1"),
///     title: "Read chapter 5".to_string(),
///     subject_id: None,
///     linked_goal_id: None,
///     due_date: now,
///     estimated_effort: 120,
///     status: TaskStatus::Pending,
///     created_at: now,
///     updated_at: now,
///     position: now.as_millisecond(),
///     priority: Priority::High,
///     tags: Default::default(),
/// };
/// let output = Tasks(vec![task]).to_string();
/// assert!(output.contains("Read chapter 5"));
/// assert!(output.contains("2h"));
/// ```
pub struct Tasks(pub Vec<Task>);

impl Tasks {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.0.iter()
    }
}

impl Index<usize> for Tasks {
    type Output = Task;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Tasks {
    type Item = Task;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Tasks {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Tasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No tasks found.")
        } else {
            for task in &self.0 {
                write!(f, "{task}")?;
            }
            Ok(())
        }
    }
}

/// The subject catalog as a markdown list.
pub struct Subjects(pub Vec<Subject>);

impl fmt::Display for Subjects {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No subjects configured.");
        }
        for subject in &self.0 {
            write!(f, "{subject}")?;
        }
        Ok(())
    }
}

/// One line per stored week: start date, progress and streak. Tasks are not
/// shown.
pub struct WeekSummaries(pub Vec<WeekPlan>);

impl WeekSummaries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for WeekSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No weeks planned yet.");
        }
        for plan in &self.0 {
            writeln!(
                f,
                "## Week of {} ({}/{})",
                plan.week_start, plan.meta.completed_tasks, plan.meta.total_tasks
            )?;
            writeln!(f)?;
            writeln!(f, "- Streak: {} days", plan.meta.streak)?;
            writeln!(f, "- Study hours: {}", plan.meta.total_study_hours)?;
            writeln!(f, "- Updated: {}", LocalDateTime(&plan.updated_at))?;
            writeln!(f)?;
        }
        Ok(())
    }
}
