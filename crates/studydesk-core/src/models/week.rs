//! Week plan aggregate and week arithmetic.

use jiff::{
    civil::{Date, Weekday},
    Timestamp, ToSpan,
};
use serde::{Deserialize, Serialize};

use super::{SubjectId, Task, TaskId};
use crate::error::Result;

/// Summary counters stored alongside a week's tasks.
///
/// `total_tasks` and `completed_tasks` are recounted by the planner store on
/// every task mutation. `streak` and `total_study_hours` are maintained by
/// callers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WeekMeta {
    pub streak: u32,
    pub total_study_hours: f64,
    pub completed_tasks: u32,
    pub total_tasks: u32,
}

/// The aggregate root holding one week's tasks plus summary metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeekPlan {
    /// Identifier, unique per user
    pub id: String,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,

    /// First day of the week this plan covers
    pub week_start: Date,

    #[serde(default)]
    pub meta: WeekMeta,

    /// Tasks in insertion order
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl WeekPlan {
    /// Creates an empty plan for the week starting at `week_start`.
    pub fn new(week_start: Date, created_at: Timestamp) -> Self {
        Self {
            id: Self::id_for(week_start),
            created_at,
            updated_at: created_at,
            week_start,
            meta: WeekMeta::default(),
            tasks: Vec::new(),
        }
    }

    /// The plan id used for the week starting at `week_start`.
    pub fn id_for(week_start: Date) -> String {
        format!("week-{week_start}")
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn contains(&self, id: &TaskId) -> bool {
        self.task(id).is_some()
    }

    /// Recounts `total_tasks` and `completed_tasks` from `tasks`.
    pub fn sync_counters(&mut self) {
        self.meta.total_tasks = self.tasks.len() as u32;
        self.meta.completed_tasks = self.tasks.iter().filter(|t| t.is_completed()).count() as u32;
    }

    /// Sum of estimated effort over all tasks, in minutes.
    pub fn planned_minutes(&self) -> u64 {
        self.tasks.iter().map(|t| u64::from(t.estimated_effort)).sum()
    }

    /// Sum of estimated effort over completed tasks, in minutes.
    pub fn completed_minutes(&self) -> u64 {
        self.tasks
            .iter()
            .filter(|t| t.is_completed())
            .map(|t| u64::from(t.estimated_effort))
            .sum()
    }

    /// Tasks ordered for rendering: by due date, then by position.
    ///
    /// The stored order is insertion order; sorting is a view concern.
    pub fn sorted_tasks(&self) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.tasks.iter().collect();
        tasks.sort_by(|a, b| {
            a.due_date
                .cmp(&b.due_date)
                .then_with(|| a.position.cmp(&b.position))
        });
        tasks
    }

    /// Tasks whose subject is one of `subjects`; all tasks when empty.
    pub fn tasks_for_subjects<'a>(&'a self, subjects: &'a [SubjectId]) -> Vec<&'a Task> {
        self.sorted_tasks()
            .into_iter()
            .filter(|task| {
                subjects.is_empty()
                    || task
                        .subject_id
                        .as_ref()
                        .is_some_and(|id| subjects.contains(id))
            })
            .collect()
    }

    /// The last day covered by this plan.
    pub fn week_end(&self) -> Result<Date> {
        Ok(self.week_start.checked_add(6.days())?)
    }
}

/// Returns the first day of the week containing `date`, where weeks begin on
/// `first_day`.
///
/// ```rust
/// use jiff::civil::{date, Weekday};
/// use studydesk_core::models::week_start_of;
///
/// // 2026-10-22 is a Thursday
/// let thursday = date(2026, 10, 22);
/// assert_eq!(week_start_of(thursday, Weekday::Monday)?, date(2026, 10, 19));
/// assert_eq!(week_start_of(thursday, Weekday::Sunday)?, date(2026, 10, 18));
/// # Ok::<(), studydesk_core::PlannerError>(())
/// ```
pub fn week_start_of(date: Date, first_day: Weekday) -> Result<Date> {
    let offset = (date.weekday().to_monday_zero_offset() - first_day.to_monday_zero_offset())
        .rem_euclid(7);
    Ok(date.checked_sub(i64::from(offset).days())?)
}
