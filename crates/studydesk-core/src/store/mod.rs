//! In-memory planner state for one user's week.
//!
//! [`PlannerStore`] holds at most one [`WeekPlan`] plus the view settings the
//! week is rendered with. Every mutation runs to completion under `&mut self`;
//! hosts that share a store across tasks go through a [`StoreRegistry`].
//!
//! Mutations that cannot apply (no plan yet, unknown task id) are no-ops that
//! return `false` and never error.

use jiff::{civil::Date, Timestamp};

use crate::models::{MetaUpdate, SubjectId, Task, TaskId, TaskUpdate, ViewMode, WeekPlan};

pub mod registry;
pub mod snapshot;


pub use registry::{Session, SessionKey, StoreRegistry};
pub use snapshot::{PlannerSnapshot, SnapshotFile, SNAPSHOT_VERSION};

/// Current week plan plus view state.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerStore {
    week_plan: Option<WeekPlan>,
    current_week_start: Date,
    view_mode: ViewMode,
    selected_subjects: Vec<SubjectId>,
    show_heatmap: bool,
}

impl PlannerStore {
    /// Empty store positioned on the week starting at `current_week_start`.
    pub fn new(current_week_start: Date) -> Self {
        Self {
            week_plan: None,
            current_week_start,
            view_mode: ViewMode::default(),
            selected_subjects: Vec::new(),
            show_heatmap: false,
        }
    }

    pub fn week_plan(&self) -> Option<&WeekPlan> {
        self.week_plan.as_ref()
    }

    pub fn current_week_start(&self) -> Date {
        self.current_week_start
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn selected_subjects(&self) -> &[SubjectId] {
        &self.selected_subjects
    }

    pub fn show_heatmap(&self) -> bool {
        self.show_heatmap
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.week_plan.as_ref().and_then(|plan| plan.task(id))
    }

    /// Appends `task` to the current plan.
    ///
    /// Without a plan, one is synthesized for `current_week_start` using the
    /// task's creation time. Tasks are never re-sorted. Returns `false` when
    /// a task with the same id is already present.
    pub fn add_task(&mut self, task: Task) -> bool {
        let week_start = self.current_week_start;
        let plan = self
            .week_plan
            .get_or_insert_with(|| WeekPlan::new(week_start, task.created_at));

        if plan.contains(&task.id) {
            log::debug!("Task {} already in {}, not adding", task.id, plan.id);
            return false;
        }

        plan.updated_at = plan.updated_at.max(task.updated_at);
        plan.tasks.push(task);
        plan.sync_counters();
        true
    }

    /// Merges `update` into the task with `id`. Other tasks keep their order
    /// and contents.
    pub fn update_task(&mut self, id: &TaskId, update: TaskUpdate) -> bool {
        let Some(plan) = self.week_plan.as_mut() else {
            log::debug!("No week plan loaded, ignoring update of {id}");
            return false;
        };
        let Some(task) = plan.tasks.iter_mut().find(|task| &task.id == id) else {
            log::debug!("Task {id} not in {}, ignoring update", plan.id);
            return false;
        };

        if let Some(at) = update.updated_at {
            plan.updated_at = plan.updated_at.max(at);
        }
        update.apply_to(task);
        plan.sync_counters();
        true
    }

    /// Removes the task with `id`; the task list is untouched when it is not
    /// present.
    pub fn remove_task(&mut self, id: &TaskId) -> bool {
        let Some(plan) = self.week_plan.as_mut() else {
            log::debug!("No week plan loaded, ignoring removal of {id}");
            return false;
        };
        let Some(index) = plan.tasks.iter().position(|task| &task.id == id) else {
            log::debug!("Task {id} not in {}, ignoring removal", plan.id);
            return false;
        };

        plan.tasks.remove(index);
        plan.sync_counters();
        true
    }

    /// Applies caller-maintained counters to the current plan.
    pub fn update_meta(&mut self, update: &MetaUpdate) -> bool {
        match self.week_plan.as_mut() {
            Some(plan) => {
                update.apply_to(&mut plan.meta);
                true
            }
            None => {
                log::debug!("No week plan loaded, ignoring meta update");
                false
            }
        }
    }

    /// Bumps the plan's modification time.
    pub fn touch(&mut self, now: Timestamp) {
        if let Some(plan) = self.week_plan.as_mut() {
            plan.updated_at = now;
        }
    }

    pub fn set_week_plan(&mut self, plan: Option<WeekPlan>) {
        self.week_plan = plan;
    }

    pub fn take_week_plan(&mut self) -> Option<WeekPlan> {
        self.week_plan.take()
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn set_current_week_start(&mut self, week_start: Date) {
        self.current_week_start = week_start;
    }

    pub fn set_selected_subjects(&mut self, subjects: Vec<SubjectId>) {
        self.selected_subjects = subjects;
    }

    pub fn set_show_heatmap(&mut self, show: bool) {
        self.show_heatmap = show;
    }

    /// Tasks of the current plan filtered by the selected subjects, in
    /// rendering order.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        match &self.week_plan {
            Some(plan) => plan.tasks_for_subjects(&self.selected_subjects),
            None => Vec::new(),
        }
    }
}
