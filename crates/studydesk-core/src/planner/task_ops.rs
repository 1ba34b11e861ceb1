//! Task operations for the Planner.

use jiff::civil::Date;

use super::Planner;
use crate::{
    display::UpdateResult,
    error::{PlannerError, Result},
    models::{Task, TaskId, TaskStatus, TaskUpdate},
    params::{TaskRef, UpdateTask},
};

impl Planner {
    /// Retrieves a task by its ID.
    pub async fn get_task(&self, params: &TaskRef) -> Result<Option<Task>> {
        let id = params.task_id()?;
        let user = self.user.clone();
        self.with_db(move |db| db.get_task(&user, &id)).await
    }

    /// Applies a partial update and reports what changed.
    ///
    /// # Errors
    ///
    /// `PlannerError::InvalidInput` for malformed fields or an update that
    /// changes nothing, `PlannerError::TaskNotFound` for an unknown id.
    pub async fn update_task(&self, params: &UpdateTask) -> Result<UpdateResult<Task>> {
        let id = TaskRef {
            id: params.id.clone(),
        }
        .task_id()?;
        let now = self.clock.now();
        let update = params.validate(now.time_zone(), self.catalog())?;
        if update.is_empty() {
            return Err(PlannerError::invalid_input("update")
                .with_reason("No changes specified for the task"));
        }

        let changes = update.change_summary();
        let task = self
            .apply_update(&id, update.touched_at(now.timestamp()))
            .await?;
        Ok(UpdateResult::with_changes(task, changes))
    }

    /// Moves a task to `status`.
    pub async fn set_task_status(&self, params: &TaskRef, status: TaskStatus) -> Result<Task> {
        let id = params.task_id()?;
        let now = self.clock.now().timestamp();
        self.apply_update(&id, TaskUpdate::status(status).touched_at(now))
            .await
    }

    /// Removes a task and returns it.
    pub async fn remove_task(&self, params: &TaskRef) -> Result<Task> {
        let id = params.task_id()?;
        let week_start = self.task_week(&id).await?;

        let mut session = self.session(week_start).await?;
        let Some(task) = session.store.task(&id).cloned() else {
            return Err(PlannerError::TaskNotFound { id: id.to_string() });
        };
        session.store.remove_task(&id);
        session.store.touch(self.clock.now().timestamp());
        let plan = session.store.week_plan().cloned();

        let user = self.user.clone();
        let removed = id.clone();
        let persisted = self
            .with_db(move |db| match plan {
                Some(plan) => db.delete_task(&user, &plan, &removed),
                None => Ok(false),
            })
            .await;

        match persisted {
            Ok(true) => {
                log::info!("Removed task {id}");
                Ok(task)
            }
            Ok(false) => {
                session.invalidate();
                Err(PlannerError::TaskNotFound { id: id.to_string() })
            }
            Err(e) => {
                session.invalidate();
                Err(e)
            }
        }
    }

    async fn task_week(&self, id: &TaskId) -> Result<Date> {
        let user = self.user.clone();
        let lookup = id.clone();
        self.with_db(move |db| db.find_task_week(&user, &lookup))
            .await?
            .ok_or_else(|| PlannerError::TaskNotFound { id: id.to_string() })
    }

    /// Updates the task in its week's store, then writes it back.
    async fn apply_update(&self, id: &TaskId, update: TaskUpdate) -> Result<Task> {
        let week_start = self.task_week(id).await?;

        let mut session = self.session(week_start).await?;
        if !session.store.update_task(id, update) {
            return Err(PlannerError::TaskNotFound { id: id.to_string() });
        }
        let (Some(task), Some(plan)) = (
            session.store.task(id).cloned(),
            session.store.week_plan().cloned(),
        ) else {
            return Err(PlannerError::TaskNotFound { id: id.to_string() });
        };

        let user = self.user.clone();
        let stored = task.clone();
        let persisted = self
            .with_db(move |db| db.update_task(&user, &plan, &stored))
            .await;

        match persisted {
            Ok(true) => Ok(task),
            Ok(false) => {
                session.invalidate();
                Err(PlannerError::TaskNotFound { id: id.to_string() })
            }
            Err(e) => {
                session.invalidate();
                Err(e)
            }
        }
    }
}
