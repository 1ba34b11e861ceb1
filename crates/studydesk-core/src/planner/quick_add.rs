//! Quick-Add: free text in, persisted task out.

use super::Planner;
use crate::{
    error::{PlannerError, Result},
    models::{ParsedTask, Task},
    params::QuickAdd,
    parser::ParseError,
};

impl Planner {
    /// Parses `params.text` and returns the result without storing anything.
    ///
    /// # Errors
    ///
    /// `PlannerError::Unparseable` for empty input or when no due date can be
    /// built.
    pub async fn preview(&self, params: &QuickAdd) -> Result<ParsedTask> {
        let now = self.clock.now();
        self.parser
            .try_parse(&params.text, &now)
            .map_err(|e| unparseable(&params.text, e))
    }

    /// Parses `params.text`, creates a task and adds it to the plan of the
    /// week the task is due in.
    ///
    /// The task is appended to the in-memory plan first and written to the
    /// database afterwards. If the write fails, the cached week is reset under
    /// its lock so it is reloaded from the database on next use.
    ///
    /// # Errors
    ///
    /// `PlannerError::Unparseable` when the text yields no task, and database
    /// errors from persisting it.
    pub async fn quick_add(&self, params: &QuickAdd) -> Result<Task> {
        let parsed = self.preview(params).await?;
        let task = self.factory.create_task(parsed);
        let week_start = self.week_start_at(task.due_date)?;

        let mut session = self.session(week_start).await?;
        if !session.store.add_task(task.clone()) {
            return Err(PlannerError::Configuration {
                message: format!("Generated task id {} is already in use", task.id),
            });
        }
        let Some(plan) = session.store.week_plan().cloned() else {
            return Err(PlannerError::Configuration {
                message: format!("Week plan for {week_start} missing after adding a task"),
            });
        };

        let user = self.user.clone();
        let stored = task.clone();
        let persisted = self
            .with_db(move |db| db.add_task(&user, &plan, &stored))
            .await;
        if let Err(e) = persisted {
            session.invalidate();
            return Err(e);
        }

        log::info!("Added task {} to week of {week_start}", task.id);
        Ok(task)
    }
}

fn unparseable(input: &str, error: ParseError) -> PlannerError {
    if let ParseError::DateTime(e) = &error {
        log::warn!("Quick-Add parse of {input:?} failed: {e}");
    }
    PlannerError::Unparseable {
        input: input.to_string(),
        reason: error.to_string(),
    }
}
