//! Week plan persistence.

use jiff::{civil::Date, Timestamp};
use rusqlite::{params, OptionalExtension, Row, Transaction};

use super::parse_text;
use crate::{
    error::{DatabaseResultExt, Result},
    models::{UserId, WeekMeta, WeekPlan},
};

const UPSERT_WEEK_SQL: &str = "INSERT INTO week_plans \
     (user_id, id, week_start, streak, total_study_hours, completed_tasks, total_tasks, created_at, updated_at) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9) \
     ON CONFLICT (user_id, id) DO UPDATE SET \
     week_start = excluded.week_start, streak = excluded.streak, \
     total_study_hours = excluded.total_study_hours, completed_tasks = excluded.completed_tasks, \
     total_tasks = excluded.total_tasks, updated_at = excluded.updated_at";
const WEEK_COLUMNS: &str =
    "id, week_start, streak, total_study_hours, completed_tasks, total_tasks, created_at, updated_at";
const DELETE_WEEK_TASKS_SQL: &str = "DELETE FROM tasks WHERE user_id = ?1 AND week_plan_id = ?2";

impl super::Database {
    /// Writes `plan` for `user`, replacing the stored header and task list.
    pub fn upsert_week_plan(&mut self, user: &UserId, plan: &WeekPlan) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        write_week_header(&tx, user, plan)?;
        tx.execute(DELETE_WEEK_TASKS_SQL, params![user.as_str(), &plan.id])
            .db_context("Failed to clear week tasks")?;
        for (order, task) in plan.tasks.iter().enumerate() {
            super::task_queries::insert_task(&tx, user, &plan.id, order as i64, task)?;
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }

    /// The plan of `user` for the week starting at `week_start`, with its
    /// tasks in insertion order.
    pub fn get_week_plan(&self, user: &UserId, week_start: Date) -> Result<Option<WeekPlan>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {WEEK_COLUMNS} FROM week_plans WHERE user_id = ?1 AND week_start = ?2"
            ))
            .db_context("Failed to prepare query")?;

        let plan = stmt
            .query_row(params![user.as_str(), week_start.to_string()], week_from_row)
            .optional()
            .db_context("Failed to query week plan")?;

        match plan {
            Some(mut plan) => {
                plan.tasks = self.get_week_tasks(user, &plan.id)?;
                Ok(Some(plan))
            }
            None => Ok(None),
        }
    }

    /// All plans of `user`, newest week first, without their tasks.
    pub fn list_week_plans(&self, user: &UserId) -> Result<Vec<WeekPlan>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {WEEK_COLUMNS} FROM week_plans WHERE user_id = ?1 ORDER BY week_start DESC"
            ))
            .db_context("Failed to prepare query")?;

        let plans = stmt
            .query_map(params![user.as_str()], week_from_row)
            .db_context("Failed to query week plans")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read week plans")?;

        Ok(plans)
    }
}

/// Inserts or updates the `week_plans` row of `plan`.
pub(super) fn write_week_header(tx: &Transaction<'_>, user: &UserId, plan: &WeekPlan) -> Result<()> {
    tx.execute(
        UPSERT_WEEK_SQL,
        params![
            user.as_str(),
            &plan.id,
            plan.week_start.to_string(),
            plan.meta.streak,
            plan.meta.total_study_hours,
            plan.meta.completed_tasks,
            plan.meta.total_tasks,
            plan.created_at.to_string(),
            plan.updated_at.to_string(),
        ],
    )
    .db_context("Failed to write week plan")?;
    Ok(())
}

fn week_from_row(row: &Row<'_>) -> rusqlite::Result<WeekPlan> {
    Ok(WeekPlan {
        id: row.get(0)?,
        week_start: parse_text::<Date>(1, &row.get::<_, String>(1)?, "week start")?,
        meta: WeekMeta {
            streak: row.get(2)?,
            total_study_hours: row.get(3)?,
            completed_tasks: row.get(4)?,
            total_tasks: row.get(5)?,
        },
        created_at: parse_text::<Timestamp>(6, &row.get::<_, String>(6)?, "timestamp")?,
        updated_at: parse_text::<Timestamp>(7, &row.get::<_, String>(7)?, "timestamp")?,
        tasks: Vec::new(),
    })
}
