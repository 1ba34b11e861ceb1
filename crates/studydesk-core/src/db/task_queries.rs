//! Task persistence.
//!
//! Task writes also rewrite the owning week's header so stored counters
//! always match the in-memory plan they came from.

use std::collections::BTreeSet;

use jiff::{civil::Date, Timestamp};
use rusqlite::{params, OptionalExtension, Row, Transaction};

use super::{parse_text, week_queries::write_week_header};
use crate::{
    error::{DatabaseResultExt, Result},
    models::{Priority, SubjectId, Task, TaskId, TaskStatus, UserId, WeekPlan},
};

const TASK_COLUMNS: &str = "id, title, subject_id, linked_goal_id, due_date, estimated_effort, \
     status, priority, position, tags, created_at, updated_at";
const INSERT_TASK_SQL: &str = "INSERT INTO tasks \
     (user_id, id, week_plan_id, list_order, title, subject_id, linked_goal_id, due_date, \
     estimated_effort, status, priority, position, tags, created_at, updated_at) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)";
const UPDATE_TASK_SQL: &str = "UPDATE tasks SET title = ?3, subject_id = ?4, linked_goal_id = ?5, \
     due_date = ?6, estimated_effort = ?7, status = ?8, priority = ?9, position = ?10, tags = ?11, \
     updated_at = ?12 WHERE user_id = ?1 AND id = ?2";
const DELETE_TASK_SQL: &str = "DELETE FROM tasks WHERE user_id = ?1 AND id = ?2";
const NEXT_ORDER_SQL: &str =
    "SELECT COALESCE(MAX(list_order) + 1, 0) FROM tasks WHERE user_id = ?1 AND week_plan_id = ?2";
const FIND_TASK_WEEK_SQL: &str = "SELECT w.week_start FROM tasks t \
     JOIN week_plans w ON w.user_id = t.user_id AND w.id = t.week_plan_id \
     WHERE t.user_id = ?1 AND t.id = ?2";

impl super::Database {
    /// Appends `task` to the stored copy of `plan`, creating the week row if
    /// needed.
    pub fn add_task(&mut self, user: &UserId, plan: &WeekPlan, task: &Task) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        write_week_header(&tx, user, plan)?;
        let order: i64 = tx
            .query_row(NEXT_ORDER_SQL, params![user.as_str(), &plan.id], |row| {
                row.get(0)
            })
            .db_context("Failed to compute task order")?;
        insert_task(&tx, user, &plan.id, order, task)?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }

    /// Overwrites the stored fields of `task`. Returns `false` when no such
    /// task is stored.
    pub fn update_task(&mut self, user: &UserId, plan: &WeekPlan, task: &Task) -> Result<bool> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let tags = serde_json::to_string(&task.tags)?;
        let changed = tx
            .execute(
                UPDATE_TASK_SQL,
                params![
                    user.as_str(),
                    task.id.as_str(),
                    &task.title,
                    task.subject_id.as_ref().map(SubjectId::as_str),
                    task.linked_goal_id.as_deref(),
                    task.due_date.to_string(),
                    task.estimated_effort,
                    task.status.as_str(),
                    task.priority.as_str(),
                    task.position,
                    tags,
                    task.updated_at.to_string(),
                ],
            )
            .db_context("Failed to update task")?;

        if changed > 0 {
            write_week_header(&tx, user, plan)?;
        }
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(changed > 0)
    }

    /// Deletes the task `id` and stores the remaining counters of `plan`.
    /// Returns `false` when no such task is stored.
    pub fn delete_task(&mut self, user: &UserId, plan: &WeekPlan, id: &TaskId) -> Result<bool> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let deleted = tx
            .execute(DELETE_TASK_SQL, params![user.as_str(), id.as_str()])
            .db_context("Failed to delete task")?;

        if deleted > 0 {
            write_week_header(&tx, user, plan)?;
        }
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(deleted > 0)
    }

    pub fn get_task(&self, user: &UserId, id: &TaskId) -> Result<Option<Task>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = ?1 AND id = ?2"
            ))
            .db_context("Failed to prepare query")?;

        stmt.query_row(params![user.as_str(), id.as_str()], task_from_row)
            .optional()
            .db_context("Failed to query task")
    }

    /// Start of the week whose plan holds task `id`.
    pub fn find_task_week(&self, user: &UserId, id: &TaskId) -> Result<Option<Date>> {
        let week_start: Option<String> = self
            .connection
            .query_row(FIND_TASK_WEEK_SQL, params![user.as_str(), id.as_str()], |row| {
                row.get(0)
            })
            .optional()
            .db_context("Failed to look up task week")?;

        match week_start {
            Some(text) => Ok(Some(text.parse::<Date>()?)),
            None => Ok(None),
        }
    }

    /// Tasks of one week in insertion order.
    pub(super) fn get_week_tasks(&self, user: &UserId, week_plan_id: &str) -> Result<Vec<Task>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = ?1 AND week_plan_id = ?2 \
                 ORDER BY list_order"
            ))
            .db_context("Failed to prepare query")?;

        let tasks = stmt
            .query_map(params![user.as_str(), week_plan_id], task_from_row)
            .db_context("Failed to query tasks")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read tasks")?;

        Ok(tasks)
    }
}

pub(super) fn insert_task(
    tx: &Transaction<'_>,
    user: &UserId,
    week_plan_id: &str,
    order: i64,
    task: &Task,
) -> Result<()> {
    let tags = serde_json::to_string(&task.tags)?;
    tx.execute(
        INSERT_TASK_SQL,
        params![
            user.as_str(),
            task.id.as_str(),
            week_plan_id,
            order,
            &task.title,
            task.subject_id.as_ref().map(SubjectId::as_str),
            task.linked_goal_id.as_deref(),
            task.due_date.to_string(),
            task.estimated_effort,
            task.status.as_str(),
            task.priority.as_str(),
            task.position,
            tags,
            task.created_at.to_string(),
            task.updated_at.to_string(),
        ],
    )
    .db_context("Failed to insert task")?;
    Ok(())
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    let tags: String = row.get(9)?;
    let tags: BTreeSet<String> = serde_json::from_str(&tags).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(9, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Task {
        id: TaskId::new(row.get::<_, String>(0)?),
        title: row.get(1)?,
        subject_id: row.get::<_, Option<String>>(2)?.map(SubjectId::new),
        linked_goal_id: row.get(3)?,
        due_date: parse_text::<Timestamp>(4, &row.get::<_, String>(4)?, "due date")?,
        estimated_effort: row.get(5)?,
        status: parse_text::<TaskStatus>(6, &row.get::<_, String>(6)?, "task status")?,
        priority: parse_text::<Priority>(7, &row.get::<_, String>(7)?, "priority")?,
        position: row.get(8)?,
        tags,
        created_at: parse_text::<Timestamp>(10, &row.get::<_, String>(10)?, "timestamp")?,
        updated_at: parse_text::<Timestamp>(11, &row.get::<_, String>(11)?, "timestamp")?,
    })
}
