//! MCP tool handlers implementation

use std::sync::Arc;

use log::debug;
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;
use studydesk_core::{
    display::{CreateResult, DeleteResult, OperationStatus},
    params as core, Planner,
};

use super::errors::to_mcp_error;

/// Generic MCP wrapper for core parameter types
///
/// Deserializes transparently into the wrapped core type and forwards its
/// JSON schema, so core params stay free of MCP types.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type QuickAdd = McpParams<core::QuickAdd>;
pub type ShowWeek = McpParams<core::ShowWeek>;
pub type TaskRef = McpParams<core::TaskRef>;
pub type UpdateTask = McpParams<core::UpdateTask>;
pub type UpdateMeta = McpParams<core::UpdateMeta>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(markdown: impl Into<String>) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(markdown.into())]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    planner: Arc<Planner>,
}

impl McpHandlers {
    pub fn new(planner: Arc<Planner>) -> Self {
        Self { planner }
    }

    pub async fn quick_add(&self, Parameters(params): Parameters<QuickAdd>) -> McpResult {
        debug!("quick_add: {params:?}");

        let task = self
            .planner
            .quick_add(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add task", &e))?;

        text(CreateResult::new(task).to_string())
    }

    pub async fn preview_task(&self, Parameters(params): Parameters<QuickAdd>) -> McpResult {
        debug!("preview_task: {params:?}");

        let parsed = self
            .planner
            .preview(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to parse task", &e))?;

        text(format!("# Preview (not saved)\n\n{parsed}"))
    }

    pub async fn show_week(&self, Parameters(params): Parameters<ShowWeek>) -> McpResult {
        debug!("show_week: {params:?}");

        let plan = self
            .planner
            .show_week(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to load week", &e))?;

        match plan {
            Some(plan) => text(plan.to_string()),
            None => {
                let week_start = params
                    .as_ref()
                    .date()
                    .and_then(|date| self.planner.week_start_for(date))
                    .map_err(|e| to_mcp_error("Failed to load week", &e))?;
                text(format!(
                    "# Week of {week_start}\n\nNo tasks planned for this week.\n"
                ))
            }
        }
    }

    pub async fn list_weeks(&self) -> McpResult {
        debug!("list_weeks");

        let weeks = self
            .planner
            .list_weeks()
            .await
            .map_err(|e| to_mcp_error("Failed to list weeks", &e))?;

        text(format!("# Weeks\n\n{weeks}"))
    }

    pub async fn show_task(&self, Parameters(params): Parameters<TaskRef>) -> McpResult {
        debug!("show_task: {params:?}");

        let task = self
            .planner
            .get_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get task", &e))?
            .ok_or_else(|| {
                ErrorData::invalid_params(
                    format!("Task with ID {} not found", params.as_ref().id),
                    None,
                )
            })?;

        text(task.to_string())
    }

    pub async fn update_task(&self, Parameters(params): Parameters<UpdateTask>) -> McpResult {
        debug!("update_task: {params:?}");

        let result = self
            .planner
            .update_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update task", &e))?;

        text(result.to_string())
    }

    pub async fn remove_task(&self, Parameters(params): Parameters<TaskRef>) -> McpResult {
        debug!("remove_task: {params:?}");

        let task = self
            .planner
            .remove_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to remove task", &e))?;

        text(DeleteResult::new(task).to_string())
    }

    pub async fn update_meta(&self, Parameters(params): Parameters<UpdateMeta>) -> McpResult {
        debug!("update_meta: {params:?}");

        let plan = self
            .planner
            .update_meta(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update week", &e))?;

        let status = OperationStatus::success(format!(
            "Week of {}: streak {} days, {} study hours",
            plan.week_start, plan.meta.streak, plan.meta.total_study_hours
        ));
        text(status.to_string())
    }

    pub fn list_subjects(&self) -> McpResult {
        debug!("list_subjects");
        text(format!("# Subjects\n\n{}", self.planner.subjects()))
    }
}
