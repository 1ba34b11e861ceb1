//! MCP server implementation for StudyDesk
//!
//! Exposes the planner to AI assistants over the Model Context Protocol on
//! stdio. Every tool returns the same markdown the CLI prints.

use std::sync::Arc;

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use studydesk_core::Planner;
use tokio::signal::unix::{signal, SignalKind};

pub mod errors;
pub mod handlers;

pub use handlers::{McpResult, QuickAdd, ShowWeek, TaskRef, UpdateMeta, UpdateTask};

/// MCP server for StudyDesk
#[derive(Clone)]
pub struct StudyDeskMcpServer {
    planner: Arc<Planner>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl StudyDeskMcpServer {
    pub fn new(planner: Planner) -> Self {
        Self {
            planner: Arc::new(planner),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(Arc::clone(&self.planner))
    }

    #[tool(
        name = "quick_add",
        description = "Add a study task from one line of natural text. Recognized inside the text: a subject tag like #math, an objective code like 10.3.2.1, a due time like 'today 17:00', 'tomorrow at 9:30' or 'friday 18:00', effort like '2h', '1.5 hours' or '45min', and priority markers !important/!high or !low. Whatever remains becomes the title. The task is filed into the week it is due in."
    )]
    async fn quick_add(&self, params: Parameters<QuickAdd>) -> McpResult {
        self.handlers().quick_add(params).await
    }

    #[tool(
        name = "preview_task",
        description = "Parse a Quick-Add text exactly like quick_add but save nothing. Use it to check how a sentence will be understood before adding it."
    )]
    async fn preview_task(&self, params: Parameters<QuickAdd>) -> McpResult {
        self.handlers().preview_task(params).await
    }

    #[tool(
        name = "show_week",
        description = "Show a week's tasks ordered by due date, with completed/total counts, planned effort, streak and study hours. Pass any date inside the week as 'week' (YYYY-MM-DD) or omit it for the current week. Only subjects selected in the view settings are listed."
    )]
    async fn show_week(&self, params: Parameters<ShowWeek>) -> McpResult {
        self.handlers().show_week(params).await
    }

    #[tool(
        name = "list_weeks",
        description = "List every week that has a plan, newest first, with completed/total task counts."
    )]
    async fn list_weeks(&self) -> McpResult {
        self.handlers().list_weeks().await
    }

    #[tool(
        name = "show_task",
        description = "Show all details of one task by its ID: subject, objective, due time, effort, priority and status."
    )]
    async fn show_task(&self, params: Parameters<TaskRef>) -> McpResult {
        self.handlers().show_task(params).await
    }

    #[tool(
        name = "update_task",
        description = "Change fields of a task by ID. Only the given fields change: title, status (pending/in_progress/completed), priority (low/medium/high), effort_minutes, due (RFC 3339 or local 'YYYY-MM-DDTHH:MM'), subject, objective. An empty subject or objective clears it. The task stays in its week."
    )]
    async fn update_task(&self, params: Parameters<UpdateTask>) -> McpResult {
        self.handlers().update_task(params).await
    }

    #[tool(
        name = "remove_task",
        description = "Remove a task from its week by ID. This cannot be undone."
    )]
    async fn remove_task(&self, params: Parameters<TaskRef>) -> McpResult {
        self.handlers().remove_task(params).await
    }

    #[tool(
        name = "update_meta",
        description = "Set the study streak (days) and total study hours of a week. Pass any date inside the week as 'week' or omit it for the current week. Creates an empty plan for the week if needed."
    )]
    async fn update_meta(&self, params: Parameters<UpdateMeta>) -> McpResult {
        self.handlers().update_meta(params).await
    }

    #[tool(
        name = "list_subjects",
        description = "List the subjects tasks can be tagged with, with their #tag, color and icon."
    )]
    async fn list_subjects(&self) -> McpResult {
        self.handlers().list_subjects()
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for StudyDeskMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "studydesk".to_string(),
                title: None,
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(r#"StudyDesk is a weekly study planner. Tasks are added from one line of natural text and filed into the week they are due in.

## Core Concepts
- **Week plan**: the tasks of one week plus counters (completed/total, streak, study hours)
- **Task**: title, optional subject and objective code, due time, effort in minutes, priority and status (pending/in_progress/completed)

## Workflow
1. Add tasks with `quick_add`, e.g. "solve exercises #math 10.3.2.1 friday 17:00 45min !important". Use `preview_task` first when unsure how a text is read.
2. Review the week with `show_week`, past weeks with `list_weeks`.
3. Track progress with `update_task` (status=in_progress, then completed) and record streaks with `update_meta`.

## Tool Categories
- **Tasks**: quick_add, preview_task, show_task, update_task, remove_task
- **Weeks**: show_week, list_weeks, update_meta
- **Reference**: list_subjects"#.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: StudyDeskMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting StudyDesk MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
