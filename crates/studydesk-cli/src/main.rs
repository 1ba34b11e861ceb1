//! StudyDesk CLI Application
//!
//! Command-line interface and MCP server for the StudyDesk weekly planner.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::{Cli, WeekArgs};
use log::info;
use mcp::{run_stdio_server, StudyDeskMcpServer};
use renderer::TerminalRenderer;
use studydesk_core::{models::UserId, PlannerBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        state_file,
        user,
        week_starts_on,
        no_color,
        command,
    } = Args::parse();

    let mut builder = PlannerBuilder::new()
        .with_user(UserId::new(user))
        .with_first_weekday(week_starts_on.into());
    if let Some(path) = database_file {
        builder = builder.with_database_path(path);
    }
    if let Some(path) = state_file {
        builder = builder.with_state_path(path);
    }
    let planner = builder
        .build()
        .await
        .context("Failed to initialize planner")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("StudyDesk started for user '{}'", planner.user());

    match command.unwrap_or(Week(WeekArgs { week: None })) {
        Serve => {
            info!("Starting StudyDesk MCP server");
            run_stdio_server(StudyDeskMcpServer::new(planner))
                .await
                .context("MCP server failed")
        }
        Add(args) => Cli::new(planner, renderer).quick_add(args).await,
        Parse(args) => Cli::new(planner, renderer).preview(args).await,
        Week(args) => Cli::new(planner, renderer).show_week(args).await,
        Weeks => Cli::new(planner, renderer).list_weeks().await,
        Task { command } => {
            Cli::new(planner, renderer)
                .handle_task_command(command)
                .await
        }
        Meta(args) => Cli::new(planner, renderer).update_meta(args).await,
        View(args) => Cli::new(planner, renderer).view(args).await,
        Subjects => Cli::new(planner, renderer).list_subjects(),
    }
}
