//! Command argument wrappers and their handlers.
//!
//! Each clap argument struct converts into the matching core parameter type,
//! so clap attributes never leak into `studydesk-core`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner
//! ```

use anyhow::{bail, Result};
use clap::{Args, Subcommand, ValueEnum};
use studydesk_core::{
    display::{CreateResult, DeleteResult, OperationStatus},
    models::{TaskStatus, WeekPlan},
    params::{QuickAdd, ShowWeek, TaskRef, UpdateMeta, UpdateTask, UpdateView},
    Planner,
};

use crate::renderer::TerminalRenderer;

/// Free text describing a task
#[derive(Args)]
pub struct QuickAddArgs {
    /// Task text, e.g. "solve exercises #math 10.3.2.1 friday 17:00 45min"
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub text: Vec<String>,
}

impl From<QuickAddArgs> for QuickAdd {
    /// Words given as separate arguments are joined with single spaces.
    fn from(val: QuickAddArgs) -> Self {
        QuickAdd {
            text: val.text.join(" "),
        }
    }
}

/// Select a week by any date inside it
#[derive(Args)]
pub struct WeekArgs {
    /// Any date in the week (YYYY-MM-DD); defaults to the current week
    #[arg(short, long)]
    pub week: Option<String>,
}

impl From<WeekArgs> for ShowWeek {
    fn from(val: WeekArgs) -> Self {
        ShowWeek { week: val.week }
    }
}

/// Identify a task
#[derive(Args)]
pub struct TaskIdArgs {
    #[arg(help = "ID of the task, as shown by 'studydesk week'")]
    pub id: String,
}

impl From<TaskIdArgs> for TaskRef {
    fn from(val: TaskIdArgs) -> Self {
        TaskRef { id: val.id }
    }
}

/// Change the details of a task
///
/// Only the given fields change. Pass an empty string to --subject or
/// --objective to clear them.
#[derive(Args)]
pub struct UpdateTaskArgs {
    #[arg(help = "ID of the task to update")]
    pub id: String,
    #[arg(short, long, help = "New title")]
    pub title: Option<String>,
    #[arg(short, long, help = "New status")]
    pub status: Option<TaskStatusArg>,
    #[arg(short, long, help = "New priority")]
    pub priority: Option<PriorityArg>,
    #[arg(short, long, help = "Estimated effort in minutes")]
    pub effort: Option<u32>,
    #[arg(
        short,
        long,
        help = "Due date and time, e.g. 2026-10-23T17:00 (local) or an RFC 3339 timestamp"
    )]
    pub due: Option<String>,
    #[arg(long, help = "Subject id or tag, e.g. math")]
    pub subject: Option<String>,
    #[arg(long, help = "Objective code, e.g. 10.3.2.1")]
    pub objective: Option<String>,
}

impl From<UpdateTaskArgs> for UpdateTask {
    fn from(val: UpdateTaskArgs) -> Self {
        UpdateTask {
            id: val.id,
            title: val.title,
            status: val.status.map(|s| s.to_string()),
            priority: val.priority.map(|p| p.to_string()),
            effort_minutes: val.effort,
            due: val.due,
            subject: val.subject,
            objective: val.objective,
        }
    }
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Show details of a task
    #[command(alias = "s")]
    Show(TaskIdArgs),
    /// Change the details of a task
    #[command(alias = "u")]
    Update(UpdateTaskArgs),
    /// Mark a task as in progress
    Start(TaskIdArgs),
    /// Mark a task as completed
    Done(TaskIdArgs),
    /// Mark a task as pending again
    Reopen(TaskIdArgs),
    /// Remove a task from its week
    #[command(aliases = ["rm", "d"])]
    Remove(TaskIdArgs),
}

/// Set the caller-maintained counters of a week
#[derive(Args)]
pub struct MetaArgs {
    /// Any date in the week (YYYY-MM-DD); defaults to the current week
    #[arg(short, long)]
    pub week: Option<String>,
    /// Days in a row with study time
    #[arg(short, long)]
    pub streak: Option<u32>,
    /// Total hours studied this week
    #[arg(long)]
    pub hours: Option<f64>,
}

impl From<MetaArgs> for UpdateMeta {
    fn from(val: MetaArgs) -> Self {
        UpdateMeta {
            week: val.week,
            streak: val.streak,
            total_study_hours: val.hours,
        }
    }
}

/// Show or change the view settings
///
/// Without options the current settings are printed.
#[derive(Args)]
pub struct UpdateViewArgs {
    #[arg(short, long, help = "How the week is presented")]
    pub mode: Option<ViewModeArg>,
    #[arg(
        short,
        long,
        value_delimiter = ',',
        num_args = 0..,
        help = "Subjects to show as comma-separated list; empty shows all"
    )]
    pub subjects: Option<Vec<String>>,
    #[arg(long, help = "Show the study heatmap")]
    pub heatmap: Option<bool>,
}

impl UpdateViewArgs {
    pub fn is_empty(&self) -> bool {
        self.mode.is_none() && self.subjects.is_none() && self.heatmap.is_none()
    }
}

impl From<UpdateViewArgs> for UpdateView {
    fn from(val: UpdateViewArgs) -> Self {
        UpdateView {
            mode: val.mode.map(|m| m.to_string()),
            subjects: val.subjects,
            show_heatmap: val.heatmap,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum TaskStatusArg {
    Pending,
    InProgress,
    Completed,
}

impl std::fmt::Display for TaskStatusArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatusArg::Pending => write!(f, "pending"),
            TaskStatusArg::InProgress => write!(f, "in_progress"),
            TaskStatusArg::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for PriorityArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriorityArg::Low => write!(f, "low"),
            PriorityArg::Medium => write!(f, "medium"),
            PriorityArg::High => write!(f, "high"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ViewModeArg {
    Week,
    Day,
    List,
}

impl std::fmt::Display for ViewModeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewModeArg::Week => write!(f, "week"),
            ViewModeArg::Day => write!(f, "day"),
            ViewModeArg::List => write!(f, "list"),
        }
    }
}

/// Runs commands against a planner and renders the results.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    pub async fn quick_add(&self, args: QuickAddArgs) -> Result<()> {
        let task = self.planner.quick_add(&args.into()).await?;
        self.renderer.render(&CreateResult::new(task).to_string())
    }

    pub async fn preview(&self, args: QuickAddArgs) -> Result<()> {
        let parsed = self.planner.preview(&args.into()).await?;
        self.renderer.render(&parsed.to_string())
    }

    pub async fn show_week(&self, args: WeekArgs) -> Result<()> {
        let params: ShowWeek = args.into();
        let plan = match self.planner.show_week(&params).await? {
            Some(plan) => plan,
            None => {
                let week_start = self.planner.week_start_for(params.date()?)?;
                WeekPlan::new(week_start, jiff::Timestamp::now())
            }
        };
        self.renderer.render(&plan.to_string())
    }

    pub async fn list_weeks(&self) -> Result<()> {
        let weeks = self.planner.list_weeks().await?;
        self.renderer.render(&format!("# Weeks\n\n{weeks}"))
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Show(args) => {
                let params: TaskRef = args.into();
                match self.planner.get_task(&params).await? {
                    Some(task) => self.renderer.render(&task.to_string()),
                    None => bail!("Task with ID {} not found", params.id),
                }
            }
            TaskCommands::Update(args) => {
                let result = self.planner.update_task(&args.into()).await?;
                self.renderer.render(&result.to_string())
            }
            TaskCommands::Start(args) => self.set_status(args, TaskStatus::InProgress).await,
            TaskCommands::Done(args) => self.set_status(args, TaskStatus::Completed).await,
            TaskCommands::Reopen(args) => self.set_status(args, TaskStatus::Pending).await,
            TaskCommands::Remove(args) => {
                let task = self.planner.remove_task(&args.into()).await?;
                self.renderer.render(&DeleteResult::new(task).to_string())
            }
        }
    }

    async fn set_status(&self, args: TaskIdArgs, status: TaskStatus) -> Result<()> {
        let task = self.planner.set_task_status(&args.into(), status).await?;
        let message = OperationStatus::success(format!(
            "Task '{}' is now {}",
            task.title,
            status.with_icon()
        ));
        self.renderer.render(&message.to_string())
    }

    pub async fn update_meta(&self, args: MetaArgs) -> Result<()> {
        let plan = self.planner.update_meta(&args.into()).await?;
        let message = OperationStatus::success(format!(
            "Week of {}: streak {} days, {} study hours",
            plan.week_start, plan.meta.streak, plan.meta.total_study_hours
        ));
        self.renderer.render(&message.to_string())
    }

    pub async fn view(&self, args: UpdateViewArgs) -> Result<()> {
        let settings = if args.is_empty() {
            self.planner.view_settings().await?
        } else {
            self.planner.update_view(&args.into()).await?
        };
        self.renderer.render(&settings.to_string())
    }

    pub fn list_subjects(&self) -> Result<()> {
        let subjects = self.planner.subjects();
        self.renderer.render(&format!("# Subjects\n\n{subjects}"))
    }
}
