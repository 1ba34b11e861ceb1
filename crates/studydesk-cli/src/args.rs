use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use jiff::civil::Weekday;

use crate::cli::{MetaArgs, QuickAddArgs, TaskCommands, UpdateViewArgs, WeekArgs};

/// Weekly study planner with natural-language Quick-Add
///
/// Type a task the way you would say it, e.g.
/// `studydesk add "read chapter 5 tomorrow 17:00 #literature 2h !important"`,
/// and StudyDesk files it into the week it is due. The same planner is
/// available to AI assistants through an MCP (Model Context Protocol) server.
#[derive(Parser)]
#[command(version, about, name = "studydesk")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/studydesk/studydesk.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Path to the view settings file. Defaults to planner-state.json next
    /// to the database
    #[arg(long, global = true)]
    pub state_file: Option<PathBuf>,

    /// User whose plans are read and written
    #[arg(long, global = true, env = "STUDYDESK_USER", default_value = "local")]
    pub user: String,

    /// Day weeks begin on
    #[arg(long, global = true, value_enum, default_value_t = WeekStart::Monday)]
    pub week_starts_on: WeekStart,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands. Without a command the current week is shown.
#[derive(Subcommand)]
pub enum Commands {
    /// Add a task from free text
    #[command(alias = "a")]
    Add(QuickAddArgs),
    /// Show how a text would be parsed without saving anything
    #[command(alias = "p")]
    Parse(QuickAddArgs),
    /// Show the tasks of a week
    #[command(alias = "w")]
    Week(WeekArgs),
    /// List all planned weeks
    Weeks,
    /// Manage single tasks
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Set the streak and study hours of a week
    Meta(MetaArgs),
    /// Show or change the view settings
    View(UpdateViewArgs),
    /// List the known subjects and their tags
    Subjects,
    /// Start the MCP server
    Serve,
}

/// First day of the week.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum WeekStart {
    Monday,
    Sunday,
}

impl From<WeekStart> for Weekday {
    fn from(val: WeekStart) -> Self {
        match val {
            WeekStart::Monday => Weekday::Monday,
            WeekStart::Sunday => Weekday::Sunday,
        }
    }
}
