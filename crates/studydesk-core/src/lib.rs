//! Core library for the StudyDesk weekly study planner.
//!
//! This crate turns free-form Quick-Add text such as
//! `"read chapter 5 tomorrow 14:00 #math 10.3.2.1 90min !important"` into
//! structured tasks and keeps them in per-week plans:
//!
//! - [`parser`]: the Quick-Add parser, a pipeline of extractors that pull the
//!   subject tag, objective code, schedule, effort and priority out of the text
//! - [`factory`]: turns parsed results into tasks with ids, timestamps and a
//!   position
//! - [`store`]: the in-memory week plan with its counters and view settings
//! - [`db`]: SQLite persistence of week plans and tasks
//! - [`planner`]: the high-level API the CLI and MCP server use
//!
//! # Display Architecture
//!
//! - **Domain Models** ([`models`]): Implement [`std::fmt::Display`] for direct
//!   formatting
//! - **Display Wrappers** ([`display`]): Provide contextual and specialized
//!   formatting
//! - **Terminal Rendering**: Rich markdown output via the CLI's terminal
//!   renderer
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use jiff::civil::date;
//! use studydesk_core::{QuickAddParser, SubjectCatalog, TaskFactory};
//!
//! let now = date(2026, 10, 19).at(9, 30, 0, 0).in_tz("UTC").unwrap();
//! let parser = QuickAddParser::new(Arc::new(SubjectCatalog::builtin()));
//!
//! let parsed = parser
//!     .parse("Homework #math 10.3.2.1 tomorrow 14:00 45min !important", &now)
//!     .expect("text yields a task");
//! assert_eq!(parsed.title, "Homework");
//! assert_eq!(parsed.linked_goal_id.as_deref(), Some("10.3.2.1"));
//! assert_eq!(parsed.estimated_effort, 45);
//!
//! let task = TaskFactory::default().create_task(parsed);
//! println!("{task}");
//! ```

pub mod catalog;
pub mod clock;
pub mod db;
pub mod display;
pub mod error;
pub mod factory;
pub mod models;
pub mod params;
pub mod parser;
pub mod planner;
pub mod store;

// Re-export commonly used types
pub use catalog::SubjectCatalog;
pub use clock::{Clock, FixedClock, SystemClock};
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, Effort, LocalDateTime, OperationStatus, Subjects, Tasks,
    UpdateResult, WeekSummaries,
};
pub use error::{PlannerError, Result};
pub use factory::{IdGenerator, TaskFactory, TimestampIdGenerator};
pub use models::{
    MetaUpdate, ParsedTask, Priority, Subject, SubjectId, Task, TaskId, TaskStatus, TaskUpdate,
    UserId, ViewMode, ViewSettings, WeekMeta, WeekPlan,
};
pub use params::{QuickAdd, ShowWeek, TaskRef, UpdateMeta, UpdateTask, UpdateView};
pub use parser::{ParseError, QuickAddParser};
pub use planner::{Planner, PlannerBuilder};
pub use store::{PlannerSnapshot, PlannerStore, StoreRegistry};
