//! Display formatting wrappers and result types.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! the wrappers here add context such as "this task was just created" or
//! format whole collections. Everything renders markdown, which the CLI turns
//! into styled terminal output and MCP clients receive as-is.
//!
//! - [`collections`]: [`Tasks`], [`Subjects`], [`WeekSummaries`]
//! - [`results`]: [`CreateResult`], [`UpdateResult`], [`DeleteResult`]
//! - [`status`]: [`OperationStatus`]
//! - [`datetime`]: [`LocalDateTime`], [`Effort`]
//!
//! ```rust
//! use studydesk_core::display::{Effort, OperationStatus};
//!
//! assert_eq!(Effort(150).to_string(), "2h 30m");
//! assert_eq!(
//!     OperationStatus::success("View updated").to_string(),
//!     "Success: View updated\n"
//! );
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Subjects, Tasks, WeekSummaries};
pub use datetime::{Effort, LocalDateTime};
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
