//! High-level planner API used by the CLI and the MCP server.
//!
//! A [`Planner`] ties the Quick-Add parser, the task factory, the in-memory
//! [`PlannerStore`](crate::store::PlannerStore) and the SQLite database
//! together for one user:
//!
//! ```text
//! text ─▶ QuickAddParser ─▶ TaskFactory ─▶ PlannerStore ─▶ Database
//!          (parse)           (id, stamps)   (in memory)     (persist)
//! ```
//!
//! Each week is served by one session from the [`StoreRegistry`]. A session
//! is loaded from the database on first use and afterwards mutated in memory
//! before the change is written back, so all operations on the same week are
//! applied one after another.
//!
//! ## Submodules
//!
//! - [`builder`]: configuration and construction
//! - [`quick_add`]: parsing text into tasks
//! - [`task_ops`]: reading and changing single tasks
//! - [`week_ops`]: weeks, counters and view settings
//!
//! # Examples
//!
//! ```rust
//! use studydesk_core::{params::QuickAdd, PlannerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = tempfile::tempdir()?;
//! let planner = PlannerBuilder::new()
//!     .with_database_path(dir.path().join("studydesk.db"))
//!     .build()
//!     .await?;
//!
//! let task = planner
//!     .quick_add(&QuickAdd {
//!         text: "read chapter 5 2h !important".to_string(),
//!     })
//!     .await?;
//! assert_eq!(task.title, "read chapter 5");
//! # Ok(())
//! # }
//! ```

use std::{path::PathBuf, sync::Arc};

use jiff::{
    civil::{Date, Weekday},
    Timestamp,
};
use tokio::{sync::OwnedMutexGuard, task};

use crate::{
    catalog::SubjectCatalog,
    clock::Clock,
    db::Database,
    error::{PlannerError, Result},
    factory::TaskFactory,
    models::{week_start_of, UserId, ViewSettings},
    parser::QuickAddParser,
    store::{Session, SessionKey, SnapshotFile, StoreRegistry},
};

pub mod builder;
pub mod quick_add;
pub mod task_ops;
pub mod week_ops;


pub use builder::PlannerBuilder;

/// Main planner interface for one user's weekly tasks.
pub struct Planner {
    pub(crate) db_path: PathBuf,
    pub(crate) state: SnapshotFile,
    pub(crate) user: UserId,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) first_weekday: Weekday,
    pub(crate) parser: QuickAddParser,
    pub(crate) factory: TaskFactory,
    pub(crate) registry: Arc<StoreRegistry>,
}

impl Planner {
    pub fn user(&self) -> &UserId {
        &self.user
    }

    pub fn database_path(&self) -> &std::path::Path {
        &self.db_path
    }

    pub fn catalog(&self) -> &SubjectCatalog {
        self.parser.catalog()
    }

    /// Start of the week containing today.
    pub fn current_week_start(&self) -> Result<Date> {
        week_start_of(self.clock.now().date(), self.first_weekday)
    }

    /// Start of the week containing `date`, or the current week.
    pub fn week_start_for(&self, date: Option<Date>) -> Result<Date> {
        match date {
            Some(date) => week_start_of(date, self.first_weekday),
            None => self.current_week_start(),
        }
    }

    /// Start of the week containing the local date of `instant`.
    pub(crate) fn week_start_at(&self, instant: Timestamp) -> Result<Date> {
        let local = instant.to_zoned(self.clock.now().time_zone().clone());
        week_start_of(local.date(), self.first_weekday)
    }

    pub(crate) fn session_key(&self, week_start: Date) -> SessionKey {
        SessionKey::new(self.user.clone(), week_start)
    }

    /// Locks the session of `week_start`, loading its plan and the view
    /// settings on first use. View settings are reloaded when they changed
    /// since the session last saw them.
    pub(crate) async fn session(&self, week_start: Date) -> Result<OwnedMutexGuard<Session>> {
        let key = self.session_key(week_start);
        let mut session = self.registry.session(&key).lock_owned().await;
        let generation = self.registry.view_generation();

        if !session.hydrated {
            let user = self.user.clone();
            let plan = self
                .with_db(move |db| db.get_week_plan(&user, week_start))
                .await?;

            let view = self.load_view().await?;

            session.store.set_current_week_start(week_start);
            session.store.set_week_plan(plan);
            apply_view(&mut session, view, generation);
            session.hydrated = true;
            log::debug!("Hydrated session {key}");
        } else if session.view_generation != generation {
            let view = self.load_view().await?;
            apply_view(&mut session, view, generation);
            log::debug!("Reloaded view settings of session {key}");
        }

        Ok(session)
    }

    /// Runs `f` against a fresh database connection on the blocking pool.
    pub(crate) async fn with_db<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            f(&mut db)
        })
        .await
        .map_err(PlannerError::join)?
    }

    /// View settings from the state file, defaults when none were saved.
    pub(crate) async fn load_view(&self) -> Result<ViewSettings> {
        let state = self.state.clone();
        let snapshot = task::spawn_blocking(move || state.load())
            .await
            .map_err(PlannerError::join)??;

        Ok(snapshot
            .map(|s| ViewSettings {
                mode: s.view_mode,
                selected_subjects: s.selected_subjects,
                show_heatmap: s.show_heatmap,
            })
            .unwrap_or_default())
    }
}

fn apply_view(session: &mut Session, view: ViewSettings, generation: u64) {
    session.store.set_view_mode(view.mode);
    session.store.set_selected_subjects(view.selected_subjects);
    session.store.set_show_heatmap(view.show_heatmap);
    session.view_generation = generation;
}

impl std::fmt::Debug for Planner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Planner")
            .field("db_path", &self.db_path)
            .field("state", &self.state)
            .field("user", &self.user)
            .field("first_weekday", &self.first_weekday)
            .finish_non_exhaustive()
    }
}
