//! Builder for creating and configuring Planner instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use jiff::civil::Weekday;
use tokio::task;

use super::Planner;
use crate::{
    catalog::SubjectCatalog,
    clock::{Clock, SystemClock},
    db::Database,
    error::{FileSystemResultExt, PlannerError, Result},
    factory::TaskFactory,
    models::UserId,
    parser::QuickAddParser,
    store::{SnapshotFile, StoreRegistry},
};

const APP_NAME: &str = "studydesk";
const DATABASE_FILE: &str = "studydesk.db";
const STATE_FILE: &str = "planner-state.json";
const DEFAULT_USER: &str = "local";

/// Builder for creating and configuring Planner instances.
pub struct PlannerBuilder {
    database_path: Option<PathBuf>,
    state_path: Option<PathBuf>,
    user: UserId,
    clock: Arc<dyn Clock>,
    first_weekday: Weekday,
    catalog: Arc<SubjectCatalog>,
    registry: Option<Arc<StoreRegistry>>,
}

impl PlannerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            state_path: None,
            user: UserId::new(DEFAULT_USER),
            clock: Arc::new(SystemClock::new()),
            first_weekday: Weekday::Monday,
            catalog: Arc::new(SubjectCatalog::builtin()),
            registry: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/studydesk/studydesk.db` or
    /// `~/.local/share/studydesk/studydesk.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.database_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the file view settings are saved to. Defaults to
    /// `planner-state.json` next to the database.
    pub fn with_state_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.state_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_user(mut self, user: UserId) -> Self {
        self.user = user;
        self
    }

    /// Replaces the system clock, e.g. with a
    /// [`FixedClock`](crate::clock::FixedClock) in tests.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The day weeks begin on. Defaults to Monday.
    pub fn with_first_weekday(mut self, weekday: Weekday) -> Self {
        self.first_weekday = weekday;
        self
    }

    pub fn with_catalog(mut self, catalog: SubjectCatalog) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }

    /// Shares sessions with other planners, so concurrent hosts serialize
    /// writes to the same week.
    pub fn with_registry(mut self, registry: Arc<StoreRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Builds the configured planner instance.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::XdgDirectory` if no default data directory can
    /// be determined, `PlannerError::FileSystem` if the database directory
    /// cannot be created, and `PlannerError::Database` if database
    /// initialization fails.
    pub async fn build(self) -> Result<Planner> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).fs_context(parent)?;
        }

        let state_path = self
            .state_path
            .unwrap_or_else(|| db_path.with_file_name(STATE_FILE));

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), PlannerError>(())
        })
        .await
        .map_err(PlannerError::join)??;

        log::debug!(
            "Planner for '{}' using {} (state in {})",
            self.user,
            db_path.display(),
            state_path.display()
        );

        Ok(Planner {
            db_path,
            state: SnapshotFile::new(state_path),
            user: self.user,
            factory: TaskFactory::new(Arc::clone(&self.clock)),
            clock: self.clock,
            first_weekday: self.first_weekday,
            parser: QuickAddParser::new(self.catalog),
            registry: self.registry.unwrap_or_default(),
        })
    }

    /// Returns the default database path following the XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix(APP_NAME)
            .place_data_file(DATABASE_FILE)
            .map_err(|e| PlannerError::XdgDirectory(e.to_string()))
    }
}

impl Default for PlannerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
