//! Serialized form of a [`PlannerStore`] and the file it is kept in.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::PlannerStore;
use crate::{
    error::{FileSystemResultExt, PlannerError, Result},
    models::{SubjectId, ViewMode, WeekPlan},
};

/// Format version written into every snapshot.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Versioned, JSON-serializable copy of the store state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerSnapshot {
    pub version: u32,
    pub current_week_start: Date,
    #[serde(default)]
    pub view_mode: ViewMode,
    #[serde(default)]
    pub selected_subjects: Vec<SubjectId>,
    #[serde(default)]
    pub show_heatmap: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_plan: Option<WeekPlan>,
}

impl PlannerSnapshot {
    /// The same snapshot with the week plan dropped, keeping view settings
    /// only.
    pub fn without_plan(mut self) -> Self {
        self.week_plan = None;
        self
    }
}

impl PlannerStore {
    pub fn snapshot(&self) -> PlannerSnapshot {
        PlannerSnapshot {
            version: SNAPSHOT_VERSION,
            current_week_start: self.current_week_start,
            view_mode: self.view_mode,
            selected_subjects: self.selected_subjects.clone(),
            show_heatmap: self.show_heatmap,
            week_plan: self.week_plan.clone(),
        }
    }

    /// Rebuilds a store from `snapshot`, rejecting snapshots written by a
    /// newer format.
    pub fn from_snapshot(snapshot: PlannerSnapshot) -> Result<Self> {
        if snapshot.version > SNAPSHOT_VERSION {
            return Err(PlannerError::Configuration {
                message: format!(
                    "Snapshot version {} is newer than supported version {SNAPSHOT_VERSION}",
                    snapshot.version
                ),
            });
        }

        let mut store = Self::new(snapshot.current_week_start);
        store.week_plan = snapshot.week_plan;
        store.view_mode = snapshot.view_mode;
        store.selected_subjects = snapshot.selected_subjects;
        store.show_heatmap = snapshot.show_heatmap;
        if let Some(plan) = store.week_plan.as_mut() {
            plan.sync_counters();
        }
        Ok(store)
    }

    /// Copies the view settings of `snapshot` without touching the plan.
    pub fn apply_view(&mut self, snapshot: &PlannerSnapshot) {
        self.view_mode = snapshot.view_mode;
        self.selected_subjects = snapshot.selected_subjects.clone();
        self.show_heatmap = snapshot.show_heatmap;
    }
}

/// JSON file holding a [`PlannerSnapshot`].
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the snapshot, or `None` when the file does not exist yet.
    pub fn load(&self) -> Result<Option<PlannerSnapshot>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).fs_context(&self.path),
        };
        Ok(Some(serde_json::from_str(&contents)?))
    }

    /// Writes the snapshot through a temporary sibling file and renames it
    /// into place.
    pub fn save(&self, snapshot: &PlannerSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).fs_context(parent)?;
        }

        let json = serde_json::to_vec_pretty(snapshot)?;
        let tmp = self.path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp).fs_context(&tmp)?;
        file.write_all(&json).fs_context(&tmp)?;
        file.sync_all().fs_context(&tmp)?;
        drop(file);

        fs::rename(&tmp, &self.path).fs_context(&self.path)?;
        log::debug!("Saved planner snapshot to {}", self.path.display());
        Ok(())
    }
}
