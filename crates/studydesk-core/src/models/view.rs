//! User and view-state types shared by the store and its snapshot.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Identity of the signed-in user, as handed over by the auth service.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How the planner presents the week in view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Week,
    Day,
    List,
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "week" => Ok(ViewMode::Week),
            "day" => Ok(ViewMode::Day),
            "list" => Ok(ViewMode::List),
            _ => Err(format!("Invalid view mode: {s}")),
        }
    }
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Week => "week",
            ViewMode::Day => "day",
            ViewMode::List => "list",
        }
    }
}

/// View settings of a user, persisted in the planner snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSettings {
    pub mode: ViewMode,
    #[serde(default)]
    pub selected_subjects: Vec<super::SubjectId>,
    #[serde(default)]
    pub show_heatmap: bool,
}

/// Partial update of [`ViewSettings`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewUpdate {
    pub mode: Option<ViewMode>,
    pub selected_subjects: Option<Vec<super::SubjectId>>,
    pub show_heatmap: Option<bool>,
}
