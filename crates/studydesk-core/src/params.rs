//! Parameter structures for StudyDesk operations.
//!
//! These are shared by every interface (CLI, MCP) and carry no framework
//! derives beyond serde; JSON schemas are generated behind the `schema`
//! feature. Interface layers wrap or convert into them:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Values arrive as plain strings and numbers; the `validate` methods turn
//! them into typed model updates and report bad input as
//! [`PlannerError::InvalidInput`].

use std::str::FromStr;

use jiff::{
    civil::{Date, DateTime},
    tz::TimeZone,
    Timestamp,
};
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    catalog::SubjectCatalog,
    error::{PlannerError, Result},
    models::{MetaUpdate, Priority, SubjectId, TaskId, TaskStatus, TaskUpdate, ViewMode, ViewUpdate},
};

/// Free text to turn into a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct QuickAdd {
    /// Quick-Add text, e.g. "10.3.2.1 solve exercises #math tomorrow 17:00 45min !high"
    pub text: String,
}

/// Parameters for operations requiring just a task id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct TaskRef {
    /// The ID of the task to operate on
    pub id: String,
}

impl TaskRef {
    pub fn task_id(&self) -> Result<TaskId> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err(PlannerError::invalid_input("id").with_reason("Task ID must not be empty"));
        }
        Ok(TaskId::new(id))
    }
}

/// Selects a week by any date inside it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ShowWeek {
    /// Any date (YYYY-MM-DD) within the week; the current week when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week: Option<String>,
}

impl ShowWeek {
    pub fn date(&self) -> Result<Option<Date>> {
        self.week.as_deref().map(parse_date).transpose()
    }
}

/// Partial update of a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateTask {
    /// Task ID to update (required)
    pub id: String,
    /// New title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New status ('pending', 'in_progress' or 'completed')
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// New priority ('low', 'medium' or 'high')
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// New estimated effort in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort_minutes: Option<u32>,
    /// New due date: an RFC 3339 timestamp or a local 'YYYY-MM-DD HH:MM'
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    /// Subject id or name; an empty string clears the subject
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Objective code such as '10.3.2.1'; an empty string clears it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
}

impl UpdateTask {
    /// Validates the raw fields into a [`TaskUpdate`].
    ///
    /// Local due times are interpreted in `tz`; subjects must exist in
    /// `catalog`.
    ///
    /// ```rust
    /// use jiff::tz::TimeZone;
    /// use studydesk_core::{catalog::SubjectCatalog, models::TaskStatus, params::UpdateTask};
    ///
    /// let params = UpdateTask {
    ///     id: "t-1".to_string(),
    ///     status: Some("done".to_string()),
    ///     ..Default::default()
    /// };
    /// let update = params.validate(&TimeZone::UTC, &SubjectCatalog::builtin())?;
    /// assert_eq!(update.status, Some(TaskStatus::Completed));
    ///
    /// let bad = UpdateTask {
    ///     id: "t-1".to_string(),
    ///     priority: Some("urgent".to_string()),
    ///     ..Default::default()
    /// };
    /// assert!(bad.validate(&TimeZone::UTC, &SubjectCatalog::builtin()).is_err());
    /// # Ok::<(), studydesk_core::PlannerError>(())
    /// ```
    pub fn validate(&self, tz: &TimeZone, catalog: &SubjectCatalog) -> Result<TaskUpdate> {
        let title = match &self.title {
            Some(title) if title.trim().is_empty() => {
                return Err(
                    PlannerError::invalid_input("title").with_reason("Title must not be empty")
                );
            }
            Some(title) => Some(title.trim().to_string()),
            None => None,
        };

        let status = self
            .status
            .as_deref()
            .map(|s| {
                TaskStatus::from_str(s).map_err(|_| {
                    PlannerError::invalid_input("status").with_reason(format!(
                        "Invalid status: {s}. Must be 'pending', 'in_progress' or 'completed'"
                    ))
                })
            })
            .transpose()?;

        let priority = self
            .priority
            .as_deref()
            .map(|p| {
                Priority::from_str(p).map_err(|_| {
                    PlannerError::invalid_input("priority").with_reason(format!(
                        "Invalid priority: {p}. Must be 'low', 'medium' or 'high'"
                    ))
                })
            })
            .transpose()?;

        let subject_id = self
            .subject
            .as_deref()
            .map(|s| resolve_subject(s, catalog))
            .transpose()?;

        let linked_goal_id = self
            .objective
            .as_deref()
            .map(validate_objective)
            .transpose()?;

        let due_date = self
            .due
            .as_deref()
            .map(|due| parse_due(due, tz))
            .transpose()?;

        Ok(TaskUpdate {
            title,
            subject_id,
            linked_goal_id,
            due_date,
            estimated_effort: self.effort_minutes,
            status,
            priority,
            ..Default::default()
        })
    }
}

/// Caller-maintained counters of a week.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateMeta {
    /// Any date (YYYY-MM-DD) within the week; the current week when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week: Option<String>,
    /// Consecutive study days
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streak: Option<u32>,
    /// Hours studied this week
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_study_hours: Option<f64>,
}

impl UpdateMeta {
    pub fn validate(&self) -> Result<(Option<Date>, MetaUpdate)> {
        if self.streak.is_none() && self.total_study_hours.is_none() {
            return Err(PlannerError::invalid_input("meta")
                .with_reason("Provide a streak or total study hours to update"));
        }
        if let Some(hours) = self.total_study_hours {
            if !hours.is_finite() || hours < 0.0 {
                return Err(PlannerError::invalid_input("total_study_hours")
                    .with_reason(format!("Study hours must be a non-negative number, got {hours}")));
            }
        }

        let week = self.week.as_deref().map(parse_date).transpose()?;
        Ok((
            week,
            MetaUpdate {
                streak: self.streak,
                total_study_hours: self.total_study_hours,
            },
        ))
    }
}

/// Changes to how weeks are presented.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateView {
    /// 'week', 'day' or 'list'
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Subjects to show; an empty list shows all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subjects: Option<Vec<String>>,
    /// Whether to show the study heatmap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_heatmap: Option<bool>,
}

impl UpdateView {
    pub fn validate(&self, catalog: &SubjectCatalog) -> Result<ViewUpdate> {
        let mode = self
            .mode
            .as_deref()
            .map(|m| {
                ViewMode::from_str(m).map_err(|_| {
                    PlannerError::invalid_input("mode")
                        .with_reason(format!("Invalid view mode: {m}. Must be 'week', 'day' or 'list'"))
                })
            })
            .transpose()?;

        let selected_subjects = match &self.subjects {
            Some(subjects) => Some(
                subjects
                    .iter()
                    .map(|s| {
                        resolve_subject(s, catalog)?.ok_or_else(|| {
                            PlannerError::invalid_input("subjects")
                                .with_reason("Subject names must not be empty")
                        })
                    })
                    .collect::<Result<Vec<_>>>()?,
            ),
            None => None,
        };

        Ok(ViewUpdate {
            mode,
            selected_subjects,
            show_heatmap: self.show_heatmap,
        })
    }
}

fn parse_date(text: &str) -> Result<Date> {
    text.trim().parse::<Date>().map_err(|e| {
        PlannerError::invalid_input("week")
            .with_reason(format!("Expected a date like 2026-10-19, got '{text}': {e}"))
    })
}

/// `Some(None)` for an empty string, otherwise the resolved subject id.
fn resolve_subject(text: &str, catalog: &SubjectCatalog) -> Result<Option<SubjectId>> {
    let name = text.trim().trim_start_matches('#');
    if name.is_empty() {
        return Ok(None);
    }
    catalog
        .resolve(name)
        .map(|subject| Some(subject.id.clone()))
        .ok_or_else(|| {
            PlannerError::invalid_input("subject").with_reason(format!("Unknown subject: {text}"))
        })
}

fn validate_objective(code: &str) -> Result<Option<String>> {
    let code = code.trim();
    if code.is_empty() {
        return Ok(None);
    }
    let well_formed = code.split('.').count() >= 2
        && code
            .split('.')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()));
    if !well_formed {
        return Err(PlannerError::invalid_input("objective")
            .with_reason(format!("Expected a dotted code like 10.3.2.1, got '{code}'")));
    }
    Ok(Some(code.to_string()))
}

fn parse_due(text: &str, tz: &TimeZone) -> Result<Timestamp> {
    let text = text.trim();
    if let Ok(ts) = text.parse::<Timestamp>() {
        return Ok(ts);
    }
    let local = text.parse::<DateTime>().map_err(|e| {
        PlannerError::invalid_input("due").with_reason(format!(
            "Expected an RFC 3339 timestamp or 'YYYY-MM-DD HH:MM', got '{text}': {e}"
        ))
    })?;
    Ok(local.to_zoned(tz.clone())?.timestamp())
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn catalog() -> SubjectCatalog {
        SubjectCatalog::builtin()
    }

    fn invalid_field(result: Result<impl std::fmt::Debug>) -> String {
        match result {
            Err(PlannerError::InvalidInput { field, .. }) => field,
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_task_ref_rejects_blank_id() {
        assert_eq!(
            TaskRef { id: " t-1 ".into() }.task_id().unwrap(),
            TaskId::new("t-1")
        );
        assert_eq!(invalid_field(TaskRef { id: "  ".into() }.task_id()), "id");
    }

    #[test]
    fn test_update_task_all_fields() {
        let params = UpdateTask {
            id: "t-1".into(),
            title: Some("  Lab report ".into()),
            status: Some("in_progress".into()),
            priority: Some("LOW".into()),
            effort_minutes: Some(50),
            due: Some("2026-10-21 18:30".into()),
            subject: Some("#Physics".into()),
            objective: Some("9.1.2".into()),
        };

        let update = params.validate(&TimeZone::UTC, &catalog()).unwrap();
        assert_eq!(update.title.as_deref(), Some("Lab report"));
        assert_eq!(update.status, Some(TaskStatus::InProgress));
        assert_eq!(update.priority, Some(Priority::Low));
        assert_eq!(update.estimated_effort, Some(50));
        assert_eq!(
            update.due_date,
            Some(
                date(2026, 10, 21)
                    .at(18, 30, 0, 0)
                    .to_zoned(TimeZone::UTC)
                    .unwrap()
                    .timestamp()
            )
        );
        assert_eq!(update.subject_id, Some(Some(SubjectId::new("physics"))));
        assert_eq!(update.linked_goal_id, Some(Some("9.1.2".to_string())));
    }

    #[test]
    fn test_update_task_empty_strings_clear() {
        let params = UpdateTask {
            id: "t-1".into(),
            subject: Some(String::new()),
            objective: Some(" ".into()),
            ..Default::default()
        };
        let update = params.validate(&TimeZone::UTC, &catalog()).unwrap();
        assert_eq!(update.subject_id, Some(None));
        assert_eq!(update.linked_goal_id, Some(None));
    }

    #[test]
    fn test_update_task_no_fields_is_empty() {
        let params = UpdateTask {
            id: "t-1".into(),
            ..Default::default()
        };
        assert!(params.validate(&TimeZone::UTC, &catalog()).unwrap().is_empty());
    }

    #[test]
    fn test_update_task_rfc3339_due() {
        let params = UpdateTask {
            id: "t-1".into(),
            due: Some("2026-10-21T15:00:00Z".into()),
            ..Default::default()
        };
        let update = params.validate(&TimeZone::UTC, &catalog()).unwrap();
        assert_eq!(
            update.due_date,
            Some("2026-10-21T15:00:00Z".parse::<Timestamp>().unwrap())
        );
    }

    #[test]
    fn test_update_task_rejects_bad_values() {
        let cases = [
            (
                UpdateTask {
                    status: Some("later".into()),
                    ..Default::default()
                },
                "status",
            ),
            (
                UpdateTask {
                    priority: Some("urgent".into()),
                    ..Default::default()
                },
                "priority",
            ),
            (
                UpdateTask {
                    subject: Some("#algebra".into()),
                    ..Default::default()
                },
                "subject",
            ),
            (
                UpdateTask {
                    objective: Some("10..2".into()),
                    ..Default::default()
                },
                "objective",
            ),
            (
                UpdateTask {
                    objective: Some("7".into()),
                    ..Default::default()
                },
                "objective",
            ),
            (
                UpdateTask {
                    due: Some("next friday".into()),
                    ..Default::default()
                },
                "due",
            ),
            (
                UpdateTask {
                    title: Some("   ".into()),
                    ..Default::default()
                },
                "title",
            ),
        ];

        for (params, field) in cases {
            assert_eq!(
                invalid_field(params.validate(&TimeZone::UTC, &catalog())),
                field
            );
        }
    }

    #[test]
    fn test_show_week_date() {
        assert_eq!(ShowWeek::default().date().unwrap(), None);
        assert_eq!(
            ShowWeek {
                week: Some("2026-10-22".into())
            }
            .date()
            .unwrap(),
            Some(date(2026, 10, 22))
        );
        assert_eq!(
            invalid_field(
                ShowWeek {
                    week: Some("22.10.2026".into())
                }
                .date()
            ),
            "week"
        );
    }

    #[test]
    fn test_update_meta_validation() {
        let (week, update) = UpdateMeta {
            week: None,
            streak: Some(3),
            total_study_hours: Some(4.5),
        }
        .validate()
        .unwrap();
        assert_eq!(week, None);
        assert_eq!(update.streak, Some(3));

        assert_eq!(invalid_field(UpdateMeta::default().validate()), "meta");
        assert_eq!(
            invalid_field(
                UpdateMeta {
                    total_study_hours: Some(-1.0),
                    ..Default::default()
                }
                .validate()
            ),
            "total_study_hours"
        );
    }

    #[test]
    fn test_update_view_validation() {
        let update = UpdateView {
            mode: Some("list".into()),
            subjects: Some(vec!["math".into(), "Chemistry".into()]),
            show_heatmap: Some(true),
        }
        .validate(&catalog())
        .unwrap();

        assert_eq!(update.mode, Some(ViewMode::List));
        assert_eq!(
            update.selected_subjects,
            Some(vec![SubjectId::new("math"), SubjectId::new("chemistry")])
        );
        assert_eq!(update.show_heatmap, Some(true));

        let bad_mode = UpdateView {
            mode: Some("month".into()),
            ..Default::default()
        };
        assert_eq!(invalid_field(bad_mode.validate(&catalog())), "mode");

        let blank_subject = UpdateView {
            subjects: Some(vec![" ".into()]),
            ..Default::default()
        };
        assert_eq!(invalid_field(blank_subject.validate(&catalog())), "subjects");
    }
}
