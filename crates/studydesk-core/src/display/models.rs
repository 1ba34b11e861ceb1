//! Display implementations for domain models.
//!
//! All output is markdown so the CLI can render it with its terminal skin and
//! MCP clients can show it verbatim.

use std::fmt;

use super::datetime::{Effort, LocalDateTime};
use crate::models::{
    ParsedTask, Priority, Subject, Task, TaskStatus, ViewMode, ViewSettings, WeekPlan,
};

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- {} **{}** `#{}` ({})",
            self.icon, self.name, self.id, self.color
        )
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {} ({})", self.title, self.status.with_icon())?;
        writeln!(f)?;
        writeln!(f, "- ID: `{}`", self.id)?;
        if let Some(subject) = &self.subject_id {
            writeln!(f, "- Subject: {subject}")?;
        }
        if let Some(goal) = &self.linked_goal_id {
            writeln!(f, "- Objective: {goal}")?;
        }
        writeln!(f, "- Due: {}", LocalDateTime(&self.due_date))?;
        writeln!(f, "- Effort: {}", Effort::from(self.estimated_effort))?;
        writeln!(f, "- Priority: {}", self.priority)?;

        let extra_tags: Vec<&str> = self
            .tags
            .iter()
            .map(String::as_str)
            .filter(|tag| self.subject_id.as_ref().map(|s| s.as_str()) != Some(*tag))
            .collect();
        if !extra_tags.is_empty() {
            writeln!(f, "- Tags: {}", extra_tags.join(", "))?;
        }
        writeln!(f)
    }
}

impl fmt::Display for WeekPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Week of {}", self.week_start)?;
        writeln!(f)?;
        writeln!(
            f,
            "- Completed: {}/{}",
            self.meta.completed_tasks, self.meta.total_tasks
        )?;
        writeln!(
            f,
            "- Planned effort: {} ({} done)",
            Effort(self.planned_minutes()),
            Effort(self.completed_minutes())
        )?;
        writeln!(f, "- Streak: {} days", self.meta.streak)?;
        writeln!(f, "- Study hours: {}", self.meta.total_study_hours)?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if self.tasks.is_empty() {
            writeln!(f, "\nNo tasks planned for this week.")?;
        } else {
            writeln!(f, "\n## Tasks")?;
            writeln!(f)?;
            for task in self.sorted_tasks() {
                write!(f, "{task}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for ParsedTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}", self.title)?;
        writeln!(f)?;
        writeln!(
            f,
            "- Subject: {}",
            self.subject_id.as_ref().map_or("none", |s| s.as_str())
        )?;
        writeln!(
            f,
            "- Objective: {}",
            self.linked_goal_id.as_deref().unwrap_or("none")
        )?;
        writeln!(f, "- Due: {}", LocalDateTime(&self.due_date))?;
        writeln!(f, "- Effort: {}", Effort::from(self.estimated_effort))?;
        writeln!(f, "- Priority: {}", self.priority)
    }
}

impl fmt::Display for ViewSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# View")?;
        writeln!(f)?;
        writeln!(f, "- Mode: {}", self.mode)?;
        if self.selected_subjects.is_empty() {
            writeln!(f, "- Subjects: all")?;
        } else {
            let subjects: Vec<&str> = self.selected_subjects.iter().map(|s| s.as_str()).collect();
            writeln!(f, "- Subjects: {}", subjects.join(", "))?;
        }
        writeln!(
            f,
            "- Heatmap: {}",
            if self.show_heatmap { "on" } else { "off" }
        )
    }
}
