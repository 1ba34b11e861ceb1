//! Quick-Add natural-language task parser.
//!
//! Free text such as `"read chapter 5 2h !important"` or
//! `"10.3.2.1 solve practice exercises tomorrow 17:00 #math"` is turned into a
//! [`ParsedTask`] by running an explicit, ordered pipeline of [`Extractor`]s.
//! Each extractor receives the current [`Extraction`] (the text that is still
//! unclaimed plus the draft task) and returns the next one. When an extractor
//! recognizes something it records the value on the draft and removes the
//! first matching span from the remaining text, so later extractors never see
//! it and it never leaks into the title.
//!
//! ```text
//! text ─▶ subject ─▶ objective ─▶ schedule ─▶ effort ─▶ priority ─▶ title
//! ```
//!
//! An extractor that finds nothing leaves its field at the default: no
//! subject, no objective, due one hour from now, 30 minutes of effort, medium
//! priority. The only inputs rejected outright are empty or whitespace-only
//! strings.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use jiff::{civil::date, tz::TimeZone};
//! use studydesk_core::{models::Priority, QuickAddParser, SubjectCatalog};
//!
//! let parser = QuickAddParser::new(Arc::new(SubjectCatalog::builtin()));
//! let now = date(2026, 10, 19).at(9, 30, 0, 0).to_zoned(TimeZone::UTC)?;
//!
//! let task = parser.parse("read chapter 5 2h !important", &now).unwrap();
//! assert_eq!(task.title, "read chapter 5");
//! assert_eq!(task.estimated_effort, 120);
//! assert_eq!(task.priority, Priority::High);
//!
//! assert!(parser.parse("   ", &now).is_none());
//! # Ok::<(), jiff::Error>(())
//! ```

use std::{ops::Range, sync::Arc};

use jiff::{ToSpan, Zoned};
use thiserror::Error;

use crate::{catalog::SubjectCatalog, models::ParsedTask};

pub mod effort;
pub mod objective;
pub mod priority;
pub mod schedule;
pub mod subject;

#[cfg(test)]
mod tests;

pub use effort::EffortExtractor;
pub use objective::ObjectiveCodeExtractor;
pub use priority::PriorityExtractor;
pub use schedule::ScheduleExtractor;
pub use subject::SubjectTagExtractor;

/// Reasons a Quick-Add text yields no task.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Nothing but whitespace was entered
    #[error("input is empty")]
    EmptyInput,
    /// Building a due date failed
    #[error("could not build a due date: {0}")]
    DateTime(#[from] jiff::Error),
}

/// Read-only inputs shared by every extractor in one parse call.
#[derive(Debug, Clone, Copy)]
pub struct ParseContext<'a> {
    /// The moment of parsing, in the user's local time zone
    pub now: &'a Zoned,
    pub catalog: &'a SubjectCatalog,
}

/// State threaded through the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Text not yet claimed by any extractor
    pub remaining: String,
    pub draft: ParsedTask,
}

impl Extraction {
    /// Starts a parse of `text` with every field at its default.
    pub fn start(text: &str, now: &Zoned) -> Result<Self, ParseError> {
        let due = now.checked_add(1.hour())?;
        Ok(Self {
            remaining: text.to_string(),
            draft: ParsedTask::draft(due.timestamp()),
        })
    }

    /// Removes `span` from the remaining text, leaving a space so the
    /// neighbouring words stay apart.
    pub fn strip(&mut self, span: Range<usize>) {
        self.remaining.replace_range(span, " ");
    }

    /// Collapses whitespace in the remaining text into the title, falling
    /// back to `original` when nothing is left.
    fn finish(mut self, original: &str) -> ParsedTask {
        let title = self.remaining.split_whitespace().collect::<Vec<_>>().join(" ");
        self.draft.title = if title.is_empty() {
            original.to_string()
        } else {
            title
        };
        self.draft
    }
}

/// One step of the parsing pipeline.
pub trait Extractor: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Inspects `input.remaining`; on a match records the value on the draft
    /// and strips the matched span. Must return `input` unchanged otherwise.
    fn extract(&self, input: Extraction, ctx: &ParseContext<'_>) -> Result<Extraction, ParseError>;
}

/// Parser that runs the Quick-Add pipeline against a subject catalog.
pub struct QuickAddParser {
    catalog: Arc<SubjectCatalog>,
    pipeline: Vec<Box<dyn Extractor>>,
}

impl QuickAddParser {
    /// Creates a parser with the standard extraction order.
    pub fn new(catalog: Arc<SubjectCatalog>) -> Self {
        Self::with_pipeline(catalog, Self::default_pipeline())
    }

    /// Creates a parser running `pipeline` in the given order.
    pub fn with_pipeline(catalog: Arc<SubjectCatalog>, pipeline: Vec<Box<dyn Extractor>>) -> Self {
        Self { catalog, pipeline }
    }

    /// Subject, objective code, date/time, effort, priority.
    pub fn default_pipeline() -> Vec<Box<dyn Extractor>> {
        vec![
            Box::new(SubjectTagExtractor),
            Box::new(ObjectiveCodeExtractor),
            Box::new(ScheduleExtractor),
            Box::new(EffortExtractor),
            Box::new(PriorityExtractor),
        ]
    }

    pub fn catalog(&self) -> &SubjectCatalog {
        &self.catalog
    }

    /// Names of the extractors in pipeline order.
    pub fn extractor_names(&self) -> Vec<&'static str> {
        self.pipeline.iter().map(|e| e.name()).collect()
    }

    /// Parses `text` as of `now`, reporting why no task was produced.
    pub fn try_parse(&self, text: &str, now: &Zoned) -> Result<ParsedTask, ParseError> {
        if text.trim().is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let ctx = ParseContext {
            now,
            catalog: &self.catalog,
        };

        let mut extraction = Extraction::start(text, now)?;
        for extractor in &self.pipeline {
            extraction = extractor.extract(extraction, &ctx)?;
        }

        Ok(extraction.finish(text))
    }

    /// Parses `text` as of `now`. Returns `None` for empty input and for
    /// internal faults, which are logged.
    pub fn parse(&self, text: &str, now: &Zoned) -> Option<ParsedTask> {
        match self.try_parse(text, now) {
            Ok(parsed) => Some(parsed),
            Err(ParseError::EmptyInput) => None,
            Err(e) => {
                log::warn!("Quick-Add parse of {text:?} failed: {e}");
                None
            }
        }
    }
}

impl std::fmt::Debug for QuickAddParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuickAddParser")
            .field("catalog", &self.catalog.len())
            .field("pipeline", &self.extractor_names())
            .finish()
    }
}

/// Parses `text` with the standard pipeline against `catalog`.
pub fn parse(text: &str, now: &Zoned, catalog: &SubjectCatalog) -> Option<ParsedTask> {
    QuickAddParser::new(Arc::new(catalog.clone())).parse(text, now)
}
