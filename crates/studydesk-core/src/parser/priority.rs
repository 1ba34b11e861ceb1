//! `!important`, `!high` and `!low` priority markers.

use std::sync::LazyLock;

use regex::Regex;

use super::{Extraction, Extractor, ParseContext, ParseError};
use crate::models::Priority;

static HIGH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)!(?:important|high)\b").expect("priority pattern is valid"));
static LOW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)!low\b").expect("priority pattern is valid"));

/// High markers win over low ones; without a marker the priority stays
/// medium.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityExtractor;

impl Extractor for PriorityExtractor {
    fn name(&self) -> &'static str {
        "priority"
    }

    fn extract(
        &self,
        mut input: Extraction,
        _ctx: &ParseContext<'_>,
    ) -> Result<Extraction, ParseError> {
        let marker = [(&*HIGH, Priority::High), (&*LOW, Priority::Low)]
            .into_iter()
            .find_map(|(regex, priority)| {
                regex.find(&input.remaining).map(|m| (m.range(), priority))
            });

        if let Some((span, priority)) = marker {
            input.draft.priority = priority;
            input.strip(span);
        }
        Ok(input)
    }
}
