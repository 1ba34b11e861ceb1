//! `#tag` subject extraction.

use std::sync::LazyLock;

use regex::Regex;

use super::{Extraction, Extractor, ParseContext, ParseError};

static SUBJECT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([\p{L}\p{N}_-]+)").expect("subject tag pattern is valid"));

/// Resolves the first `#tag` against the subject catalog. A tag that names no
/// known subject is left in the text.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubjectTagExtractor;

impl Extractor for SubjectTagExtractor {
    fn name(&self) -> &'static str {
        "subject"
    }

    fn extract(
        &self,
        mut input: Extraction,
        ctx: &ParseContext<'_>,
    ) -> Result<Extraction, ParseError> {
        let Some(caps) = SUBJECT_TAG.captures(&input.remaining) else {
            return Ok(input);
        };
        let (Some(whole), Some(tag)) = (caps.get(0), caps.get(1)) else {
            return Ok(input);
        };

        match ctx.catalog.resolve(tag.as_str()) {
            Some(subject) => {
                input.draft.subject_id = Some(subject.id.clone());
                let span = whole.range();
                input.strip(span);
            }
            None => log::debug!("Tag #{} is not a known subject", tag.as_str()),
        }

        Ok(input)
    }
}
