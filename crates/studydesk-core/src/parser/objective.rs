//! Dotted curriculum objective codes such as `10.3.2.1`.

use std::sync::LazyLock;

use regex::Regex;

use super::{Extraction, Extractor, ParseContext, ParseError};

static OBJECTIVE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+(?:\.[0-9]+)+").expect("objective pattern is valid"));

/// Links the task to the first dotted numeric code, kept verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectiveCodeExtractor;

impl Extractor for ObjectiveCodeExtractor {
    fn name(&self) -> &'static str {
        "objective"
    }

    fn extract(
        &self,
        mut input: Extraction,
        _ctx: &ParseContext<'_>,
    ) -> Result<Extraction, ParseError> {
        if let Some(code) = OBJECTIVE_CODE.find(&input.remaining) {
            input.draft.linked_goal_id = Some(code.as_str().to_string());
            input.strip(code.range());
        }
        Ok(input)
    }
}
