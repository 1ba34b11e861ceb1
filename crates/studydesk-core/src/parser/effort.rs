//! Estimated effort such as `2h`, `1.5 hours` or `45min`.

use std::sync::LazyLock;

use regex::Regex;

use super::{Extraction, Extractor, ParseContext, ParseError};

static EFFORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?P<value>[0-9]+(?:[.,][0-9]+)?)\s*(?P<unit>hours|hour|h|minutes|minute|mins|min|часов|часа|час|ч|минут|мин)\b",
    )
    .expect("effort pattern is valid")
});

/// Converts the first duration in the text to whole minutes.
#[derive(Debug, Clone, Copy, Default)]
pub struct EffortExtractor;

impl Extractor for EffortExtractor {
    fn name(&self) -> &'static str {
        "effort"
    }

    fn extract(
        &self,
        mut input: Extraction,
        _ctx: &ParseContext<'_>,
    ) -> Result<Extraction, ParseError> {
        let Some(caps) = EFFORT.captures(&input.remaining) else {
            return Ok(input);
        };
        let (Some(whole), Some(value), Some(unit)) =
            (caps.get(0), caps.name("value"), caps.name("unit"))
        else {
            return Ok(input);
        };

        match effort_minutes(value.as_str(), unit.as_str()) {
            Some(minutes) => {
                input.draft.estimated_effort = minutes;
                let span = whole.range();
                input.strip(span);
            }
            None => log::debug!("Ignoring unusable effort {:?}", whole.as_str()),
        }

        Ok(input)
    }
}

/// Minutes for `value` in `unit`; `None` when the number is not usable.
///
/// Hours become `round(value * 60)`, minutes are rounded to the nearest
/// integer.
pub fn effort_minutes(value: &str, unit: &str) -> Option<u32> {
    let value: f64 = value.replace(',', ".").parse().ok()?;
    let minutes = if is_hour_unit(unit) {
        (value * 60.0).round()
    } else {
        value.round()
    };

    if !minutes.is_finite() || minutes < 0.0 || minutes > f64::from(u32::MAX) {
        return None;
    }
    Some(minutes as u32)
}

fn is_hour_unit(unit: &str) -> bool {
    matches!(
        unit.to_lowercase().as_str(),
        "h" | "hour" | "hours" | "ч" | "час" | "часа" | "часов"
    )
}
