//! Due date and time extraction.
//!
//! Patterns are tried in priority order and the first one that matches wins:
//!
//! | Pattern                         | Day                          |
//! |---------------------------------|------------------------------|
//! | `today at 17:00`                | today                        |
//! | `tomorrow at 17:00`             | tomorrow                     |
//! | `tomorrow 17:00`                | tomorrow                     |
//! | `today 17:00`                   | today                        |
//! | `friday 17:00`, `friday at 17:00` | next Friday after today    |
//! | `17:00`                         | today                        |
//!
//! Russian keywords (`сегодня`, `завтра`, `в`, weekday names) are accepted
//! alongside the English ones. The weekday rule never selects today: naming
//! today's weekday means the same day next week. All times are wall-clock
//! times in the time zone of the parse context's `now`.

use std::sync::LazyLock;

use jiff::{
    civil::{Date, Time, Weekday},
    ToSpan, Zoned,
};
use regex::{Captures, Regex};

use super::{Extraction, Extractor, ParseContext, ParseError};

const TODAY: &str = "(?:today|сегодня)";
const TOMORROW: &str = "(?:tomorrow|завтра)";
const AT: &str = "(?:at|в)";
const TIME: &str = "(?P<hour>[01]?[0-9]|2[0-3]):(?P<minute>[0-5][0-9])";
const WEEKDAY: &str = "(?P<weekday>monday|tuesday|wednesday|thursday|friday|saturday|sunday|\
                       mon|tue|wed|thu|fri|sat|sun|\
                       понедельник|вторник|среду|среда|четверг|пятницу|пятница|субботу|суббота|воскресенье)";

/// Which day a matched pattern refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DayRule {
    Today,
    Tomorrow,
    NextWeekday,
}

struct SchedulePattern {
    regex: Regex,
    day: DayRule,
}

impl SchedulePattern {
    fn new(pattern: &str, day: DayRule) -> Self {
        Self {
            regex: Regex::new(&format!("(?i){pattern}")).expect("schedule pattern is valid"),
            day,
        }
    }
}

// Tried in order. Weekday phrases precede the bare time, which would
// otherwise match their "H:MM" first.
static PATTERNS: LazyLock<Vec<SchedulePattern>> = LazyLock::new(|| {
    vec![
        SchedulePattern::new(&format!(r"\b{TODAY}\s+{AT}\s+{TIME}\b"), DayRule::Today),
        SchedulePattern::new(&format!(r"\b{TOMORROW}\s+{AT}\s+{TIME}\b"), DayRule::Tomorrow),
        SchedulePattern::new(&format!(r"\b{TOMORROW}\s+{TIME}\b"), DayRule::Tomorrow),
        SchedulePattern::new(&format!(r"\b{TODAY}\s+{TIME}\b"), DayRule::Today),
        SchedulePattern::new(
            &format!(r"\b(?:(?:on|в)\s+)?{WEEKDAY}\s+(?:{AT}\s+)?{TIME}\b"),
            DayRule::NextWeekday,
        ),
        SchedulePattern::new(&format!(r"\b{TIME}\b"), DayRule::Today),
    ]
});

/// Sets the due date from the first recognized date/time phrase.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleExtractor;

impl Extractor for ScheduleExtractor {
    fn name(&self) -> &'static str {
        "schedule"
    }

    fn extract(
        &self,
        mut input: Extraction,
        ctx: &ParseContext<'_>,
    ) -> Result<Extraction, ParseError> {
        for pattern in PATTERNS.iter() {
            let Some(caps) = pattern.regex.captures(&input.remaining) else {
                continue;
            };
            let Some(day) = resolve_day(pattern.day, &caps, ctx.now)? else {
                continue;
            };
            let Some(time) = clock_time(&caps) else {
                continue;
            };

            let due = day.to_datetime(time).to_zoned(ctx.now.time_zone().clone())?;
            input.draft.due_date = due.timestamp();

            if let Some(whole) = caps.get(0) {
                let span = whole.range();
                input.strip(span);
            }
            return Ok(input);
        }

        log::debug!("No date/time found, keeping default due date");
        Ok(input)
    }
}

fn resolve_day(rule: DayRule, caps: &Captures<'_>, now: &Zoned) -> Result<Option<Date>, ParseError> {
    let today = now.date();
    let day = match rule {
        DayRule::Today => Some(today),
        DayRule::Tomorrow => Some(today.tomorrow()?),
        DayRule::NextWeekday => match caps.name("weekday").and_then(|m| weekday_named(m.as_str())) {
            Some(weekday) => Some(next_weekday_after(today, weekday)?),
            None => None,
        },
    };
    Ok(day)
}

fn clock_time(caps: &Captures<'_>) -> Option<Time> {
    let hour = caps.name("hour")?.as_str().parse::<i8>().ok()?;
    let minute = caps.name("minute")?.as_str().parse::<i8>().ok()?;
    Time::new(hour, minute, 0, 0).ok()
}

/// The next date strictly after `today` that falls on `weekday`.
pub fn next_weekday_after(today: Date, weekday: Weekday) -> Result<Date, ParseError> {
    let mut days = (weekday.to_monday_zero_offset() - today.weekday().to_monday_zero_offset())
        .rem_euclid(7);
    if days == 0 {
        days = 7;
    }
    Ok(today.checked_add(i64::from(days).days())?)
}

/// Maps an English or Russian weekday name (any case) to a [`Weekday`].
pub fn weekday_named(name: &str) -> Option<Weekday> {
    let name = name.to_lowercase();
    let weekday = match name.as_str() {
        "monday" | "mon" | "понедельник" => Weekday::Monday,
        "tuesday" | "tue" | "вторник" => Weekday::Tuesday,
        "wednesday" | "wed" | "среда" | "среду" => Weekday::Wednesday,
        "thursday" | "thu" | "четверг" => Weekday::Thursday,
        "friday" | "fri" | "пятница" | "пятницу" => Weekday::Friday,
        "saturday" | "sat" | "суббота" | "субботу" => Weekday::Saturday,
        "sunday" | "sun" | "воскресенье" => Weekday::Sunday,
        _ => return None,
    };
    Some(weekday)
}
