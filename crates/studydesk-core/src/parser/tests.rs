//! Tests for the Quick-Add parser.

use std::sync::Arc;

use jiff::{
    civil::date,
    tz::{self, TimeZone},
    Timestamp, Zoned,
};

use super::*;
use crate::models::{Priority, SubjectId, TaskStatus};

/// Monday 2026-10-19 09:30 UTC
fn monday_morning() -> Zoned {
    date(2026, 10, 19)
        .at(9, 30, 0, 0)
        .to_zoned(TimeZone::UTC)
        .expect("valid test time")
}

fn utc(year: i16, month: i8, day: i8, hour: i8, minute: i8) -> Timestamp {
    date(year, month, day)
        .at(hour, minute, 0, 0)
        .to_zoned(TimeZone::UTC)
        .expect("valid test time")
        .timestamp()
}

fn parser() -> QuickAddParser {
    QuickAddParser::new(Arc::new(SubjectCatalog::builtin()))
}

fn parse_at_monday(text: &str) -> ParsedTask {
    parser()
        .parse(text, &monday_morning())
        .unwrap_or_else(|| panic!("expected {text:?} to parse"))
}

#[test]
fn test_known_subject_tag_is_resolved_and_stripped() {
    for text in ["#math homework", "homework #math", "home #MATH work"] {
        let parsed = parse_at_monday(text);
        assert_eq!(parsed.subject_id, Some(SubjectId::new("math")), "{text}");
        assert!(!parsed.title.to_lowercase().contains("#math"), "{text}");
    }
}

#[test]
fn test_subject_tag_matches_display_name() {
    let parsed = parse_at_monday("#Physics lab report");
    assert_eq!(parsed.subject_id, Some(SubjectId::new("physics")));
    assert_eq!(parsed.title, "lab report");
}

#[test]
fn test_unknown_tag_stays_in_title() {
    let parsed = parse_at_monday("math homework tomorrow 17:00 #algebra");

    assert_eq!(parsed.subject_id, None);
    assert_eq!(parsed.estimated_effort, 30);
    assert_eq!(parsed.due_date, utc(2026, 10, 20, 17, 0));
    assert_eq!(parsed.priority, Priority::Medium);
    assert!(parsed.title.contains("math homework"));
    assert_eq!(parsed.title, "math homework #algebra");
}

#[test]
fn test_only_first_tag_is_considered() {
    let parsed = parse_at_monday("#algebra #math review");
    assert_eq!(parsed.subject_id, None);
    assert_eq!(parsed.title, "#algebra #math review");
}

#[test]
fn test_objective_code_is_linked() {
    let parsed = parse_at_monday("10.3.2.1 solve practice exercises");
    assert_eq!(parsed.linked_goal_id.as_deref(), Some("10.3.2.1"));
    assert_eq!(parsed.title, "solve practice exercises");
}

#[test]
fn test_first_objective_code_wins() {
    for (text, code) in [
        ("review 7.1 and 7.2", "7.1"),
        ("8.2.4 then 9.1", "8.2.4"),
        ("exam prep 11.4.1.3.2", "11.4.1.3.2"),
    ] {
        let parsed = parse_at_monday(text);
        assert_eq!(parsed.linked_goal_id.as_deref(), Some(code), "{text}");
    }
}

#[test]
fn test_effort_priority_example() {
    let parsed = parse_at_monday("read chapter 5 2h !important");

    assert_eq!(parsed.estimated_effort, 120);
    assert_eq!(parsed.priority, Priority::High);
    assert_eq!(parsed.title, "read chapter 5");
}

#[test]
fn test_effort_units() {
    for (text, minutes) in [
        ("essay 3 hours", 180),
        ("essay 1 hour", 60),
        ("essay 1,5 hours", 90),
        ("quiz 45min", 45),
        ("quiz 10 mins", 10),
        ("quiz 25 minutes", 25),
        ("lab 2,5 min", 3),
        ("flashcards 2H", 120),
        ("конспект 2ч", 120),
        ("конспект 20 минут", 20),
    ] {
        let parsed = parse_at_monday(text);
        assert_eq!(parsed.estimated_effort, minutes, "{text}");
    }
}

#[test]
fn test_objective_code_claims_dotted_hours_first() {
    let parsed = parse_at_monday("reading 1.5h");
    assert_eq!(parsed.linked_goal_id.as_deref(), Some("1.5"));
    assert_eq!(parsed.estimated_effort, ParsedTask::DEFAULT_EFFORT_MINUTES);
}

#[test]
fn test_defaults_without_markers() {
    let now = monday_morning();
    let parsed = parser().parse("write summary", &now).unwrap();

    assert_eq!(parsed.subject_id, None);
    assert_eq!(parsed.linked_goal_id, None);
    assert_eq!(parsed.due_date, utc(2026, 10, 19, 10, 30));
    assert_eq!(parsed.estimated_effort, 30);
    assert_eq!(parsed.priority, Priority::Medium);
    assert_eq!(parsed.status, TaskStatus::Pending);
    assert_eq!(parsed.title, "write summary");
}

#[test]
fn test_schedule_patterns() {
    for (text, due, title) in [
        ("quiz today at 18:45", utc(2026, 10, 19, 18, 45), "quiz"),
        ("quiz tomorrow at 8:05", utc(2026, 10, 20, 8, 5), "quiz"),
        ("quiz tomorrow 23:59", utc(2026, 10, 20, 23, 59), "quiz"),
        ("quiz today 7:00", utc(2026, 10, 19, 7, 0), "quiz"),
        ("quiz 17:00", utc(2026, 10, 19, 17, 0), "quiz"),
        ("тест завтра в 17:00", utc(2026, 10, 20, 17, 0), "тест"),
        ("тест Сегодня 12:15", utc(2026, 10, 19, 12, 15), "тест"),
    ] {
        let parsed = parse_at_monday(text);
        assert_eq!(parsed.due_date, due, "{text}");
        assert_eq!(parsed.title, title, "{text}");
    }
}

#[test]
fn test_weekday_is_next_occurrence() {
    for (text, due) in [
        ("seminar friday 17:00", utc(2026, 10, 23, 17, 0)),
        ("seminar Tuesday at 9:00", utc(2026, 10, 20, 9, 0)),
        ("seminar sun 10:30", utc(2026, 10, 25, 10, 30)),
        ("семинар в пятницу в 16:30", utc(2026, 10, 23, 16, 30)),
    ] {
        let parsed = parse_at_monday(text);
        assert_eq!(parsed.due_date, due, "{text}");
        assert!(parsed.title == "seminar" || parsed.title == "семинар", "{text}");
    }
}

#[test]
fn test_todays_weekday_rolls_forward_a_week() {
    let parsed = parse_at_monday("club monday 15:00");
    assert_eq!(parsed.due_date, utc(2026, 10, 26, 15, 0));
}

#[test]
fn test_explicit_today_beats_bare_time() {
    let parsed = parse_at_monday("call 8:00 or today at 19:00");
    assert_eq!(parsed.due_date, utc(2026, 10, 19, 19, 0));
    assert_eq!(parsed.title, "call 8:00 or");
}

#[test]
fn test_out_of_range_time_is_ignored() {
    let parsed = parse_at_monday("meeting 25:99");
    assert_eq!(parsed.due_date, utc(2026, 10, 19, 10, 30));
    assert_eq!(parsed.title, "meeting 25:99");
}

#[test]
fn test_times_use_local_time_zone() {
    let moscow = TimeZone::fixed(tz::offset(3));
    let now = date(2026, 10, 19)
        .at(9, 30, 0, 0)
        .to_zoned(moscow)
        .unwrap();

    let parsed = parser().parse("essay tomorrow 17:00", &now).unwrap();
    assert_eq!(parsed.due_date, utc(2026, 10, 20, 14, 0));
}

#[test]
fn test_priority_markers() {
    assert_eq!(parse_at_monday("task !low").priority, Priority::Low);
    assert_eq!(parse_at_monday("task !HIGH").priority, Priority::High);
    assert_eq!(parse_at_monday("task !important").priority, Priority::High);
    assert_eq!(parse_at_monday("task").priority, Priority::Medium);

    let both = parse_at_monday("task !low !high");
    assert_eq!(both.priority, Priority::High);
    assert_eq!(both.title, "task !low");
}

#[test]
fn test_empty_input_yields_none() {
    let now = monday_morning();
    assert!(parser().parse("", &now).is_none());
    assert!(parser().parse("  \t\n", &now).is_none());
    assert!(matches!(
        parser().try_parse("   ", &now),
        Err(ParseError::EmptyInput)
    ));
}

#[test]
fn test_title_falls_back_to_original_text() {
    let parsed = parse_at_monday("#math 2h");
    assert_eq!(parsed.subject_id, Some(SubjectId::new("math")));
    assert_eq!(parsed.estimated_effort, 120);
    assert_eq!(parsed.title, "#math 2h");

    let padded = parse_at_monday("  !high ");
    assert_eq!(padded.title, "  !high ");
}

#[test]
fn test_title_whitespace_is_collapsed() {
    let parsed = parse_at_monday("  solve   problems 10.1  set ");
    assert_eq!(parsed.title, "solve problems set");
}

#[test]
fn test_full_sentence() {
    let parsed =
        parse_at_monday("10.3.2.1 solve practice exercises #math tomorrow at 16:00 90min !high");

    assert_eq!(parsed.subject_id, Some(SubjectId::new("math")));
    assert_eq!(parsed.linked_goal_id.as_deref(), Some("10.3.2.1"));
    assert_eq!(parsed.due_date, utc(2026, 10, 20, 16, 0));
    assert_eq!(parsed.estimated_effort, 90);
    assert_eq!(parsed.priority, Priority::High);
    assert_eq!(parsed.title, "solve practice exercises");
}

#[test]
fn test_default_pipeline_order() {
    assert_eq!(
        parser().extractor_names(),
        vec!["subject", "objective", "schedule", "effort", "priority"]
    );
}

#[test]
fn test_custom_pipeline_runs_only_given_extractors() {
    let parser = QuickAddParser::with_pipeline(
        Arc::new(SubjectCatalog::builtin()),
        vec![Box::new(PriorityExtractor)],
    );
    let parsed = parser.parse("10.3 task #math !low", &monday_morning()).unwrap();

    assert_eq!(parsed.priority, Priority::Low);
    assert_eq!(parsed.linked_goal_id, None);
    assert_eq!(parsed.subject_id, None);
    assert_eq!(parsed.title, "10.3 task #math");
}

#[test]
fn test_single_extractor_in_isolation() {
    let now = monday_morning();
    let catalog = SubjectCatalog::builtin();
    let ctx = ParseContext {
        now: &now,
        catalog: &catalog,
    };

    let input = Extraction::start("essay 2h draft", &now).unwrap();
    let output = EffortExtractor.extract(input, &ctx).unwrap();
    assert_eq!(output.draft.estimated_effort, 120);
    assert_eq!(output.remaining, "essay   draft");

    let untouched = Extraction::start("essay draft", &now).unwrap();
    let output = EffortExtractor.extract(untouched.clone(), &ctx).unwrap();
    assert_eq!(output, untouched);
}

#[test]
fn test_free_function_uses_catalog() {
    let parsed = parse("#history timeline", &monday_morning(), &SubjectCatalog::builtin()).unwrap();
    assert_eq!(parsed.subject_id, Some(SubjectId::new("history")));
    assert_eq!(parsed.title, "timeline");
}

#[test]
fn test_weekday_names() {
    use jiff::civil::Weekday;

    assert_eq!(schedule::weekday_named("FRIDAY"), Some(Weekday::Friday));
    assert_eq!(schedule::weekday_named("среду"), Some(Weekday::Wednesday));
    assert_eq!(schedule::weekday_named("someday"), None);
    assert_eq!(
        schedule::next_weekday_after(date(2026, 10, 19), Weekday::Monday).unwrap(),
        date(2026, 10, 26)
    );
}

#[test]
fn test_effort_minutes_guards() {
    assert_eq!(effort::effort_minutes("2", "h"), Some(120));
    assert_eq!(effort::effort_minutes("0,25", "hours"), Some(15));
    assert_eq!(effort::effort_minutes("99999999999", "hours"), None);
}
