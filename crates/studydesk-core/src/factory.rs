//! Turns parsed Quick-Add results into persisted-ready tasks.

use std::{
    collections::BTreeSet,
    fmt,
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
};

use jiff::Timestamp;
use rand::Rng;

use crate::{
    clock::{Clock, SystemClock},
    models::{ParsedTask, Task, TaskId},
};

/// Source of unique task identifiers.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self, now: Timestamp) -> TaskId;
}

/// Millisecond timestamp in hex followed by a random 32-bit suffix, e.g.
/// `19a0b1c2d3e-5f3a9c01`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampIdGenerator;

impl IdGenerator for TimestampIdGenerator {
    fn next_id(&self, now: Timestamp) -> TaskId {
        let suffix: u32 = rand::rng().random();
        TaskId::new(format!("{:x}-{suffix:08x}", now.as_millisecond()))
    }
}

/// Creates [`Task`]s from [`ParsedTask`]s.
///
/// Positions are the creation time in milliseconds, bumped by one whenever
/// two tasks are created within the same millisecond, so tasks created later
/// always sort after earlier ones.
pub struct TaskFactory {
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    last_position: AtomicI64,
}

impl TaskFactory {
    /// Factory using `clock` and the default id generator.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_id_generator(clock, Arc::new(TimestampIdGenerator))
    }

    pub fn with_id_generator(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            clock,
            ids,
            last_position: AtomicI64::new(i64::MIN),
        }
    }

    /// Builds a pending task from `parsed`, stamped with the current time.
    pub fn create_task(&self, parsed: ParsedTask) -> Task {
        let now = self.clock.now().timestamp();
        let position = self.next_position(now.as_millisecond());
        let tags: BTreeSet<String> = parsed
            .subject_id
            .iter()
            .map(|id| id.as_str().to_string())
            .collect();

        Task {
            id: self.ids.next_id(now),
            title: parsed.title,
            subject_id: parsed.subject_id,
            linked_goal_id: parsed.linked_goal_id,
            due_date: parsed.due_date,
            estimated_effort: parsed.estimated_effort,
            status: parsed.status,
            created_at: now,
            updated_at: now,
            position,
            priority: parsed.priority,
            tags,
        }
    }

    fn next_position(&self, candidate: i64) -> i64 {
        let mut last = self.last_position.load(Ordering::Relaxed);
        loop {
            let next = candidate.max(last.saturating_add(1));
            match self.last_position.compare_exchange_weak(
                last,
                next,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return next,
                Err(current) => last = current,
            }
        }
    }
}

impl Default for TaskFactory {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock::new()))
    }
}

impl fmt::Debug for TaskFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskFactory")
            .field("last_position", &self.last_position.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicU32;

    use jiff::{civil::date, tz::TimeZone};

    use super::*;
    use crate::{
        clock::FixedClock,
        models::{Priority, SubjectId, TaskStatus},
    };

    fn fixed_clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock(
            date(2026, 10, 19)
                .at(9, 30, 0, 0)
                .to_zoned(TimeZone::UTC)
                .unwrap(),
        ))
    }

    fn parsed(subject: Option<&str>) -> ParsedTask {
        ParsedTask {
            subject_id: subject.map(SubjectId::new),
            linked_goal_id: Some("10.3.2.1".to_string()),
            due_date: Timestamp::from_second(1_792_000_000).unwrap(),
            estimated_effort: 45,
            title: "Solve practice exercises".to_string(),
            priority: Priority::High,
            status: TaskStatus::Pending,
        }
    }

    struct SequentialIds(AtomicU32);

    impl IdGenerator for SequentialIds {
        fn next_id(&self, _now: Timestamp) -> TaskId {
            TaskId::new(format!("task-{}", self.0.fetch_add(1, Ordering::Relaxed)))
        }
    }

    #[test]
    fn test_create_task_copies_parsed_fields() {
        let clock = fixed_clock();
        let now = clock.now().timestamp();
        let factory = TaskFactory::new(clock);

        let task = factory.create_task(parsed(Some("math")));

        assert_eq!(task.title, "Solve practice exercises");
        assert_eq!(task.subject_id, Some(SubjectId::new("math")));
        assert_eq!(task.linked_goal_id.as_deref(), Some("10.3.2.1"));
        assert_eq!(task.estimated_effort, 45);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.created_at, now);
        assert_eq!(task.updated_at, now);
        assert_eq!(task.position, now.as_millisecond());
        assert_eq!(task.tags, BTreeSet::from(["math".to_string()]));
    }

    #[test]
    fn test_no_subject_means_no_tags() {
        let factory = TaskFactory::new(fixed_clock());
        let task = factory.create_task(parsed(None));
        assert!(task.tags.is_empty());
    }

    #[test]
    fn test_same_parsed_task_twice_gives_distinct_ids() {
        let factory = TaskFactory::new(fixed_clock());
        let input = parsed(Some("physics"));

        let first = factory.create_task(input.clone());
        let second = factory.create_task(input);

        assert_ne!(first.id, second.id);
        assert_eq!(first.title, second.title);
        assert_eq!(first.subject_id, second.subject_id);
        assert_eq!(first.due_date, second.due_date);
        assert_eq!(first.estimated_effort, second.estimated_effort);
        assert_eq!(first.priority, second.priority);
    }

    #[test]
    fn test_positions_strictly_increase_within_one_millisecond() {
        let factory = TaskFactory::new(fixed_clock());

        let positions: Vec<i64> = (0..5)
            .map(|_| factory.create_task(parsed(None)).position)
            .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_custom_id_generator() {
        let factory =
            TaskFactory::with_id_generator(fixed_clock(), Arc::new(SequentialIds(AtomicU32::new(1))));

        assert_eq!(factory.create_task(parsed(None)).id, TaskId::new("task-1"));
        assert_eq!(factory.create_task(parsed(None)).id, TaskId::new("task-2"));
    }

    #[test]
    fn test_timestamp_ids_embed_time() {
        let now = Timestamp::from_millisecond(0x19a0_b1c2_d3e).unwrap();
        let id = TimestampIdGenerator.next_id(now);
        assert!(id.as_str().starts_with("19a0b1c2d3e-"));
        assert_eq!(id.as_str().len(), "19a0b1c2d3e-".len() + 8);
    }
}
