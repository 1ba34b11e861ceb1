#[cfg(test)]
mod model_tests {
    use jiff::{
        civil::{date, Weekday},
        Timestamp,
    };

    use crate::models::{
        week_start_of, MetaUpdate, Priority, SubjectId, Task, TaskId, TaskStatus, TaskUpdate,
        ViewMode, WeekMeta, WeekPlan,
    };

    fn create_test_task(id: &str, status: TaskStatus) -> Task {
        let created = Timestamp::from_second(1_792_396_800).unwrap(); // 2026-10-19 08:00:00 UTC
        Task {
            id: TaskId::new(id),
            title: "Solve practice exercises".to_string(),
            subject_id: Some(SubjectId::new("math")),
            linked_goal_id: Some("10.3.2.1".to_string()),
            due_date: Timestamp::from_second(1_792_508_400).unwrap(),
            estimated_effort: 90,
            status,
            created_at: created,
            updated_at: created,
            position: created.as_millisecond(),
            priority: Priority::High,
            tags: ["math".to_string()].into(),
        }
    }

    fn create_test_week() -> WeekPlan {
        let created = Timestamp::from_second(1_792_396_800).unwrap();
        let mut plan = WeekPlan::new(date(2026, 10, 19), created);
        plan.tasks = vec![
            create_test_task("a", TaskStatus::Completed),
            create_test_task("b", TaskStatus::InProgress),
            create_test_task("c", TaskStatus::Pending),
        ];
        plan.sync_counters();
        plan
    }

    #[test]
    fn test_task_status_parsing() {
        assert_eq!("pending".parse::<TaskStatus>(), Ok(TaskStatus::Pending));
        assert_eq!("todo".parse::<TaskStatus>(), Ok(TaskStatus::Pending));
        assert_eq!("In-Progress".parse::<TaskStatus>(), Ok(TaskStatus::InProgress));
        assert_eq!("done".parse::<TaskStatus>(), Ok(TaskStatus::Completed));
        assert!("finished".parse::<TaskStatus>().is_err());

        for status in [TaskStatus::Pending, TaskStatus::InProgress, TaskStatus::Completed] {
            assert_eq!(status.as_str().parse::<TaskStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_priority_and_view_mode_parsing() {
        assert_eq!("HIGH".parse::<Priority>(), Ok(Priority::High));
        assert_eq!("low".parse::<Priority>(), Ok(Priority::Low));
        assert!("urgent".parse::<Priority>().is_err());
        assert!(Priority::Low < Priority::High);

        assert_eq!("day".parse::<ViewMode>(), Ok(ViewMode::Day));
        assert_eq!(ViewMode::default(), ViewMode::Week);
        assert!("month".parse::<ViewMode>().is_err());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }

    #[test]
    fn test_week_start_of() {
        // 2026-10-25 is a Sunday
        let sunday = date(2026, 10, 25);
        assert_eq!(week_start_of(sunday, Weekday::Monday).unwrap(), date(2026, 10, 19));
        assert_eq!(week_start_of(sunday, Weekday::Sunday).unwrap(), sunday);

        let monday = date(2026, 10, 19);
        assert_eq!(week_start_of(monday, Weekday::Monday).unwrap(), monday);
        assert_eq!(week_start_of(monday, Weekday::Sunday).unwrap(), date(2026, 10, 18));
    }

    #[test]
    fn test_week_plan_counters() {
        let plan = create_test_week();
        assert_eq!(plan.meta.total_tasks, 3);
        assert_eq!(plan.meta.completed_tasks, 1);
        assert_eq!(plan.planned_minutes(), 270);
        assert_eq!(plan.completed_minutes(), 90);
        assert_eq!(plan.week_end().unwrap(), date(2026, 10, 25));
        assert!(plan.contains(&TaskId::new("b")));
        assert!(!plan.contains(&TaskId::new("z")));
    }

    #[test]
    fn test_sorted_tasks_by_due_then_position() {
        let mut plan = create_test_week();
        plan.tasks[0].position += 10;
        plan.tasks[2].due_date = Timestamp::from_second(1_792_400_000).unwrap();

        let order: Vec<&str> = plan.sorted_tasks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(order, vec!["c", "b", "a"]);
        // Stored order stays insertion order
        assert_eq!(plan.tasks[0].id.as_str(), "a");
    }

    #[test]
    fn test_tasks_for_subjects() {
        let mut plan = create_test_week();
        plan.tasks[1].subject_id = Some(SubjectId::new("physics"));
        plan.tasks[2].subject_id = None;

        let physics = [SubjectId::new("physics")];
        let filtered = plan.tasks_for_subjects(&physics);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id.as_str(), "b");

        assert_eq!(plan.tasks_for_subjects(&[]).len(), 3);
    }

    #[test]
    fn test_task_update_apply() {
        let mut task = create_test_task("a", TaskStatus::Pending);
        let now = Timestamp::from_second(1_792_500_000).unwrap();
        let update = TaskUpdate {
            title: Some("Review notes".to_string()),
            linked_goal_id: Some(None),
            estimated_effort: Some(45),
            ..TaskUpdate::status(TaskStatus::InProgress)
        }
        .touched_at(now);

        assert!(!update.is_empty());
        update.apply_to(&mut task);

        assert_eq!(task.title, "Review notes");
        assert_eq!(task.linked_goal_id, None);
        assert_eq!(task.estimated_effort, 45);
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.updated_at, now);
    }

    #[test]
    fn test_subject_change_keeps_tag_in_step() {
        let mut task = create_test_task("a", TaskStatus::Pending);
        task.tags.insert("exam".to_string());

        TaskUpdate {
            subject_id: Some(Some(SubjectId::new("physics"))),
            ..Default::default()
        }
        .apply_to(&mut task);
        assert_eq!(task.subject_id, Some(SubjectId::new("physics")));
        assert_eq!(
            task.tags.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["exam", "physics"]
        );

        TaskUpdate {
            subject_id: Some(None),
            ..Default::default()
        }
        .apply_to(&mut task);
        assert_eq!(task.subject_id, None);
        assert_eq!(
            task.tags.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["exam"]
        );
    }

    #[test]
    fn test_empty_update_and_change_summary() {
        let touched = TaskUpdate::default().touched_at(Timestamp::UNIX_EPOCH);
        assert!(touched.is_empty());
        assert!(touched.change_summary().is_empty());

        let update = TaskUpdate {
            subject_id: Some(None),
            priority: Some(Priority::Low),
            ..TaskUpdate::status(TaskStatus::Completed)
        };
        assert_eq!(
            update.change_summary(),
            vec!["Subject cleared", "Status: completed", "Priority: low"]
        );
    }

    #[test]
    fn test_meta_update_leaves_counters() {
        let mut meta = WeekMeta {
            streak: 2,
            total_study_hours: 1.5,
            completed_tasks: 1,
            total_tasks: 4,
        };
        MetaUpdate {
            streak: Some(3),
            total_study_hours: None,
        }
        .apply_to(&mut meta);

        assert_eq!(meta.streak, 3);
        assert_eq!(meta.total_study_hours, 1.5);
        assert_eq!(meta.total_tasks, 4);
    }

    #[test]
    fn test_task_display() {
        let mut task = create_test_task("t-1", TaskStatus::Completed);
        task.tags.insert("exam".to_string());
        let output = task.to_string();

        assert!(output.starts_with("### Solve practice exercises (✓ Completed)"));
        assert!(output.contains("- ID: `t-1`"));
        assert!(output.contains("- Subject: math"));
        assert!(output.contains("- Objective: 10.3.2.1"));
        assert!(output.contains("- Effort: 1h 30m"));
        assert!(output.contains("- Priority: high"));
        assert!(output.contains("- Tags: exam"));
        assert!(!output.contains("- Tags: exam, math"));
    }

    #[test]
    fn test_week_plan_display() {
        let plan = create_test_week();
        let output = plan.to_string();

        assert!(output.starts_with("# Week of 2026-10-19"));
        assert!(output.contains("- Completed: 1/3"));
        assert!(output.contains("- Planned effort: 4h 30m (1h 30m done)"));
        assert!(output.contains("## Tasks"));
        assert_eq!(output.matches("### Solve practice exercises").count(), 3);

        let empty = WeekPlan::new(date(2026, 10, 26), Timestamp::UNIX_EPOCH);
        assert!(empty
            .to_string()
            .contains("No tasks planned for this week."));
    }

    #[test]
    fn test_week_plan_json_round_trip() {
        let plan = create_test_week();
        let json = serde_json::to_string(&plan).unwrap();
        let back: WeekPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, plan);
    }
}
