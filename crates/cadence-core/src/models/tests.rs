#[cfg(test)]
mod model_tests {
    use std::collections::BTreeSet;

    use jiff::civil::{date, time};

    use crate::{
        models::{
            Cycle, HistoryKind, Overview, Plan, PlanBoard, PlanFilter, PlanState, Priority,
            Settings, SortBy, SubjectType, Task, TaskFilter, Theme, Urgency,
        },
        params::{ListPlans, ListTasks},
    };

    fn create_test_task(id: u64, title: &str) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: String::new(),
            category: String::new(),
            completed: false,
            completed_at: None,
            important: false,
            priority: Priority::Medium,
            due_date: None,
            created_at: date(2025, 11, 1),
            source_plan_id: None,
        }
    }

    fn create_test_plan(active: bool, cycle_count: u32, lifetime_count: u32) -> Plan {
        Plan {
            id: 7,
            title: "Evening walk".to_string(),
            description: "Around the park".to_string(),
            category: "health".to_string(),
            cycle: Cycle::Weekly,
            occurrence_days: BTreeSet::from([0, 6]),
            start_time: time(20, 0, 0, 0),
            end_time: time(21, 0, 0, 0),
            lifetime_target: Some(3),
            cycle_target: 2,
            cycle_count,
            lifetime_count,
            last_reset_date: date(2025, 11, 23),
            created_at: date(2025, 11, 20),
            active,
            important: false,
        }
    }

    #[test]
    fn test_plan_state_derivation() {
        assert_eq!(create_test_plan(true, 0, 0).state(), PlanState::InCycle);
        assert_eq!(create_test_plan(true, 2, 2).state(), PlanState::CycleDone);
        assert_eq!(create_test_plan(false, 1, 1).state(), PlanState::Paused);
        assert_eq!(create_test_plan(false, 1, 3).state(), PlanState::Ended);

        // An active plan at its lifetime target is not ended yet
        assert_eq!(create_test_plan(true, 1, 3).state(), PlanState::InCycle);

        let mut unlimited = create_test_plan(false, 0, 50);
        unlimited.lifetime_target = None;
        assert_eq!(unlimited.state(), PlanState::Paused);
        assert_eq!(unlimited.remaining(), None);
    }

    #[test]
    fn test_plan_remaining_saturates() {
        assert_eq!(create_test_plan(true, 0, 1).remaining(), Some(2));
        assert_eq!(create_test_plan(false, 0, 5).remaining(), Some(0));
    }

    #[test]
    fn test_plan_time_window_and_search() {
        let plan = create_test_plan(true, 0, 0);
        assert_eq!(plan.time_window(), "20:00 - 21:00");
        assert!(plan.matches("PARK"));
        assert!(plan.matches("walk"));
        assert!(!plan.matches("swim"));
    }

    #[test]
    fn test_task_occurrence_match() {
        let mut task = create_test_task(1, "Evening walk");
        task.source_plan_id = Some(7);
        task.due_date = Some(date(2025, 11, 29));

        assert!(task.is_occurrence_of(7, date(2025, 11, 29)));
        assert!(!task.is_occurrence_of(7, date(2025, 11, 30)));
        assert!(!task.is_occurrence_of(8, date(2025, 11, 29)));
    }

    #[test]
    fn test_urgency_classification() {
        let today = date(2025, 11, 25);
        assert_eq!(Urgency::for_due_date(None, today), Urgency::None);
        assert_eq!(
            Urgency::for_due_date(Some(date(2025, 11, 24)), today),
            Urgency::Overdue
        );
        assert_eq!(Urgency::for_due_date(Some(today), today), Urgency::DueToday);
        assert_eq!(
            Urgency::for_due_date(Some(date(2025, 11, 27)), today),
            Urgency::Soon
        );
        assert_eq!(
            Urgency::for_due_date(Some(date(2025, 11, 28)), today),
            Urgency::Normal
        );
        assert_eq!(Urgency::Normal.label(), "");
    }

    #[test]
    fn test_task_filter_sorting() {
        let mut a = create_test_task(1, "banana");
        a.priority = Priority::Low;
        a.due_date = Some(date(2025, 12, 1));
        let mut b = create_test_task(2, "Apple");
        b.priority = Priority::High;
        let mut c = create_test_task(3, "cherry");
        c.due_date = Some(date(2025, 11, 26));

        let ids = |filter: TaskFilter| {
            let mut tasks = vec![a.clone(), b.clone(), c.clone()];
            filter.sort(&mut tasks);
            tasks.iter().map(|t| t.id).collect::<Vec<_>>()
        };

        let by = |sort_by| TaskFilter {
            sort_by,
            ..Default::default()
        };
        assert_eq!(ids(by(SortBy::Date)), vec![3, 1, 2]);
        assert_eq!(ids(by(SortBy::Priority)), vec![2, 3, 1]);
        assert_eq!(ids(by(SortBy::Name)), vec![2, 1, 3]);
    }

    #[test]
    fn test_task_filter_respects_show_completed_setting() {
        let mut done = create_test_task(1, "Done");
        done.completed = true;
        let open = create_test_task(2, "Open");

        let hidden = Settings {
            show_completed: false,
            ..Default::default()
        };
        let filter = TaskFilter::from((&ListTasks::default(), &hidden));
        assert!(!filter.accepts(&done));
        assert!(filter.accepts(&open));

        // An explicit request wins over the preference
        let explicit = ListTasks {
            completed: Some(true),
            ..Default::default()
        };
        let filter = TaskFilter::from((&explicit, &hidden));
        assert!(filter.accepts(&done));
        assert!(!filter.accepts(&open));

        let filter = TaskFilter::from((&ListTasks::default(), &Settings::default()));
        assert!(filter.accepts(&done));
    }

    #[test]
    fn test_task_filter_search_and_important() {
        let mut task = create_test_task(1, "Pay rent");
        task.description = "Landlord wants it by the 1st".to_string();

        let filter = TaskFilter {
            search: Some("landlord".to_string()),
            ..Default::default()
        };
        assert!(filter.accepts(&task));

        let filter = TaskFilter {
            important_only: true,
            ..Default::default()
        };
        assert!(!filter.accepts(&task));
    }

    #[test]
    fn test_plan_filter_by_state() {
        let filter = PlanFilter::from(&ListPlans {
            state: Some(PlanState::Paused),
            ..Default::default()
        });
        assert!(filter.accepts(&create_test_plan(false, 0, 1)));
        assert!(!filter.accepts(&create_test_plan(true, 0, 1)));
        assert!(!filter.accepts(&create_test_plan(false, 0, 3)));
    }

    #[test]
    fn test_plan_board_buckets() {
        let board: PlanBoard = vec![
            create_test_plan(true, 0, 0),
            create_test_plan(true, 2, 2),
            create_test_plan(false, 0, 1),
            create_test_plan(false, 0, 3),
            create_test_plan(true, 1, 1),
        ]
        .into_iter()
        .collect();

        assert_eq!(board.in_cycle.len(), 2);
        assert_eq!(board.cycle_done.len(), 1);
        assert_eq!(board.paused.len(), 1);
        assert_eq!(board.ended.len(), 1);
        assert!(!board.is_empty());
    }

    #[test]
    fn test_overview_counts() {
        let today = date(2025, 11, 25);
        let mut overdue = create_test_task(1, "Overdue");
        overdue.due_date = Some(date(2025, 11, 20));
        overdue.important = true;
        let mut done = create_test_task(2, "Done");
        done.completed = true;
        done.due_date = Some(date(2025, 11, 20));
        let open = create_test_task(3, "Open");

        let mut starred_plan = create_test_plan(true, 0, 0);
        starred_plan.important = true;
        let paused_plan = create_test_plan(false, 0, 0);

        let overview = Overview::compute(&[overdue, done, open], &[starred_plan, paused_plan], today);
        assert_eq!(
            overview,
            Overview {
                open: 3,
                important: 2,
                completed: 1,
                overdue: 1,
            }
        );
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("HIGH".parse::<Priority>(), Ok(Priority::High));
        assert_eq!("monthly".parse::<Cycle>(), Ok(Cycle::Monthly));
        assert_eq!("active".parse::<PlanState>(), Ok(PlanState::InCycle));
        assert_eq!("cycle_done".parse::<PlanState>(), Ok(PlanState::CycleDone));
        assert_eq!("name".parse::<SortBy>(), Ok(SortBy::Name));
        assert_eq!("system".parse::<Theme>(), Ok(Theme::System));
        assert!("urgent".parse::<Priority>().is_err());
        assert!("yearly".parse::<Cycle>().is_err());
    }

    #[test]
    fn test_history_kind_subjects() {
        assert_eq!(HistoryKind::TaskCompleted.subject_type(), SubjectType::Task);
        assert_eq!(HistoryKind::PlanCreated.subject_type(), SubjectType::Plan);
        assert_eq!(
            "plan_completed".parse::<HistoryKind>(),
            Ok(HistoryKind::PlanCompleted)
        );
    }

    #[test]
    fn test_settings_defaults_fill_missing_fields() {
        let settings: Settings =
            serde_json::from_str(r#"{"sort_by":"priority"}"#).expect("partial settings");
        assert_eq!(settings.sort_by, SortBy::Priority);
        assert!(settings.show_completed);
        assert_eq!(settings.theme, Theme::Dark);
    }
}
