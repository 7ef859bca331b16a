//! Derivation of dated tasks from plans.

use jiff::civil::Date;

use super::recurrence::is_occurrence_day;
use crate::models::{Plan, Priority, Task};

/// Whether `plan` should produce a task for `today` given the existing
/// tasks.
///
/// A plan spawns only while active, only on its occurrence days and at
/// most once per day.
pub fn needs_task(plan: &Plan, today: Date, tasks: &[Task]) -> bool {
    plan.active
        && is_occurrence_day(plan, today)
        && !tasks.iter().any(|t| t.is_occurrence_of(plan.id, today))
}

/// Build the task `plan` spawns for `today`.
pub fn spawned_task(plan: &Plan, id: u64, today: Date) -> Task {
    Task {
        id,
        title: plan.title.clone(),
        description: spawned_description(plan),
        category: plan.category.clone(),
        completed: false,
        completed_at: None,
        important: plan.important,
        priority: Priority::Medium,
        due_date: Some(today),
        created_at: today,
        source_plan_id: Some(plan.id),
    }
}

/// The plan's description followed by its time window.
fn spawned_description(plan: &Plan) -> String {
    let window = format!("Time: {}", plan.time_window());
    if plan.description.trim().is_empty() {
        window
    } else {
        format!("{}\n{window}", plan.description)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use jiff::civil::{date, time};

    use super::*;
    use crate::models::Cycle;

    fn weekend_run() -> Plan {
        Plan {
            id: 7,
            title: "Weekend run".to_string(),
            description: "Easy pace".to_string(),
            category: "health".to_string(),
            cycle: Cycle::Weekly,
            occurrence_days: BTreeSet::from([6, 0]),
            start_time: time(20, 0, 0, 0),
            end_time: time(21, 0, 0, 0),
            lifetime_target: None,
            cycle_target: 2,
            cycle_count: 0,
            lifetime_count: 5,
            last_reset_date: date(2025, 11, 24),
            created_at: date(2025, 11, 20),
            active: true,
            important: true,
        }
    }

    #[test]
    fn test_spawned_task_copies_plan_fields() {
        let saturday = date(2025, 11, 29);
        let task = spawned_task(&weekend_run(), 3, saturday);

        assert_eq!(task.id, 3);
        assert_eq!(task.title, "Weekend run");
        assert_eq!(task.description, "Easy pace\nTime: 20:00 - 21:00");
        assert_eq!(task.category, "health");
        assert!(task.important);
        assert!(!task.completed);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.due_date, Some(saturday));
        assert_eq!(task.created_at, saturday);
        assert_eq!(task.source_plan_id, Some(7));
    }

    #[test]
    fn test_spawned_description_without_plan_description() {
        let mut plan = weekend_run();
        plan.description = String::new();
        let task = spawned_task(&plan, 1, date(2025, 11, 29));
        assert_eq!(task.description, "Time: 20:00 - 21:00");
    }

    #[test]
    fn test_needs_task_only_once_per_day() {
        let plan = weekend_run();
        let saturday = date(2025, 11, 29);
        assert!(needs_task(&plan, saturday, &[]));

        let existing = vec![spawned_task(&plan, 1, saturday)];
        assert!(!needs_task(&plan, saturday, &existing));

        // The next occurrence day is unaffected
        assert!(needs_task(&plan, date(2025, 11, 30), &existing));
    }

    #[test]
    fn test_needs_task_skips_inactive_and_off_days() {
        let mut plan = weekend_run();
        assert!(!needs_task(&plan, date(2025, 11, 26), &[]));

        plan.active = false;
        assert!(!needs_task(&plan, date(2025, 11, 29), &[]));
    }
}
