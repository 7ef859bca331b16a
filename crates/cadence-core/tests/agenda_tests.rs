mod common;

use cadence_core::{
    models::{Cycle, HistoryKind, PlanState, SortBy},
    params::{
        CreatePlan, CreateTask, Id, ListPlans, ListTasks, SetPlanActive, UpdatePlan, UpdateSettings,
        UpdateTask,
    },
    CadenceError, Clock,
};
use common::{create_test_agenda, open_agenda};
use jiff::civil::date;

fn weekend_plan() -> CreatePlan {
    CreatePlan {
        title: "Evening walk".to_string(),
        description: Some("Around the park".to_string()),
        cycle: Cycle::Weekly,
        occurrence_days: vec![6, 0],
        start_time: "20:00".to_string(),
        end_time: "21:00".to_string(),
        cycle_target: Some(2),
        lifetime_target: Some(3),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_weekly_plan_ends_at_lifetime_target() {
    // 2025-11-22 is a Saturday
    let (_temp_dir, clock, agenda) = create_test_agenda(date(2025, 11, 22)).await;
    let plan = agenda
        .create_plan(&weekend_plan())
        .await
        .expect("Failed to create plan");

    // Saturday
    let report = agenda.refresh().await.expect("Failed to refresh");
    assert_eq!(report.spawned.len(), 1);
    let saturday = &report.spawned[0];
    assert_eq!(saturday.title, "Evening walk");
    assert_eq!(saturday.description, "Around the park\nTime: 20:00 - 21:00");
    assert_eq!(saturday.source_plan_id, Some(plan.id));
    agenda
        .toggle_task_completed(&Id { id: saturday.id })
        .await
        .expect("Failed to complete task");

    // Sunday of the same week
    clock.advance_days(1).expect("advance");
    let report = agenda.refresh().await.expect("Failed to refresh");
    assert!(report.reset.is_empty());
    assert_eq!(report.spawned.len(), 1);
    agenda
        .toggle_task_completed(&Id {
            id: report.spawned[0].id,
        })
        .await
        .expect("Failed to complete task");

    let plan_now = agenda.get_plan(&Id { id: plan.id }).await.expect("plan");
    assert_eq!(plan_now.cycle_count, 2);
    assert_eq!(plan_now.lifetime_count, 2);
    assert_eq!(plan_now.state(), PlanState::CycleDone);

    // Next Saturday: new week, counter resets, third completion ends it
    clock.advance_days(6).expect("advance");
    let report = agenda.refresh().await.expect("Failed to refresh");
    assert_eq!(report.reset, vec![plan.id]);
    assert_eq!(report.spawned.len(), 1);
    agenda
        .toggle_task_completed(&Id {
            id: report.spawned[0].id,
        })
        .await
        .expect("Failed to complete task");

    let plan_now = agenda.get_plan(&Id { id: plan.id }).await.expect("plan");
    assert_eq!(plan_now.cycle_count, 1);
    assert_eq!(plan_now.lifetime_count, 3);
    assert!(!plan_now.active);
    assert_eq!(plan_now.state(), PlanState::Ended);

    // An ended plan spawns nothing
    clock.advance_days(1).expect("advance");
    let report = agenda.refresh().await.expect("Failed to refresh");
    assert!(report.spawned.is_empty());
}

#[tokio::test]
async fn test_monthly_plan_resets_in_next_month() {
    let (_temp_dir, clock, agenda) = create_test_agenda(date(2025, 10, 15)).await;
    let plan = agenda
        .create_plan(&CreatePlan {
            title: "Pay rent".to_string(),
            cycle: Cycle::Monthly,
            occurrence_days: vec![15],
            ..Default::default()
        })
        .await
        .expect("Failed to create plan");

    let report = agenda.refresh().await.expect("Failed to refresh");
    assert_eq!(report.spawned.len(), 1);
    agenda
        .complete_plan_once(&Id { id: plan.id })
        .await
        .expect("Failed to complete plan");

    clock.advance_days(31).expect("advance");
    assert_eq!(clock.today(), date(2025, 11, 15));

    let plans = agenda
        .refresh_plans(date(2025, 11, 15))
        .await
        .expect("Failed to refresh");
    let refreshed = plans.iter().find(|p| p.id == plan.id).expect("plan");
    assert_eq!(refreshed.cycle_count, 0);
    assert_eq!(refreshed.lifetime_count, 1);
    assert_eq!(refreshed.last_reset_date, date(2025, 11, 15));

    let tasks = agenda.list_tasks(&ListTasks::default()).await;
    assert_eq!(tasks.len(), 2);
}

#[tokio::test]
async fn test_end_permanently_freezes_lifetime() {
    let (_temp_dir, _clock, agenda) = create_test_agenda(date(2025, 11, 25)).await;
    let plan = agenda
        .create_plan(&CreatePlan {
            title: "Meditate".to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to create plan");

    for _ in 0..7 {
        agenda
            .complete_plan_once(&Id { id: plan.id })
            .await
            .expect("Failed to complete plan");
    }

    let ended = agenda
        .end_plan_permanently(&Id { id: plan.id })
        .await
        .expect("Failed to end plan");
    assert_eq!(ended.lifetime_target, Some(7));
    assert_eq!(ended.lifetime_count, 7);
    assert!(!ended.active);
    assert_eq!(ended.state(), PlanState::Ended);

    let history = agenda.list_history(Some(1)).await;
    assert_eq!(history[0].kind, HistoryKind::PlanCompleted);
    assert_eq!(history[0].title, "Meditate (ended)");

    let result = agenda.complete_plan_once(&Id { id: plan.id }).await;
    assert!(matches!(result, Err(CadenceError::InvalidState { .. })));

    let result = agenda
        .set_plan_active(&SetPlanActive {
            id: plan.id,
            active: true,
        })
        .await;
    assert!(matches!(result, Err(CadenceError::InvalidState { .. })));

    let result = agenda.end_plan_permanently(&Id { id: plan.id }).await;
    assert!(matches!(result, Err(CadenceError::InvalidState { .. })));
}

#[tokio::test]
async fn test_delete_plan_removes_spawned_tasks_and_keeps_history() {
    let (temp_dir, clock, agenda) = create_test_agenda(date(2025, 11, 25)).await;
    let plan = agenda
        .create_plan(&CreatePlan {
            title: "Stretch".to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to create plan");
    let manual = agenda
        .create_task(&CreateTask {
            title: "Buy a mat".to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to create task");

    let first = agenda.refresh().await.expect("Failed to refresh");
    clock.advance_days(1).expect("advance");
    agenda.refresh().await.expect("Failed to refresh");
    agenda
        .toggle_task_completed(&Id {
            id: first.spawned[0].id,
        })
        .await
        .expect("Failed to complete task");
    let history_before = agenda.list_history(None).await;

    let deleted = agenda
        .delete_plan(&Id { id: plan.id })
        .await
        .expect("Failed to delete plan");
    assert_eq!(deleted.removed_tasks, 2);

    let tasks = agenda.list_tasks(&ListTasks::default()).await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, manual.id);
    assert_eq!(agenda.list_history(None).await, history_before);

    // The database agrees after reopening
    drop(agenda);
    let reopened = open_agenda(&temp_dir.path().join("test.db"), clock).await;
    assert_eq!(reopened.list_tasks(&ListTasks::default()).await.len(), 1);
    assert!(reopened.list_plans(&ListPlans::default()).await.is_empty());
    assert_eq!(reopened.list_history(None).await, history_before);
    assert!(matches!(
        reopened.get_plan(&Id { id: plan.id }).await,
        Err(CadenceError::PlanNotFound { .. })
    ));
}

#[tokio::test]
async fn test_state_survives_reopen() {
    let (temp_dir, clock, agenda) = create_test_agenda(date(2025, 11, 22)).await;
    let plan = agenda
        .create_plan(&weekend_plan())
        .await
        .expect("Failed to create plan");
    let task = agenda
        .create_task(&CreateTask {
            title: "Renew passport".to_string(),
            category: Some("admin".to_string()),
            important: true,
            due_date: Some("2025-12-01".to_string()),
            ..Default::default()
        })
        .await
        .expect("Failed to create task");
    let report = agenda.refresh().await.expect("Failed to refresh");
    agenda
        .toggle_task_completed(&Id {
            id: report.spawned[0].id,
        })
        .await
        .expect("Failed to complete task");
    agenda
        .update_settings(&UpdateSettings {
            sort_by: Some(SortBy::Name),
            show_completed: Some(false),
            ..Default::default()
        })
        .await
        .expect("Failed to update settings");

    let plan_before = agenda.get_plan(&Id { id: plan.id }).await.expect("plan");
    let history_before = agenda.list_history(None).await;
    drop(agenda);

    let reopened = open_agenda(&temp_dir.path().join("test.db"), clock).await;
    assert_eq!(
        reopened.get_task(&Id { id: task.id }).await.expect("task"),
        task
    );
    assert_eq!(
        reopened.get_plan(&Id { id: plan.id }).await.expect("plan"),
        plan_before
    );
    assert_eq!(reopened.list_history(None).await, history_before);

    let settings = reopened.settings().await;
    assert_eq!(settings.sort_by, SortBy::Name);
    assert!(!settings.show_completed);

    // Completed spawned task is hidden by the stored preference
    let visible = reopened.list_tasks(&ListTasks::default()).await;
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, task.id);

    // Refreshing the same day again spawns nothing new
    let report = reopened.refresh().await.expect("Failed to refresh");
    assert!(report.spawned.is_empty());

    // New ids continue after the stored ones
    let next = reopened
        .create_task(&CreateTask {
            title: "Water plants".to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to create task");
    assert!(next.id > task.id);
}

#[tokio::test]
async fn test_validation_errors() {
    let (_temp_dir, _clock, agenda) = create_test_agenda(date(2025, 11, 25)).await;

    let result = agenda
        .create_task(&CreateTask {
            title: "  ".to_string(),
            ..Default::default()
        })
        .await;
    assert!(matches!(result, Err(CadenceError::InvalidInput { .. })));

    let result = agenda
        .create_plan(&CreatePlan {
            title: "Gym".to_string(),
            cycle: Cycle::Weekly,
            occurrence_days: vec![7],
            ..Default::default()
        })
        .await;
    assert!(matches!(
        result,
        Err(CadenceError::InvalidInput { ref field, .. }) if field == "occurrence_days"
    ));

    let result = agenda
        .create_plan(&CreatePlan {
            title: "Gym".to_string(),
            start_time: "9am".to_string(),
            ..Default::default()
        })
        .await;
    assert!(matches!(
        result,
        Err(CadenceError::InvalidInput { ref field, .. }) if field == "start_time"
    ));

    let result = agenda
        .update_task(&UpdateTask {
            id: 42,
            title: Some("Ghost".to_string()),
            ..Default::default()
        })
        .await;
    assert!(matches!(result, Err(CadenceError::TaskNotFound { id: 42 })));

    // Nothing was stored by the failed calls
    assert!(agenda.list_plans(&ListPlans::default()).await.is_empty());
    assert!(agenda.list_history(None).await.is_empty());
}

#[tokio::test]
async fn test_lowering_lifetime_target_ends_active_plan() {
    let (_temp_dir, _clock, agenda) = create_test_agenda(date(2025, 11, 25)).await;
    let plan = agenda
        .create_plan(&CreatePlan {
            title: "Read".to_string(),
            lifetime_target: Some(10),
            ..Default::default()
        })
        .await
        .expect("Failed to create plan");
    for _ in 0..2 {
        agenda
            .complete_plan_once(&Id { id: plan.id })
            .await
            .expect("Failed to complete plan");
    }

    let updated = agenda
        .update_plan(&UpdatePlan {
            id: plan.id,
            lifetime_target: Some(2),
            ..Default::default()
        })
        .await
        .expect("Failed to update plan");
    assert_eq!(updated.state(), PlanState::Ended);

    let result = agenda
        .update_plan(&UpdatePlan {
            id: plan.id,
            lifetime_target: Some(5),
            ..Default::default()
        })
        .await;
    assert!(matches!(result, Err(CadenceError::InvalidState { .. })));

    let board = agenda.plan_board().await;
    assert_eq!(board.ended.len(), 1);
    assert!(board.in_cycle.is_empty());
}

#[tokio::test]
async fn test_history_by_day_groups_newest_first() {
    let (_temp_dir, clock, agenda) = create_test_agenda(date(2025, 11, 24)).await;
    agenda
        .create_task(&CreateTask {
            title: "Monday task".to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to create task");
    clock.advance_days(1).expect("advance");
    let task = agenda
        .create_task(&CreateTask {
            title: "Tuesday task".to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to create task");
    agenda
        .toggle_task_completed(&Id { id: task.id })
        .await
        .expect("Failed to complete task");

    let days = agenda.history_by_day().await;
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].date, date(2025, 11, 25));
    assert_eq!(days[0].records.len(), 2);
    assert_eq!(days[0].records[0].kind, HistoryKind::TaskCompleted);
    assert_eq!(days[1].date, date(2025, 11, 24));
    assert_eq!(days[1].records[0].title, "Monday task");
}
