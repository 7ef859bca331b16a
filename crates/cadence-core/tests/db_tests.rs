use std::collections::BTreeSet;

use cadence_core::{
    models::{Cycle, HistoryKind, HistoryRecord, Plan, Priority, Settings, SortBy, SubjectType, Task, Theme},
    persistence::Persistence,
    store::{Change, IdCounters},
    CadenceError, Database, JsonFiles, MemoryPersistence,
};
use jiff::{
    civil::{date, time},
    Timestamp,
};
use tempfile::{NamedTempFile, TempDir};

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn sample_plan(id: u64) -> Plan {
    Plan {
        id,
        title: "Evening walk".to_string(),
        description: "Around the park".to_string(),
        category: "health".to_string(),
        cycle: Cycle::Weekly,
        occurrence_days: BTreeSet::from([0, 6]),
        start_time: time(20, 0, 0, 0),
        end_time: time(21, 30, 0, 0),
        lifetime_target: Some(10),
        cycle_target: 2,
        cycle_count: 1,
        lifetime_count: 4,
        last_reset_date: date(2025, 11, 24),
        created_at: date(2025, 11, 1),
        active: true,
        important: true,
    }
}

fn sample_task(id: u64, source_plan_id: Option<u64>) -> Task {
    Task {
        id,
        title: format!("Task {id}"),
        description: "Line one\nLine two".to_string(),
        category: String::new(),
        completed: true,
        completed_at: Some(Timestamp::from_second(1_764_061_200).expect("valid timestamp")),
        important: false,
        priority: Priority::High,
        due_date: Some(date(2025, 11, 25)),
        created_at: date(2025, 11, 20),
        source_plan_id,
    }
}

fn sample_record(id: u64, kind: HistoryKind, subject_id: u64) -> HistoryRecord {
    HistoryRecord {
        id,
        kind,
        title: format!("Record {id}"),
        timestamp: Timestamp::from_second(1_764_061_200 + id as i64).expect("valid timestamp"),
        subject_id,
        subject_type: kind.subject_type(),
    }
}

/// Exercise the full save/load/delete contract against any backend.
fn check_backend_round_trip(backend: &dyn Persistence) {
    let plan = sample_plan(3);
    let spawned = sample_task(1, Some(3));
    let mut manual = sample_task(2, None);
    manual.completed = false;
    manual.completed_at = None;
    manual.due_date = None;
    let settings = Settings {
        show_completed: false,
        sort_by: SortBy::Priority,
        theme: Theme::Light,
        notifications: false,
        sound_enabled: true,
    };
    let counters = IdCounters {
        next_task_id: 6,
        next_plan_id: 4,
    };

    backend
        .apply(&[
            Change::SavePlan(plan.clone()),
            Change::SaveTask(spawned.clone()),
            Change::SaveTask(manual.clone()),
            Change::AppendHistory(sample_record(1, HistoryKind::PlanCreated, 3)),
            Change::AppendHistory(sample_record(2, HistoryKind::TaskCompleted, 1)),
            Change::SaveSettings(settings.clone()),
            Change::SaveCounters(counters),
        ])
        .expect("Failed to apply changes");

    let snapshot = backend.load().expect("Failed to load");
    assert_eq!(snapshot.plans, vec![plan.clone()]);
    assert_eq!(snapshot.tasks, vec![spawned.clone(), manual.clone()]);
    assert_eq!(snapshot.history.len(), 2);
    assert_eq!(snapshot.settings, settings);
    assert_eq!(snapshot.counters, counters);

    // Saving again replaces rather than duplicates
    let mut edited = plan.clone();
    edited.cycle_count = 2;
    edited.lifetime_count = 5;
    backend.save_plan(&edited).expect("Failed to save plan");
    let plans = backend.load_plans().expect("Failed to load plans");
    assert_eq!(plans, vec![edited]);
    // The spawned task survives an upsert of its plan
    assert_eq!(backend.load_tasks().expect("tasks").len(), 2);

    // Deleting the plan takes its spawned task along, history stays
    backend.delete_plan(plan.id).expect("Failed to delete plan");
    assert!(backend.load_plans().expect("plans").is_empty());
    assert_eq!(backend.load_tasks().expect("tasks"), vec![manual.clone()]);
    assert_eq!(backend.load_history().expect("history").len(), 2);

    backend.delete_task(manual.id).expect("Failed to delete task");
    assert!(backend.load_tasks().expect("tasks").is_empty());
}

#[test]
fn test_database_initialization() {
    let (temp_file, db) = create_test_db();
    assert!(temp_file.path().exists());

    let snapshot = db.load().expect("Failed to load empty database");
    assert!(snapshot.tasks.is_empty());
    assert!(snapshot.plans.is_empty());
    assert!(snapshot.history.is_empty());
    assert_eq!(snapshot.settings, Settings::default());
}

#[test]
fn test_database_round_trip() {
    let (_temp_file, db) = create_test_db();
    check_backend_round_trip(&db);
}

#[test]
fn test_json_files_round_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let files = JsonFiles::new(temp_dir.path().join("data")).expect("Failed to open directory");
    check_backend_round_trip(&files);
}

#[test]
fn test_memory_round_trip() {
    check_backend_round_trip(&MemoryPersistence::new());
}

#[test]
fn test_database_persists_across_connections() {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    {
        let db = Database::new(temp_file.path()).expect("Failed to open database");
        db.save_plan(&sample_plan(1)).expect("Failed to save plan");
        db.save_task(&sample_task(1, Some(1)))
            .expect("Failed to save task");
    }

    let db = Database::new(temp_file.path()).expect("Failed to reopen database");
    assert_eq!(db.load_plans().expect("plans"), vec![sample_plan(1)]);
    assert_eq!(db.load_tasks().expect("tasks"), vec![sample_task(1, Some(1))]);
}

#[test]
fn test_history_is_loaded_in_insertion_order() {
    let (_temp_file, db) = create_test_db();
    for id in 1..=3 {
        db.append_history(&sample_record(id, HistoryKind::TaskCreated, id))
            .expect("Failed to append history");
    }

    let history = db.load_history().expect("Failed to load history");
    let ids: Vec<u64> = history.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(history[0].subject_type, SubjectType::Task);
}

#[test]
fn test_failed_batch_leaves_database_untouched() {
    let (_temp_file, db) = create_test_db();
    let record = sample_record(1, HistoryKind::PlanCreated, 1);

    // The second insert of the same history id violates the primary key
    let result = db.apply(&[
        Change::SavePlan(sample_plan(1)),
        Change::AppendHistory(record.clone()),
        Change::AppendHistory(record),
    ]);
    assert!(matches!(result, Err(CadenceError::Database { .. })));
    assert!(result.is_err_and(|e| e.is_persistence()));

    assert!(db.load_plans().expect("plans").is_empty());
    assert!(db.load_history().expect("history").is_empty());
}

#[test]
fn test_newer_schema_version_is_rejected() {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    {
        let connection = rusqlite::Connection::open(temp_file.path()).expect("open");
        connection
            .execute_batch("PRAGMA user_version = 42")
            .expect("stamp version");
    }

    let result = Database::new(temp_file.path());
    assert!(matches!(result, Err(CadenceError::Configuration { .. })));
}

#[test]
fn test_json_files_write_pretty_documents() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let files = JsonFiles::new(temp_dir.path()).expect("Failed to open directory");
    files.save_plan(&sample_plan(1)).expect("Failed to save plan");

    let text = std::fs::read_to_string(temp_dir.path().join("plans.json")).expect("read");
    assert!(text.contains("\"title\": \"Evening walk\""));
    assert!(text.contains("\"cycle\": \"weekly\""));
    assert!(!temp_dir.path().join(".plans.json.tmp").exists());
}
