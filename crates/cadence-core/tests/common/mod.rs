use std::{path::Path, sync::Arc};

use cadence_core::{Agenda, AgendaBuilder, FixedClock};
use jiff::civil::Date;
use tempfile::TempDir;

/// Helper function to pin a clock to a calendar day
pub fn clock_on(day: Date) -> Arc<FixedClock> {
    Arc::new(FixedClock::on_date(day).expect("Failed to pin clock"))
}

/// Helper function to open an agenda on an existing database file
pub async fn open_agenda(db_path: &Path, clock: Arc<FixedClock>) -> Agenda {
    AgendaBuilder::new()
        .with_database_path(Some(db_path))
        .with_shared_clock(clock)
        .build()
        .await
        .expect("Failed to create agenda")
}

/// Helper function to create a test agenda backed by SQLite in a temp dir
pub async fn create_test_agenda(day: Date) -> (TempDir, Arc<FixedClock>, Agenda) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let clock = clock_on(day);
    let agenda = open_agenda(&db_path, clock.clone()).await;
    (temp_dir, clock, agenda)
}
