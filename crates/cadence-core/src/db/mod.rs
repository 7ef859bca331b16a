//! SQLite persistence backend.
//!
//! This module owns the rusqlite connection, schema management, and one
//! query module per collection. Query functions take a plain
//! [`Connection`] so the same code runs inside and outside a transaction.

use std::{
    path::Path,
    sync::{Mutex, MutexGuard},
};

use rusqlite::{types::Type, Connection, Row};

use crate::{
    error::{DatabaseResultExt, Result},
    models::{HistoryRecord, Plan, Settings, Task},
    persistence::Persistence,
    store::{Change, IdCounters},
};

mod counter_queries;
mod history_queries;
mod migrations;
mod plan_queries;
mod settings_queries;
mod task_queries;

pub use migrations::SCHEMA_VERSION;

/// Database connection and operations handler.
pub struct Database {
    connection: Mutex<Connection>,
}

impl Database {
    /// Opens (or creates) the database file and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        Self::with_connection(connection)
    }

    /// A private in-memory database.
    pub fn in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;
        Self::with_connection(connection)
    }

    fn with_connection(connection: Connection) -> Result<Self> {
        migrations::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.connection.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Persistence for Database {
    fn load_tasks(&self) -> Result<Vec<Task>> {
        task_queries::load_tasks(&self.lock())
    }

    fn load_plans(&self) -> Result<Vec<Plan>> {
        plan_queries::load_plans(&self.lock())
    }

    fn load_history(&self) -> Result<Vec<HistoryRecord>> {
        history_queries::load_history(&self.lock())
    }

    fn load_settings(&self) -> Result<Settings> {
        settings_queries::load_settings(&self.lock())
    }

    fn load_counters(&self) -> Result<IdCounters> {
        counter_queries::load_counters(&self.lock())
    }

    fn save_task(&self, task: &Task) -> Result<()> {
        task_queries::upsert_task(&self.lock(), task)
    }

    fn save_plan(&self, plan: &Plan) -> Result<()> {
        plan_queries::upsert_plan(&self.lock(), plan)
    }

    fn delete_task(&self, id: u64) -> Result<()> {
        task_queries::delete_task(&self.lock(), id)
    }

    fn delete_plan(&self, id: u64) -> Result<()> {
        plan_queries::delete_plan(&self.lock(), id)
    }

    fn append_history(&self, record: &HistoryRecord) -> Result<()> {
        history_queries::insert_record(&self.lock(), record)
    }

    fn save_settings(&self, settings: &Settings) -> Result<()> {
        settings_queries::save_settings(&self.lock(), settings)
    }

    fn save_counters(&self, counters: &IdCounters) -> Result<()> {
        counter_queries::save_counters(&self.lock(), counters)
    }

    /// Writes the whole batch in one transaction.
    fn apply(&self, changes: &[Change]) -> Result<()> {
        if changes.is_empty() {
            return Ok(());
        }
        let mut connection = self.lock();
        let tx = connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        for change in changes {
            match change {
                Change::SaveTask(task) => task_queries::upsert_task(&tx, task)?,
                Change::SavePlan(plan) => plan_queries::upsert_plan(&tx, plan)?,
                Change::DeleteTask(id) => task_queries::delete_task(&tx, *id)?,
                Change::DeletePlan(id) => plan_queries::delete_plan(&tx, *id)?,
                Change::AppendHistory(record) => history_queries::insert_record(&tx, record)?,
                Change::SaveSettings(settings) => settings_queries::save_settings(&tx, settings)?,
                Change::SaveCounters(counters) => counter_queries::save_counters(&tx, counters)?,
            }
        }

        tx.commit().db_context("Failed to commit transaction")?;
        log::debug!("Wrote {} change(s) to the database", changes.len());
        Ok(())
    }
}

/// Read a text column and parse it, reporting failures as conversion
/// errors on that column.
pub(crate) fn parse_column<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: std::str::FromStr,
    T::Err: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let text: String = row.get(idx)?;
    text.parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
}

/// Like [`parse_column`] for nullable columns.
pub(crate) fn parse_optional_column<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let text: Option<String> = row.get(idx)?;
    text.map(|text| {
        text.parse::<T>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
    })
    .transpose()
}
