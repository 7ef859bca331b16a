//! Load/save contract between the store and a storage backend.
//!
//! Three backends implement [`Persistence`]:
//!
//! - [`Database`](crate::db::Database): SQLite through rusqlite
//! - [`JsonFiles`]: one JSON document per collection in a directory
//! - [`MemoryPersistence`]: an in-process snapshot
//!
//! Backends are synchronous. The [`Agenda`](crate::Agenda) calls them from
//! tokio's blocking pool.

use crate::{
    error::Result,
    models::{HistoryRecord, Plan, Settings, Task},
    store::{Change, IdCounters, Snapshot},
};

mod json;
mod memory;

pub use json::JsonFiles;
pub use memory::MemoryPersistence;

/// Storage operations the store relies on.
pub trait Persistence: Send + Sync {
    fn load_tasks(&self) -> Result<Vec<Task>>;
    fn load_plans(&self) -> Result<Vec<Plan>>;
    fn load_history(&self) -> Result<Vec<HistoryRecord>>;
    fn load_settings(&self) -> Result<Settings>;
    fn load_counters(&self) -> Result<IdCounters>;

    /// Insert or replace a task.
    fn save_task(&self, task: &Task) -> Result<()>;
    /// Insert or replace a plan.
    fn save_plan(&self, plan: &Plan) -> Result<()>;
    fn delete_task(&self, id: u64) -> Result<()>;
    /// Delete a plan and every task it spawned.
    fn delete_plan(&self, id: u64) -> Result<()>;
    fn append_history(&self, record: &HistoryRecord) -> Result<()>;
    fn save_settings(&self, settings: &Settings) -> Result<()>;
    fn save_counters(&self, counters: &IdCounters) -> Result<()>;

    /// Load every collection.
    fn load(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            tasks: self.load_tasks()?,
            plans: self.load_plans()?,
            history: self.load_history()?,
            settings: self.load_settings()?,
            counters: self.load_counters()?,
        })
    }

    /// Replay a batch of changes in order, stopping at the first failure.
    fn apply(&self, changes: &[Change]) -> Result<()> {
        for change in changes {
            match change {
                Change::SaveTask(task) => self.save_task(task)?,
                Change::SavePlan(plan) => self.save_plan(plan)?,
                Change::DeleteTask(id) => self.delete_task(*id)?,
                Change::DeletePlan(id) => self.delete_plan(*id)?,
                Change::AppendHistory(record) => self.append_history(record)?,
                Change::SaveSettings(settings) => self.save_settings(settings)?,
                Change::SaveCounters(counters) => self.save_counters(counters)?,
            }
        }
        Ok(())
    }
}
