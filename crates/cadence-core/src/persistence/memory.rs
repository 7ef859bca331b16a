//! Process-local backend.

use std::sync::{Mutex, MutexGuard};

use super::Persistence;
use crate::{
    error::Result,
    models::{HistoryRecord, Plan, Settings, Task},
    store::{IdCounters, Snapshot},
};

/// Keeps everything in memory. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    data: Mutex<Snapshot>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from existing data.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            data: Mutex::new(snapshot),
        }
    }

    /// A copy of what has been written so far.
    pub fn snapshot(&self) -> Snapshot {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Snapshot> {
        self.data.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn upsert<T: Clone>(items: &mut Vec<T>, item: &T, same: impl Fn(&T) -> bool) {
    match items.iter_mut().find(|existing| same(existing)) {
        Some(slot) => *slot = item.clone(),
        None => items.push(item.clone()),
    }
}

impl Persistence for MemoryPersistence {
    fn load_tasks(&self) -> Result<Vec<Task>> {
        Ok(self.lock().tasks.clone())
    }

    fn load_plans(&self) -> Result<Vec<Plan>> {
        Ok(self.lock().plans.clone())
    }

    fn load_history(&self) -> Result<Vec<HistoryRecord>> {
        Ok(self.lock().history.clone())
    }

    fn load_settings(&self) -> Result<Settings> {
        Ok(self.lock().settings.clone())
    }

    fn load_counters(&self) -> Result<IdCounters> {
        Ok(self.lock().counters)
    }

    fn save_task(&self, task: &Task) -> Result<()> {
        upsert(&mut self.lock().tasks, task, |t| t.id == task.id);
        Ok(())
    }

    fn save_plan(&self, plan: &Plan) -> Result<()> {
        upsert(&mut self.lock().plans, plan, |p| p.id == plan.id);
        Ok(())
    }

    fn delete_task(&self, id: u64) -> Result<()> {
        self.lock().tasks.retain(|t| t.id != id);
        Ok(())
    }

    fn delete_plan(&self, id: u64) -> Result<()> {
        let mut data = self.lock();
        data.plans.retain(|p| p.id != id);
        data.tasks.retain(|t| t.source_plan_id != Some(id));
        Ok(())
    }

    fn append_history(&self, record: &HistoryRecord) -> Result<()> {
        self.lock().history.push(record.clone());
        Ok(())
    }

    fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.lock().settings = settings.clone();
        Ok(())
    }

    fn save_counters(&self, counters: &IdCounters) -> Result<()> {
        self.lock().counters = *counters;
        Ok(())
    }
}
