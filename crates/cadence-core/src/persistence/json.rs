//! JSON document backend.
//!
//! A directory holds `tasks.json`, `plans.json`, `history.json`,
//! `settings.json` and `counters.json`. Missing files load as empty collections or default
//! settings. Every write goes to a temporary file first and is renamed into
//! place.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use serde::{de::DeserializeOwned, Serialize};

use super::{MemoryPersistence, Persistence};
use crate::{
    error::{IoResultExt, Result},
    models::{HistoryRecord, Plan, Settings, Task},
    store::{Change, IdCounters, Snapshot},
};

const TASKS_FILE: &str = "tasks.json";
const PLANS_FILE: &str = "plans.json";
const HISTORY_FILE: &str = "history.json";
const SETTINGS_FILE: &str = "settings.json";
const COUNTERS_FILE: &str = "counters.json";

/// Stores each collection as a pretty-printed JSON document.
#[derive(Debug)]
pub struct JsonFiles {
    dir: PathBuf,
    // Serializes read-modify-write cycles
    write_lock: Mutex<()>,
}

impl JsonFiles {
    /// Opens `dir`, creating it when needed.
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).fs_context(&dir)?;
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn read<T: DeserializeOwned + Default>(&self, name: &str) -> Result<T> {
        let path = self.dir.join(name);
        if !path.exists() {
            return Ok(T::default());
        }
        let text = fs::read_to_string(&path).fs_context(&path)?;
        if text.trim().is_empty() {
            return Ok(T::default());
        }
        Ok(serde_json::from_str(&text)?)
    }

    fn write<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.dir.join(name);
        let tmp = self.dir.join(format!(".{name}.tmp"));
        let text = serde_json::to_string_pretty(value)?;
        fs::write(&tmp, text).fs_context(&tmp)?;
        fs::rename(&tmp, &path).fs_context(&path)?;
        Ok(())
    }

    /// Read one collection, let `edit` change it and write it back.
    fn modify<T, F>(&self, name: &str, edit: F) -> Result<()>
    where
        T: Serialize + DeserializeOwned + Default,
        F: FnOnce(&mut T),
    {
        let _guard = self.guard();
        let mut value: T = self.read(name)?;
        edit(&mut value);
        self.write(name, &value)
    }

    fn write_snapshot(&self, snapshot: &Snapshot, changes: &[Change]) -> Result<()> {
        let touches = |pred: fn(&Change) -> bool| changes.iter().any(pred);
        if touches(|c| {
            matches!(
                c,
                Change::SaveTask(_) | Change::DeleteTask(_) | Change::DeletePlan(_)
            )
        }) {
            self.write(TASKS_FILE, &snapshot.tasks)?;
        }
        if touches(|c| matches!(c, Change::SavePlan(_) | Change::DeletePlan(_))) {
            self.write(PLANS_FILE, &snapshot.plans)?;
        }
        if touches(|c| matches!(c, Change::AppendHistory(_))) {
            self.write(HISTORY_FILE, &snapshot.history)?;
        }
        if touches(|c| matches!(c, Change::SaveSettings(_))) {
            self.write(SETTINGS_FILE, &snapshot.settings)?;
        }
        if touches(|c| matches!(c, Change::SaveCounters(_))) {
            self.write(COUNTERS_FILE, &snapshot.counters)?;
        }
        Ok(())
    }
}

impl Persistence for JsonFiles {
    fn load_tasks(&self) -> Result<Vec<Task>> {
        self.read(TASKS_FILE)
    }

    fn load_plans(&self) -> Result<Vec<Plan>> {
        self.read(PLANS_FILE)
    }

    fn load_history(&self) -> Result<Vec<HistoryRecord>> {
        self.read(HISTORY_FILE)
    }

    fn load_settings(&self) -> Result<Settings> {
        self.read(SETTINGS_FILE)
    }

    fn load_counters(&self) -> Result<IdCounters> {
        self.read(COUNTERS_FILE)
    }

    fn save_task(&self, task: &Task) -> Result<()> {
        self.modify(TASKS_FILE, |tasks: &mut Vec<Task>| {
            match tasks.iter_mut().find(|t| t.id == task.id) {
                Some(slot) => *slot = task.clone(),
                None => tasks.push(task.clone()),
            }
        })
    }

    fn save_plan(&self, plan: &Plan) -> Result<()> {
        self.modify(PLANS_FILE, |plans: &mut Vec<Plan>| {
            match plans.iter_mut().find(|p| p.id == plan.id) {
                Some(slot) => *slot = plan.clone(),
                None => plans.push(plan.clone()),
            }
        })
    }

    fn delete_task(&self, id: u64) -> Result<()> {
        self.modify(TASKS_FILE, |tasks: &mut Vec<Task>| {
            tasks.retain(|t| t.id != id);
        })
    }

    fn delete_plan(&self, id: u64) -> Result<()> {
        self.modify(PLANS_FILE, |plans: &mut Vec<Plan>| {
            plans.retain(|p| p.id != id);
        })?;
        self.modify(TASKS_FILE, |tasks: &mut Vec<Task>| {
            tasks.retain(|t| t.source_plan_id != Some(id));
        })
    }

    fn append_history(&self, record: &HistoryRecord) -> Result<()> {
        self.modify(HISTORY_FILE, |history: &mut Vec<HistoryRecord>| {
            history.push(record.clone());
        })
    }

    fn save_settings(&self, settings: &Settings) -> Result<()> {
        let _guard = self.guard();
        self.write(SETTINGS_FILE, settings)
    }

    fn save_counters(&self, counters: &IdCounters) -> Result<()> {
        let _guard = self.guard();
        self.write(COUNTERS_FILE, counters)
    }

    /// Applies the whole batch in memory and rewrites each touched file
    /// once.
    fn apply(&self, changes: &[Change]) -> Result<()> {
        if changes.is_empty() {
            return Ok(());
        }
        let _guard = self.guard();
        let staged = MemoryPersistence::with_snapshot(self.load()?);
        staged.apply(changes)?;
        self.write_snapshot(&staged.snapshot(), changes)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use tempfile::TempDir;

    use super::*;
    use crate::models::Priority;

    fn task(id: u64, plan: Option<u64>) -> Task {
        Task {
            id,
            title: format!("Task {id}"),
            description: String::new(),
            category: String::new(),
            completed: false,
            completed_at: None,
            important: false,
            priority: Priority::Medium,
            due_date: Some(date(2025, 11, 25)),
            created_at: date(2025, 11, 25),
            source_plan_id: plan,
        }
    }

    #[test]
    fn test_missing_files_load_as_empty() {
        let dir = TempDir::new().expect("temp dir");
        let files = JsonFiles::new(dir.path().join("data")).expect("open");
        let snapshot = files.load().expect("load");
        assert!(snapshot.tasks.is_empty());
        assert_eq!(snapshot.settings, Settings::default());
    }

    #[test]
    fn test_apply_writes_each_touched_file() {
        let dir = TempDir::new().expect("temp dir");
        let files = JsonFiles::new(dir.path()).expect("open");

        files
            .apply(&[
                Change::SaveTask(task(1, None)),
                Change::SaveTask(task(2, Some(5))),
                Change::SaveTask(task(1, None)),
            ])
            .expect("apply");
        assert_eq!(files.load_tasks().expect("load").len(), 2);
        assert!(dir.path().join(TASKS_FILE).exists());
        assert!(!dir.path().join(PLANS_FILE).exists());
        assert!(!dir.path().join(format!(".{TASKS_FILE}.tmp")).exists());

        files.delete_plan(5).expect("delete");
        let tasks = files.load_tasks().expect("load");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, 1);
    }

    #[test]
    fn test_corrupt_file_is_a_serialization_error() {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join(PLANS_FILE), "{ not json").expect("write");
        let files = JsonFiles::new(dir.path()).expect("open");
        let err = files.load_plans().expect_err("corrupt");
        assert!(err.is_persistence());
    }
}
