//! In-memory collections of tasks, plans, history and settings.
//!
//! The [`Store`] is the source of truth while the process runs. Every
//! mutation updates memory first and then queues a [`Change`] describing
//! what a persistence backend has to write. The owner drains the queue
//! with [`Store::take_changes`] and hands it to
//! [`Persistence::apply`](crate::persistence::Persistence::apply).

use std::sync::Arc;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    clock::Clock,
    engine::Event,
    models::{HistoryRecord, Plan, Settings, SubjectType, Task},
};

mod plans;
mod queries;
mod tasks;


pub use plans::{DeletedPlan, RefreshReport};

/// One write a persistence backend has to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    SaveTask(Task),
    SavePlan(Plan),
    DeleteTask(u64),
    /// Deleting a plan also deletes the tasks it spawned
    DeletePlan(u64),
    AppendHistory(HistoryRecord),
    SaveSettings(Settings),
    SaveCounters(IdCounters),
}

impl Change {
    /// Short name of the write, for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Change::SaveTask(_) => "save_task",
            Change::SavePlan(_) => "save_plan",
            Change::DeleteTask(_) => "delete_task",
            Change::DeletePlan(_) => "delete_plan",
            Change::AppendHistory(_) => "append_history",
            Change::SaveSettings(_) => "save_settings",
            Change::SaveCounters(_) => "save_counters",
        }
    }
}

/// Next ids to hand out. Kept on disk so ids of deleted tasks and plans
/// are never issued again. Zero means nothing was saved yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdCounters {
    pub next_task_id: u64,
    pub next_plan_id: u64,
}

/// Everything a backend loads at startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub tasks: Vec<Task>,
    pub plans: Vec<Plan>,
    pub history: Vec<HistoryRecord>,
    pub settings: Settings,
    pub counters: IdCounters,
}

/// Owner of all collections.
pub struct Store {
    tasks: Vec<Task>,
    plans: Vec<Plan>,
    history: Vec<HistoryRecord>,
    settings: Settings,
    next_task_id: u64,
    next_plan_id: u64,
    next_history_id: u64,
    pending: Vec<Change>,
    clock: Arc<dyn Clock>,
}

impl Store {
    /// Creates a store from loaded data. Id counters continue after the
    /// highest id seen in the saved counters, the loaded collections and
    /// the subjects of the loaded history.
    pub fn new(snapshot: Snapshot, clock: Arc<dyn Clock>) -> Self {
        let Snapshot {
            tasks,
            plans,
            history,
            settings,
            counters,
        } = snapshot;
        let next_task_id = next_id(
            tasks
                .iter()
                .map(|t| t.id)
                .chain(subject_ids(&history, SubjectType::Task)),
        )
        .max(counters.next_task_id);
        let next_plan_id = next_id(
            plans
                .iter()
                .map(|p| p.id)
                .chain(subject_ids(&history, SubjectType::Plan)),
        )
        .max(counters.next_plan_id);
        let next_history_id = next_id(history.iter().map(|h| h.id));
        Self {
            tasks,
            plans,
            history,
            settings,
            next_task_id,
            next_plan_id,
            next_history_id,
            pending: Vec::new(),
            clock,
        }
    }

    /// An empty store.
    pub fn empty(clock: Arc<dyn Clock>) -> Self {
        Self::new(Snapshot::default(), clock)
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Drains the queued changes in the order they were made.
    pub fn take_changes(&mut self) -> Vec<Change> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.pending.is_empty()
    }

    /// A copy of every collection, for exports and tests.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tasks: self.tasks.clone(),
            plans: self.plans.clone(),
            history: self.history.clone(),
            settings: self.settings.clone(),
            counters: self.counters(),
        }
    }

    pub fn counters(&self) -> IdCounters {
        IdCounters {
            next_task_id: self.next_task_id,
            next_plan_id: self.next_plan_id,
        }
    }

    fn now(&self) -> Timestamp {
        self.clock.now()
    }

    fn allocate_task_id(&mut self) -> u64 {
        let id = self.next_task_id;
        self.next_task_id += 1;
        id
    }

    fn allocate_plan_id(&mut self) -> u64 {
        let id = self.next_plan_id;
        self.next_plan_id += 1;
        id
    }

    /// Append a history record for `event` and queue it.
    fn record(&mut self, event: Event) -> HistoryRecord {
        let id = self.next_history_id;
        self.next_history_id += 1;
        let record = event.into_record(id, self.now());
        self.history.push(record.clone());
        self.pending.push(Change::AppendHistory(record.clone()));
        record
    }

    fn queue(&mut self, change: Change) {
        self.pending.push(change);
    }

    /// Queue the counters after a delete so the freed ids stay used.
    fn queue_counters(&mut self) {
        let counters = self.counters();
        self.pending.push(Change::SaveCounters(counters));
    }
}

fn subject_ids(
    history: &[HistoryRecord],
    kind: SubjectType,
) -> impl Iterator<Item = u64> + '_ {
    history
        .iter()
        .filter(move |h| h.subject_type == kind)
        .map(|h| h.subject_id)
}

fn next_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().map_or(1, |max| max + 1)
}
