//! High-level async API over the store and a persistence backend.
//!
//! The [`Agenda`] is what hosts talk to. It owns the in-memory
//! [`Store`] behind one async mutex and a [`Persistence`] backend.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │     Agenda      │    │      Store      │    │   Persistence   │
//! │ (task_ops,      │───▶│ (engine rules,  │───▶│ (db/, JSON,     │
//! │  plan_ops, ...) │    │  change queue)  │    │  memory)        │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!     Async facade         Source of truth        Durable copy
//! ```
//!
//! Every operation takes the lock, runs against the store, then flushes the
//! queued changes on tokio's blocking pool before releasing the lock. A
//! refresh pass therefore always finishes before the next completion is
//! processed. When a flush fails the error is returned and the in-memory
//! state is kept as it is.
//!
//! # Examples
//!
//! ```rust
//! use cadence_core::{
//!     clock::FixedClock,
//!     params::{CreatePlan, ListTasks},
//!     AgendaBuilder,
//! };
//! use jiff::civil::date;
//!
//! # #[tokio::main]
//! # async fn main() -> cadence_core::Result<()> {
//! let agenda = AgendaBuilder::new()
//!     .in_memory()
//!     .with_clock(FixedClock::on_date(date(2025, 11, 25))?)
//!     .build()
//!     .await?;
//!
//! agenda
//!     .create_plan(&CreatePlan {
//!         title: "Stretch".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let report = agenda.refresh().await?;
//! assert_eq!(report.spawned.len(), 1);
//!
//! let tasks = agenda.list_tasks(&ListTasks::default()).await;
//! assert_eq!(tasks[0].title, "Stretch");
//! # Ok(())
//! # }
//! ```

use std::{collections::BTreeSet, sync::Arc};

use log::warn;
use tokio::{sync::Mutex, task};

use crate::{
    clock::Clock,
    error::{CadenceError, Result},
    persistence::Persistence,
    store::{Change, Store},
};

pub mod builder;
mod plan_ops;
mod task_ops;
mod views;


pub use builder::AgendaBuilder;

/// Main interface for managing tasks, plans, history and settings.
///
/// Every mutation is written to the backend before the call returns. When
/// that write fails the error is returned and memory keeps the change, but
/// the failed batch is not retried: later writes only carry newer changes,
/// so the backend can lag behind memory for the rest of the session.
pub struct Agenda {
    store: Mutex<Store>,
    persistence: Arc<dyn Persistence>,
    clock: Arc<dyn Clock>,
}

impl Agenda {
    pub(crate) fn new(store: Store, persistence: Arc<dyn Persistence>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Mutex::new(store),
            persistence,
            clock,
        }
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Run `op` against the store and persist what it changed.
    async fn mutate<T>(&self, op: impl FnOnce(&mut Store) -> Result<T> + Send) -> Result<T> {
        let mut store = self.store.lock().await;
        let value = op(&mut *store)?;
        self.flush(&mut store).await?;
        Ok(value)
    }

    /// Run a read-only query against the store.
    async fn read<T>(&self, query: impl FnOnce(&Store) -> T + Send) -> T {
        let store = self.store.lock().await;
        query(&*store)
    }

    async fn flush(&self, store: &mut Store) -> Result<()> {
        let changes = store.take_changes();
        if changes.is_empty() {
            return Ok(());
        }
        let persistence = Arc::clone(&self.persistence);
        let kinds: BTreeSet<&'static str> = changes.iter().map(Change::kind).collect();

        let outcome = task::spawn_blocking(move || persistence.apply(&changes))
            .await
            .map_err(|e| CadenceError::Persistence {
                message: format!("Task join error: {e}"),
            })
            .and_then(|result| result);

        if let Err(e) = &outcome {
            warn!(
                "Dropped unsaved change(s) [{}]; in-memory state kept: {e}",
                kinds.into_iter().collect::<Vec<_>>().join(", ")
            );
        }
        outcome
    }
}
