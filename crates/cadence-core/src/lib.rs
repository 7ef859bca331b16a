//! Core library for the Cadence task manager.
//!
//! Cadence keeps one-off tasks next to recurring plans. A plan describes a
//! commitment such as "run on Saturdays and Sundays, twice a week, 10 times
//! in total"; each day it occurs the plan spawns a task, and completing that
//! task credits the plan. Cycle counters reset at the start of every day,
//! week or month, and a plan ends once its lifetime target is reached.
//!
//! # Layers
//!
//! - [`engine`]: pure recurrence, spawning and lifecycle rules
//! - [`store`]: in-memory collections that apply the rules and queue changes
//! - [`persistence`] and [`db`]: durable backends (SQLite, JSON files,
//!   memory)
//! - [`agenda`]: the async API hosts use, serializing every operation
//! - [`display`]: markdown formatting for models and operation results
//!
//! # Quick Start
//!
//! ```rust
//! use cadence_core::{params::CreateTask, AgendaBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let agenda = AgendaBuilder::new()
//!     .with_database_path(Some("cadence.db"))
//!     .build()
//!     .await?;
//!
//! let task = agenda
//!     .create_task(&CreateTask {
//!         title: "Renew passport".to_string(),
//!         due_date: Some("2025-12-01".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{task}");
//! # Ok(())
//! # }
//! ```

pub mod agenda;
pub mod clock;
pub mod db;
pub mod display;
pub mod engine;
pub mod error;
pub mod models;
pub mod params;
pub mod persistence;
pub mod store;

// Re-export commonly used types
pub use agenda::{Agenda, AgendaBuilder};
pub use clock::{Clock, FixedClock, SystemClock};
pub use db::Database;
pub use display::{CreateResult, DeleteResult, OperationStatus, UpdateResult};
pub use error::{CadenceError, Result};
pub use models::{HistoryRecord, Plan, PlanState, Settings, Task};
pub use persistence::{JsonFiles, MemoryPersistence, Persistence};
pub use store::{DeletedPlan, RefreshReport};
