//! Data models for tasks, plans, history and settings.
//!
//! This module contains the core domain models of the Cadence task manager.
//! Display implementations for these models are located in
//! [`crate::display::models`] to keep data structures separate from
//! presentation logic.
//!
//! # Model Overview
//!
//! - [`Task`]: a single actionable item, either created by hand or spawned
//!   from a plan for one calendar day
//! - [`Plan`]: a recurring commitment with per-cycle and lifetime counters;
//!   its lifecycle state is derived through [`Plan::state`]
//! - [`HistoryRecord`]: an append-only activity entry
//! - [`Settings`]: display and sorting preferences
//!
//! # Examples
//!
//! ```rust
//! use std::collections::BTreeSet;
//!
//! use cadence_core::models::{Cycle, Plan, PlanState};
//! use jiff::civil::{date, time};
//!
//! let plan = Plan {
//!     id: 1,
//!     title: "Weekend run".to_string(),
//!     description: String::new(),
//!     category: "health".to_string(),
//!     cycle: Cycle::Weekly,
//!     occurrence_days: BTreeSet::from([6, 0]),
//!     start_time: time(20, 0, 0, 0),
//!     end_time: time(21, 0, 0, 0),
//!     lifetime_target: Some(10),
//!     cycle_target: 2,
//!     cycle_count: 2,
//!     lifetime_count: 5,
//!     last_reset_date: date(2025, 11, 24),
//!     created_at: date(2025, 11, 20),
//!     active: true,
//!     important: false,
//! };
//!
//! assert_eq!(plan.state(), PlanState::CycleDone);
//! assert_eq!(plan.remaining(), Some(5));
//! ```

pub mod filters;
pub mod history;
pub mod plan;
pub mod settings;
pub mod status;
pub mod task;

#[cfg(test)]
mod tests;

// Re-export all public types at the models level
pub use filters::{Overview, PlanBoard, PlanFilter, TaskFilter, Urgency};
pub use history::{HistoryDay, HistoryRecord};
pub use plan::Plan;
pub use settings::Settings;
pub use status::{Cycle, HistoryKind, PlanState, Priority, SortBy, SubjectType, Theme};
pub use task::Task;
