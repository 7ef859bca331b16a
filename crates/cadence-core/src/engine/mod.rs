//! Recurrence and lifecycle rules for plans.
//!
//! The engine is made of plain functions over [`Plan`](crate::models::Plan)
//! values. It never stores anything itself: the [`Store`](crate::store::Store)
//! calls into it and records the resulting changes.
//!
//! - [`recurrence`]: cycle boundaries and occurrence days
//! - [`spawner`]: one task per plan and day
//! - [`lifecycle`]: completions, pausing, ending
//! - [`history`]: activity events

pub mod history;
pub mod lifecycle;
pub mod recurrence;
pub mod spawner;

pub use history::Event;
pub use lifecycle::Credit;
