//! Display formatting and result types.
//!
//! Domain models implement `Display` directly (see [`models`]); collections
//! and operation outcomes get newtype wrappers. Everything renders as
//! markdown so hosts can pass it through a terminal renderer or print it
//! as is.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │   Wrappers &    │    │    Markdown     │
//! │  (Task, Plan)   │───▶│  Result Types   │───▶│     Output      │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`collections`]: `Tasks`, `Plans`, `HistoryRecords`, `HistoryDays`
//! - [`results`]: `CreateResult`, `UpdateResult`, `DeleteResult`
//! - [`status`]: `OperationStatus`
//! - [`datetime`]: timestamp and occurrence-day formatting

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{HistoryDays, HistoryRecords, Plans, Tasks};
pub use datetime::{LocalDateTime, OccurrenceDays};
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
