//! Task model definition and related functionality.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{Priority, Urgency};

/// A single actionable item, created by hand or spawned from a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Unique identifier for the task
    pub id: u64,

    /// Title of the task
    pub title: String,

    /// Free-form description, possibly multi-line
    #[serde(default)]
    pub description: String,

    /// Free-text category label
    #[serde(default)]
    pub category: String,

    /// Whether the task has been marked done
    #[serde(default)]
    pub completed: bool,

    /// When the task was last marked done; cleared when reopened
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,

    /// Starred by the user
    #[serde(default)]
    pub important: bool,

    #[serde(default)]
    pub priority: Priority,

    /// Calendar day the task is due
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Date>,

    /// Calendar day the task was created
    pub created_at: Date,

    /// Plan that spawned this task, absent for manual tasks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_plan_id: Option<u64>,
}

impl Task {
    /// Returns true when this task was spawned by `plan_id` for `day`.
    pub fn is_occurrence_of(&self, plan_id: u64, day: Date) -> bool {
        self.source_plan_id == Some(plan_id) && self.due_date == Some(day)
    }

    /// Returns true when the title or description contains `query`,
    /// ignoring case.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }

    /// Classifies how pressing the due date is relative to `today`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cadence_core::models::{Priority, Task, Urgency};
    /// use jiff::civil::date;
    ///
    /// let task = Task {
    ///     id: 1,
    ///     title: "File taxes".to_string(),
    ///     description: String::new(),
    ///     category: String::new(),
    ///     completed: false,
    ///     completed_at: None,
    ///     important: false,
    ///     priority: Priority::High,
    ///     due_date: Some(date(2025, 4, 15)),
    ///     created_at: date(2025, 4, 1),
    ///     source_plan_id: None,
    /// };
    ///
    /// assert_eq!(task.urgency(date(2025, 4, 16)), Urgency::Overdue);
    /// assert_eq!(task.urgency(date(2025, 4, 15)), Urgency::DueToday);
    /// assert_eq!(task.urgency(date(2025, 4, 13)), Urgency::Soon);
    /// assert_eq!(task.urgency(date(2025, 4, 1)), Urgency::Normal);
    /// ```
    pub fn urgency(&self, today: Date) -> Urgency {
        Urgency::for_due_date(self.due_date, today)
    }
}
