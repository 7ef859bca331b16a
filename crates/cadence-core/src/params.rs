//! Parameter structures for Cadence operations
//!
//! This module contains the request structures shared by every interface
//! (the CLI today, any other host tomorrow). They carry raw user input:
//! dates and times are plain strings and are only parsed and validated by
//! the `validate` methods below, so that every interface reports malformed
//! input the same way.
//!
//! ## Parameter Wrapper Pattern
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │    Validated    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│     fields      │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Interface layers define their own argument structs with framework
//! derives and convert into these types with `From` implementations.

use std::collections::BTreeSet;

use jiff::civil::{Date, Time};
use serde::{Deserialize, Serialize};

use crate::{
    error::{CadenceError, Result},
    models::{Cycle, PlanState, Priority, Settings, SortBy, Theme},
};

/// Generic parameters for operations requiring just an ID.
///
/// Used for operations like show_task, delete_plan, complete_plan_once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for creating a task by hand.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTask {
    /// Title of the task (required)
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub important: bool,
    pub priority: Option<Priority>,
    /// Due date as `YYYY-MM-DD`
    pub due_date: Option<String>,
}

/// Validated fields of a [`CreateTask`] request.
#[derive(Debug, Clone)]
pub(crate) struct NewTask {
    pub title: String,
    pub description: String,
    pub category: String,
    pub important: bool,
    pub priority: Priority,
    pub due_date: Option<Date>,
}

impl CreateTask {
    pub(crate) fn validate(&self) -> Result<NewTask> {
        Ok(NewTask {
            title: validate_title(&self.title)?,
            description: self.description.clone().unwrap_or_default(),
            category: normalize_category(self.category.as_deref()),
            important: self.important,
            priority: self.priority.unwrap_or_default(),
            due_date: self
                .due_date
                .as_deref()
                .map(|s| parse_date("due_date", s))
                .transpose()?,
        })
    }
}

/// Parameters for partially updating a task.
///
/// Fields left as `None` keep their current value. Completion is changed
/// through the toggle operation, not here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    pub id: u64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub important: Option<bool>,
    pub priority: Option<Priority>,
    /// New due date as `YYYY-MM-DD`
    pub due_date: Option<String>,
    /// Remove the due date entirely
    #[serde(default)]
    pub clear_due_date: bool,
}

impl UpdateTask {
    /// Parse the due date change, if any.
    ///
    /// Returns `None` when the due date is untouched, `Some(None)` when it
    /// is cleared and `Some(Some(date))` when it is replaced.
    pub(crate) fn due_date_change(&self) -> Result<Option<Option<Date>>> {
        match (&self.due_date, self.clear_due_date) {
            (Some(_), true) => Err(CadenceError::invalid_input("due_date")
                .with_reason("cannot set and clear the due date at the same time")),
            (Some(s), false) => Ok(Some(Some(parse_date("due_date", s)?))),
            (None, true) => Ok(Some(None)),
            (None, false) => Ok(None),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.important.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && !self.clear_due_date
    }
}

/// Parameters for listing tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListTasks {
    /// Case-insensitive search over title and description
    pub search: Option<String>,
    #[serde(default)]
    pub important_only: bool,
    /// Restrict to completed (`true`) or open (`false`) tasks
    pub completed: Option<bool>,
    /// Overrides the stored sort preference
    pub sort_by: Option<SortBy>,
}

/// Parameters for creating a recurring plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlan {
    /// Title of the plan (required)
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub cycle: Cycle,
    /// Weekdays (0=Sunday..6=Saturday) or days of month (1..31)
    #[serde(default)]
    pub occurrence_days: Vec<u8>,
    /// Start of the time window as `HH:MM`
    pub start_time: String,
    /// End of the time window as `HH:MM`
    pub end_time: String,
    /// Completions wanted per cycle, defaults to 1
    pub cycle_target: Option<u32>,
    /// Total completions before the plan ends, unlimited when absent
    pub lifetime_target: Option<u32>,
    /// Whether the plan starts active
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub important: bool,
}

impl Default for CreatePlan {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: None,
            category: None,
            cycle: Cycle::Daily,
            occurrence_days: Vec::new(),
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            cycle_target: None,
            lifetime_target: None,
            active: true,
            important: false,
        }
    }
}

/// Validated fields of a [`CreatePlan`] request.
#[derive(Debug, Clone)]
pub(crate) struct NewPlan {
    pub title: String,
    pub description: String,
    pub category: String,
    pub cycle: Cycle,
    pub occurrence_days: BTreeSet<u8>,
    pub start_time: Time,
    pub end_time: Time,
    pub cycle_target: u32,
    pub lifetime_target: Option<u32>,
    pub active: bool,
    pub important: bool,
}

impl CreatePlan {
    pub(crate) fn validate(&self) -> Result<NewPlan> {
        Ok(NewPlan {
            title: validate_title(&self.title)?,
            description: self.description.clone().unwrap_or_default(),
            category: normalize_category(self.category.as_deref()),
            cycle: self.cycle,
            occurrence_days: validate_occurrence_days(self.cycle, &self.occurrence_days)?,
            start_time: parse_time("start_time", &self.start_time)?,
            end_time: parse_time("end_time", &self.end_time)?,
            cycle_target: validate_positive("cycle_target", self.cycle_target.unwrap_or(1))?,
            lifetime_target: self
                .lifetime_target
                .map(|target| validate_positive("lifetime_target", target))
                .transpose()?,
            active: self.active,
            important: self.important,
        })
    }
}

/// Parameters for partially updating a plan.
///
/// Counters, the active flag and the reset date are owned by the lifecycle
/// operations and cannot be edited here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePlan {
    pub id: u64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub cycle: Option<Cycle>,
    pub occurrence_days: Option<Vec<u8>>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub cycle_target: Option<u32>,
    pub lifetime_target: Option<u32>,
    /// Make the plan unlimited
    #[serde(default)]
    pub clear_lifetime_target: bool,
    pub important: Option<bool>,
}

impl UpdatePlan {
    /// Parse the lifetime target change, if any.
    pub(crate) fn lifetime_target_change(&self) -> Result<Option<Option<u32>>> {
        match (self.lifetime_target, self.clear_lifetime_target) {
            (Some(_), true) => Err(CadenceError::invalid_input("lifetime_target")
                .with_reason("cannot set and clear the lifetime target at the same time")),
            (Some(target), false) => Ok(Some(Some(validate_positive("lifetime_target", target)?))),
            (None, true) => Ok(Some(None)),
            (None, false) => Ok(None),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.cycle.is_none()
            && self.occurrence_days.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.cycle_target.is_none()
            && self.lifetime_target.is_none()
            && !self.clear_lifetime_target
            && self.important.is_none()
    }
}

/// Parameters for listing plans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPlans {
    /// Only plans in this lifecycle state
    pub state: Option<PlanState>,
    #[serde(default)]
    pub important_only: bool,
    pub search: Option<String>,
}

/// Parameters for pausing or resuming a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetPlanActive {
    pub id: u64,
    pub active: bool,
}

/// Parameters for partially updating the settings record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSettings {
    pub show_completed: Option<bool>,
    pub sort_by: Option<SortBy>,
    pub theme: Option<Theme>,
    pub notifications: Option<bool>,
    pub sound_enabled: Option<bool>,
}

impl UpdateSettings {
    /// Apply the requested changes and describe each one.
    pub fn apply(&self, settings: &mut Settings) -> Vec<String> {
        let mut changes = Vec::new();
        if let Some(value) = self.show_completed {
            settings.show_completed = value;
            changes.push(format!("show_completed = {value}"));
        }
        if let Some(value) = self.sort_by {
            settings.sort_by = value;
            changes.push(format!("sort_by = {}", value.as_str()));
        }
        if let Some(value) = self.theme {
            settings.theme = value;
            changes.push(format!("theme = {}", value.as_str()));
        }
        if let Some(value) = self.notifications {
            settings.notifications = value;
            changes.push(format!("notifications = {value}"));
        }
        if let Some(value) = self.sound_enabled {
            settings.sound_enabled = value;
            changes.push(format!("sound_enabled = {value}"));
        }
        changes
    }
}

fn default_true() -> bool {
    true
}

/// Trim a title and reject it when nothing is left.
pub(crate) fn validate_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CadenceError::invalid_input("title").with_reason("must not be empty"));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn normalize_category(category: Option<&str>) -> String {
    category.map(str::trim).unwrap_or_default().to_string()
}

pub(crate) fn validate_positive(field: &str, value: u32) -> Result<u32> {
    if value == 0 {
        return Err(CadenceError::invalid_input(field).with_reason("must be at least 1"));
    }
    Ok(value)
}

/// Check occurrence days against the cycle's valid range.
///
/// Daily plans ignore the days entirely, so they are dropped. Weekly and
/// monthly plans need at least one day or they would never occur.
pub(crate) fn validate_occurrence_days(cycle: Cycle, days: &[u8]) -> Result<BTreeSet<u8>> {
    let Some((min, max)) = cycle.day_range() else {
        return Ok(BTreeSet::new());
    };
    if days.is_empty() {
        return Err(CadenceError::invalid_input("occurrence_days").with_reason(format!(
            "a {} plan needs at least one day",
            cycle.as_str()
        )));
    }
    if let Some(bad) = days.iter().find(|d| !(min..=max).contains(*d)) {
        return Err(CadenceError::invalid_input("occurrence_days").with_reason(format!(
            "{bad} is outside {min}..={max} for a {} plan",
            cycle.as_str()
        )));
    }
    Ok(days.iter().copied().collect())
}

pub(crate) fn parse_date(field: &str, value: &str) -> Result<Date> {
    value.trim().parse::<Date>().map_err(|e| {
        CadenceError::invalid_input(field).with_reason(format!("'{value}' is not a YYYY-MM-DD date: {e}"))
    })
}

pub(crate) fn parse_time(field: &str, value: &str) -> Result<Time> {
    value.trim().parse::<Time>().map_err(|e| {
        CadenceError::invalid_input(field).with_reason(format!("'{value}' is not an HH:MM time: {e}"))
    })
}
