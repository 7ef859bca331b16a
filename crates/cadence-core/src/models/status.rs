//! Enumerations shared by tasks, plans, history and settings.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Priority of a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(format!("Invalid priority: {s}")),
        }
    }
}

impl Priority {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Sort rank, highest priority first.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

/// Recurrence cycle of a plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Cycle {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl FromStr for Cycle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Cycle::Daily),
            "weekly" => Ok(Cycle::Weekly),
            "monthly" => Ok(Cycle::Monthly),
            _ => Err(format!("Invalid cycle: {s}")),
        }
    }
}

impl Cycle {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Cycle::Daily => "daily",
            Cycle::Weekly => "weekly",
            Cycle::Monthly => "monthly",
        }
    }

    /// Inclusive range of valid occurrence day values, `None` for daily.
    pub fn day_range(&self) -> Option<(u8, u8)> {
        match self {
            Cycle::Daily => None,
            Cycle::Weekly => Some((0, 6)),
            Cycle::Monthly => Some((1, 31)),
        }
    }
}

/// Lifecycle state of a plan, derived from its counters and flags.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PlanState {
    /// Active and still short of the cycle target
    InCycle,
    /// Active with the cycle target met
    CycleDone,
    /// Inactive with lifetime target absent or not reached
    Paused,
    /// Inactive with lifetime target reached
    Ended,
}

impl FromStr for PlanState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in_cycle" | "incycle" | "active" => Ok(PlanState::InCycle),
            "cycle_done" | "cycledone" | "done" => Ok(PlanState::CycleDone),
            "paused" => Ok(PlanState::Paused),
            "ended" => Ok(PlanState::Ended),
            _ => Err(format!("Invalid plan state: {s}")),
        }
    }
}

impl PlanState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanState::InCycle => "in_cycle",
            PlanState::CycleDone => "cycle_done",
            PlanState::Paused => "paused",
            PlanState::Ended => "ended",
        }
    }

    /// Get state with consistent icon formatting for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cadence_core::models::PlanState;
    ///
    /// assert_eq!(PlanState::CycleDone.with_icon(), "✓ Cycle done");
    /// assert_eq!(PlanState::Ended.with_icon(), "■ Ended");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            PlanState::InCycle => "➤ In cycle",
            PlanState::CycleDone => "✓ Cycle done",
            PlanState::Paused => "‖ Paused",
            PlanState::Ended => "■ Ended",
        }
    }
}

/// Kind of activity captured by a history record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HistoryKind {
    TaskCreated,
    TaskCompleted,
    PlanCreated,
    PlanCompleted,
}

impl FromStr for HistoryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "task_created" => Ok(HistoryKind::TaskCreated),
            "task_completed" => Ok(HistoryKind::TaskCompleted),
            "plan_created" => Ok(HistoryKind::PlanCreated),
            "plan_completed" => Ok(HistoryKind::PlanCompleted),
            _ => Err(format!("Invalid history kind: {s}")),
        }
    }
}

impl HistoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryKind::TaskCreated => "task_created",
            HistoryKind::TaskCompleted => "task_completed",
            HistoryKind::PlanCreated => "plan_created",
            HistoryKind::PlanCompleted => "plan_completed",
        }
    }

    /// The type of subject this kind of record refers to.
    pub fn subject_type(&self) -> SubjectType {
        match self {
            HistoryKind::TaskCreated | HistoryKind::TaskCompleted => SubjectType::Task,
            HistoryKind::PlanCreated | HistoryKind::PlanCompleted => SubjectType::Plan,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HistoryKind::TaskCreated => "Created task",
            HistoryKind::TaskCompleted => "Completed task",
            HistoryKind::PlanCreated => "Created plan",
            HistoryKind::PlanCompleted => "Completed plan",
        }
    }
}

/// Subject of a history record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SubjectType {
    Task,
    Plan,
}

impl FromStr for SubjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "task" => Ok(SubjectType::Task),
            "plan" => Ok(SubjectType::Plan),
            _ => Err(format!("Invalid subject type: {s}")),
        }
    }
}

impl SubjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectType::Task => "task",
            SubjectType::Plan => "plan",
        }
    }
}

/// Task ordering preference.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Due date ascending, undated tasks last
    #[default]
    Date,
    /// High priority first
    Priority,
    /// Title, case-insensitive
    Name,
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "date" => Ok(SortBy::Date),
            "priority" => Ok(SortBy::Priority),
            "name" => Ok(SortBy::Name),
            _ => Err(format!("Invalid sort order: {s}")),
        }
    }
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Date => "date",
            SortBy::Priority => "priority",
            SortBy::Name => "name",
        }
    }
}

/// Color theme preference.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
    System,
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            "system" => Ok(Theme::System),
            _ => Err(format!("Invalid theme: {s}")),
        }
    }
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
            Theme::System => "system",
        }
    }
}
