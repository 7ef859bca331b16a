//! Plan model definition and related functionality.

use std::collections::BTreeSet;

use jiff::civil::{Date, Time};
use serde::{Deserialize, Serialize};

use super::{Cycle, PlanState};

/// A recurring commitment that spawns dated tasks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Unique identifier for the plan
    pub id: u64,

    /// Title of the plan, copied onto spawned tasks
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub category: String,

    /// Length of one cycle
    pub cycle: Cycle,

    /// Days the plan occurs on: 0=Sunday..6=Saturday for weekly plans,
    /// 1..31 for monthly plans, ignored for daily plans
    #[serde(default)]
    pub occurrence_days: BTreeSet<u8>,

    /// Start of the daily time window
    pub start_time: Time,

    /// End of the daily time window
    pub end_time: Time,

    /// Total completions before the plan ends for good (`None` = unlimited)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifetime_target: Option<u32>,

    /// Completions wanted within one cycle
    pub cycle_target: u32,

    /// Completions in the current cycle
    #[serde(default)]
    pub cycle_count: u32,

    /// Completions across all cycles, never reset
    #[serde(default)]
    pub lifetime_count: u32,

    /// Day of the last cycle reset
    pub last_reset_date: Date,

    /// Day the plan was created
    pub created_at: Date,

    /// Whether the plan spawns tasks and accepts completions
    pub active: bool,

    #[serde(default)]
    pub important: bool,
}

impl Plan {
    /// Returns true when the lifetime target exists and has been reached.
    pub fn lifetime_reached(&self) -> bool {
        self.lifetime_target
            .is_some_and(|target| self.lifetime_count >= target)
    }

    /// Returns true when the current cycle's target has been met.
    pub fn cycle_satisfied(&self) -> bool {
        self.cycle_count >= self.cycle_target
    }

    /// Derives the lifecycle state from the plan's flags and counters.
    pub fn state(&self) -> PlanState {
        match (self.active, self.lifetime_reached()) {
            (true, _) if self.cycle_satisfied() => PlanState::CycleDone,
            (true, _) => PlanState::InCycle,
            (false, true) => PlanState::Ended,
            (false, false) => PlanState::Paused,
        }
    }

    pub fn is_ended(&self) -> bool {
        self.state() == PlanState::Ended
    }

    /// Completions still needed before the plan ends, if it has a target.
    pub fn remaining(&self) -> Option<u32> {
        self.lifetime_target
            .map(|target| target.saturating_sub(self.lifetime_count))
    }

    /// Returns true when the title or description contains `query`,
    /// ignoring case.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }

    /// The time window formatted as `HH:MM - HH:MM`.
    pub fn time_window(&self) -> String {
        format!(
            "{} - {}",
            self.start_time.strftime("%H:%M"),
            self.end_time.strftime("%H:%M")
        )
    }
}
