//! Filter, ordering and grouping types for querying tasks and plans.

use std::cmp::Ordering;

use jiff::civil::Date;
use serde::Serialize;

use super::{Plan, PlanState, Settings, SortBy, Task};

/// Filter options for querying tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Case-insensitive match against title and description
    pub search: Option<String>,

    /// Only starred tasks
    pub important_only: bool,

    /// `Some(true)` for completed only, `Some(false)` for open only,
    /// `None` for both
    pub completed: Option<bool>,

    pub sort_by: SortBy,
}

impl TaskFilter {
    /// Returns true when `task` passes every criterion of the filter.
    pub fn accepts(&self, task: &Task) -> bool {
        if self.important_only && !task.important {
            return false;
        }
        if let Some(completed) = self.completed {
            if task.completed != completed {
                return false;
            }
        }
        match &self.search {
            Some(query) if !query.is_empty() => task.matches(query),
            _ => true,
        }
    }

    /// Sorts `tasks` in place according to `sort_by`. The sort is stable so
    /// ties keep their storage order.
    pub fn sort(&self, tasks: &mut [Task]) {
        tasks.sort_by(|a, b| compare_tasks(self.sort_by, a, b));
    }
}

impl From<(&crate::params::ListTasks, &Settings)> for TaskFilter {
    /// Combine explicit list parameters with the stored preferences.
    ///
    /// Completed tasks are hidden when the user turned `show_completed` off
    /// and the request did not ask for a specific completion state.
    fn from((params, settings): (&crate::params::ListTasks, &Settings)) -> Self {
        let completed = match params.completed {
            Some(explicit) => Some(explicit),
            None if !settings.show_completed => Some(false),
            None => None,
        };
        Self {
            search: params.search.clone(),
            important_only: params.important_only,
            completed,
            sort_by: params.sort_by.unwrap_or(settings.sort_by),
        }
    }
}

fn compare_tasks(sort_by: SortBy, a: &Task, b: &Task) -> Ordering {
    match sort_by {
        SortBy::Priority => a.priority.rank().cmp(&b.priority.rank()),
        SortBy::Name => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortBy::Date => match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}

/// Filter options for querying plans.
#[derive(Debug, Clone, Default)]
pub struct PlanFilter {
    pub state: Option<PlanState>,
    pub important_only: bool,
    pub search: Option<String>,
}

impl PlanFilter {
    pub fn accepts(&self, plan: &Plan) -> bool {
        if self.important_only && !plan.important {
            return false;
        }
        if self.state.is_some_and(|state| plan.state() != state) {
            return false;
        }
        match &self.search {
            Some(query) if !query.is_empty() => plan.matches(query),
            _ => true,
        }
    }
}

impl From<&crate::params::ListPlans> for PlanFilter {
    fn from(params: &crate::params::ListPlans) -> Self {
        Self {
            state: params.state,
            important_only: params.important_only,
            search: params.search.clone(),
        }
    }
}

/// How close a task's due date is.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    /// Due date has passed
    Overdue,
    /// Due today
    DueToday,
    /// Due within the next two days
    Soon,
    /// Due later
    Normal,
    /// No due date
    None,
}

impl Urgency {
    /// Classify `due` relative to `today`.
    pub fn for_due_date(due: Option<Date>, today: Date) -> Self {
        let Some(due) = due else {
            return Urgency::None;
        };
        let days = match today.until(due) {
            Ok(span) => span.get_days(),
            Err(_) => return Urgency::Normal,
        };
        match days {
            d if d < 0 => Urgency::Overdue,
            0 => Urgency::DueToday,
            1..=2 => Urgency::Soon,
            _ => Urgency::Normal,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Urgency::Overdue => "overdue",
            Urgency::DueToday => "due today",
            Urgency::Soon => "due soon",
            Urgency::Normal | Urgency::None => "",
        }
    }
}

/// Plans bucketed by lifecycle state.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlanBoard {
    pub in_cycle: Vec<Plan>,
    pub cycle_done: Vec<Plan>,
    pub paused: Vec<Plan>,
    pub ended: Vec<Plan>,
}

impl FromIterator<Plan> for PlanBoard {
    fn from_iter<I: IntoIterator<Item = Plan>>(iter: I) -> Self {
        let mut board = PlanBoard::default();
        for plan in iter {
            match plan.state() {
                PlanState::InCycle => board.in_cycle.push(plan),
                PlanState::CycleDone => board.cycle_done.push(plan),
                PlanState::Paused => board.paused.push(plan),
                PlanState::Ended => board.ended.push(plan),
            }
        }
        board
    }
}

impl PlanBoard {
    pub fn is_empty(&self) -> bool {
        self.in_cycle.is_empty()
            && self.cycle_done.is_empty()
            && self.paused.is_empty()
            && self.ended.is_empty()
    }
}

/// Headline counts across tasks and plans.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct Overview {
    /// Open tasks plus active plans
    pub open: usize,
    /// Starred open tasks plus starred active plans
    pub important: usize,
    /// Completed tasks
    pub completed: usize,
    /// Open tasks whose due date has passed
    pub overdue: usize,
}

impl Overview {
    pub fn compute(tasks: &[Task], plans: &[Plan], today: Date) -> Self {
        let open_tasks = tasks.iter().filter(|t| !t.completed);
        let active_plans = plans.iter().filter(|p| p.active);
        Self {
            open: open_tasks.clone().count() + active_plans.clone().count(),
            important: open_tasks.clone().filter(|t| t.important).count()
                + active_plans.filter(|p| p.important).count(),
            completed: tasks.iter().filter(|t| t.completed).count(),
            overdue: open_tasks
                .filter(|t| t.urgency(today) == Urgency::Overdue)
                .count(),
        }
    }
}
