//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper renders its items as a markdown list and prints a short
//! notice when the collection is empty.

use std::fmt;

use jiff::civil::Date;

use super::datetime::OccurrenceDays;
use crate::{
    models::{HistoryDay, HistoryRecord, Plan, PlanBoard, Task},
    store::RefreshReport,
};

/// Tasks rendered one per line.
///
/// When a reference day is set with [`Tasks::as_of`], open tasks that are
/// overdue or due within two days get a note on their line.
///
/// # Examples
///
/// ```rust
/// use cadence_core::{display::Tasks, models::{Priority, Task}};
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
///     priority: Priority::Medium,
///     due_date: Some(date(2025, 4, 15)),
///     created_at: date(2025, 4, 1),
///     source_plan_id: None,
/// };
///
/// let output = Tasks::new(vec![task]).as_of(date(2025, 4, 16)).to_string();
/// assert_eq!(output, "- [ ] 1. File taxes (due 2025-04-15, overdue)\n");
/// ```
pub struct Tasks {
    pub tasks: Vec<Task>,
    today: Option<Date>,
}

impl Tasks {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks, today: None }
    }

    /// Annotate due dates relative to `today`.
    pub fn as_of(mut self, today: Date) -> Self {
        self.today = Some(today);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }
}

impl fmt::Display for Tasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tasks.is_empty() {
            return writeln!(f, "No tasks found.");
        }
        for task in &self.tasks {
            let note = match self.today {
                Some(today) if !task.completed => task.urgency(today).label(),
                _ => "",
            };
            task.fmt_line(f, note)?;
        }
        Ok(())
    }
}

/// Plans rendered as one summary line each.
pub struct Plans(pub Vec<Plan>);

impl Plans {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

fn fmt_plan_line(f: &mut fmt::Formatter<'_>, plan: &Plan) -> fmt::Result {
    let star = if plan.important { " ★" } else { "" };
    writeln!(
        f,
        "- {}. {}{star} · {} · {} {} · {} ({})",
        plan.id,
        plan.title,
        plan.state().with_icon(),
        plan.cycle,
        OccurrenceDays(plan),
        plan.time_window(),
        plan.progress()
    )
}

impl fmt::Display for Plans {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No plans found.");
        }
        for plan in &self.0 {
            fmt_plan_line(f, plan)?;
        }
        Ok(())
    }
}

impl fmt::Display for PlanBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No plans found.");
        }
        let sections = [
            ("In cycle", &self.in_cycle),
            ("Cycle done", &self.cycle_done),
            ("Paused", &self.paused),
            ("Ended", &self.ended),
        ];
        let mut first = true;
        for (heading, plans) in sections {
            if plans.is_empty() {
                continue;
            }
            if !first {
                writeln!(f)?;
            }
            first = false;
            writeln!(f, "## {heading} ({})", plans.len())?;
            writeln!(f)?;
            for plan in plans {
                fmt_plan_line(f, plan)?;
            }
        }
        Ok(())
    }
}

/// History records, newest first.
pub struct HistoryRecords(pub Vec<HistoryRecord>);

impl fmt::Display for HistoryRecords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No history yet.");
        }
        for record in &self.0 {
            write!(f, "{record}")?;
        }
        Ok(())
    }
}

/// History grouped under one heading per day.
pub struct HistoryDays(pub Vec<HistoryDay>);

impl fmt::Display for HistoryDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No history yet.");
        }
        for (i, day) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "## {}", day.date)?;
            writeln!(f)?;
            for record in &day.records {
                write!(f, "{record}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for RefreshReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.today {
            Some(today) => writeln!(f, "Refreshed plans for {today}")?,
            None => writeln!(f, "Refreshed plans")?,
        }
        writeln!(f)?;
        writeln!(f, "- Cycles reset: {}", self.reset.len())?;
        writeln!(f, "- Tasks spawned: {}", self.spawned.len())?;
        for task in &self.spawned {
            writeln!(f, "  - {}. {}", task.id, task.title)?;
        }
        Ok(())
    }
}
