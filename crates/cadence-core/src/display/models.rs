//! Display implementations for domain models.
//!
//! Models render as markdown: a heading, a metadata list, then free text.

use std::fmt;

use super::datetime::{LocalDateTime, OccurrenceDays};
use crate::models::{
    Cycle, HistoryKind, HistoryRecord, Overview, Plan, PlanState, Priority, Settings, SortBy,
    SubjectType, Task, Theme,
};

macro_rules! display_as_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.as_str())
                }
            }
        )*
    };
}

display_as_str!(Priority, Cycle, PlanState, HistoryKind, SubjectType, SortBy, Theme);

impl Task {
    /// One-line form used in lists.
    pub(crate) fn fmt_line(&self, f: &mut fmt::Formatter<'_>, note: &str) -> fmt::Result {
        let check = if self.completed { "x" } else { " " };
        write!(f, "- [{check}] {}. {}", self.id, self.title)?;
        if self.important {
            write!(f, " ★")?;
        }

        let mut details = Vec::new();
        if let Some(due) = self.due_date {
            details.push(format!("due {due}"));
        }
        if !note.is_empty() {
            details.push(note.to_string());
        }
        if self.priority != Priority::Medium {
            details.push(format!("{} priority", self.priority));
        }
        if !self.category.is_empty() {
            details.push(format!("#{}", self.category));
        }
        if !details.is_empty() {
            write!(f, " ({})", details.join(", "))?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let star = if self.important { " ★" } else { "" };
        writeln!(f, "# {}. {}{star}", self.id, self.title)?;
        writeln!(f)?;

        match &self.completed_at {
            Some(at) if self.completed => writeln!(f, "- Status: done ({})", LocalDateTime(at))?,
            _ if self.completed => writeln!(f, "- Status: done")?,
            _ => writeln!(f, "- Status: open")?,
        }
        writeln!(f, "- Priority: {}", self.priority)?;
        if let Some(due) = self.due_date {
            writeln!(f, "- Due: {due}")?;
        }
        if !self.category.is_empty() {
            writeln!(f, "- Category: {}", self.category)?;
        }
        if let Some(plan_id) = self.source_plan_id {
            writeln!(f, "- From plan: {plan_id}")?;
        }
        writeln!(f, "- Created: {}", self.created_at)?;

        if !self.description.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.description)?;
        }
        Ok(())
    }
}

impl Plan {
    /// Progress as `cycle x/y` plus the lifetime count.
    pub(crate) fn progress(&self) -> String {
        let lifetime = match self.lifetime_target {
            Some(target) => format!("{}/{target}", self.lifetime_count),
            None => self.lifetime_count.to_string(),
        };
        format!(
            "cycle {}/{}, lifetime {lifetime}",
            self.cycle_count, self.cycle_target
        )
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let star = if self.important { " ★" } else { "" };
        writeln!(f, "# {}. {}{star}", self.id, self.title)?;
        writeln!(f)?;

        writeln!(f, "- State: {}", self.state().with_icon())?;
        writeln!(f, "- Cycle: {} ({})", self.cycle, OccurrenceDays(self))?;
        writeln!(f, "- Time: {}", self.time_window())?;
        writeln!(
            f,
            "- This cycle: {}/{}",
            self.cycle_count, self.cycle_target
        )?;
        match self.lifetime_target {
            Some(target) => writeln!(f, "- Lifetime: {}/{target}", self.lifetime_count)?,
            None => writeln!(f, "- Lifetime: {} (unlimited)", self.lifetime_count)?,
        }
        if !self.category.is_empty() {
            writeln!(f, "- Category: {}", self.category)?;
        }
        writeln!(f, "- Cycle started: {}", self.last_reset_date)?;
        writeln!(f, "- Created: {}", self.created_at)?;

        if !self.description.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.description)?;
        }
        Ok(())
    }
}

impl fmt::Display for HistoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- {} · {} '{}' ({} {})",
            LocalDateTime(&self.timestamp),
            self.kind.label(),
            self.title,
            self.subject_type,
            self.subject_id
        )
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Settings")?;
        writeln!(f)?;
        writeln!(f, "- show_completed: {}", self.show_completed)?;
        writeln!(f, "- sort_by: {}", self.sort_by)?;
        writeln!(f, "- theme: {}", self.theme)?;
        writeln!(f, "- notifications: {}", self.notifications)?;
        writeln!(f, "- sound_enabled: {}", self.sound_enabled)
    }
}

impl fmt::Display for Overview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "**{}** open · **{}** important · **{}** completed · **{}** overdue",
            self.open, self.important, self.completed, self.overdue
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use jiff::civil::{date, time};

    use super::*;

    fn task() -> Task {
        Task {
            id: 4,
            title: "Call the bank".to_string(),
            description: "Ask about the fee".to_string(),
            category: "admin".to_string(),
            completed: false,
            completed_at: None,
            important: true,
            priority: Priority::High,
            due_date: Some(date(2025, 11, 26)),
            created_at: date(2025, 11, 20),
            source_plan_id: None,
        }
    }

    #[test]
    fn test_task_display() {
        let output = task().to_string();
        assert!(output.starts_with("# 4. Call the bank ★"));
        assert!(output.contains("- Status: open"));
        assert!(output.contains("- Priority: high"));
        assert!(output.contains("- Due: 2025-11-26"));
        assert!(output.contains("Ask about the fee"));
    }

    #[test]
    fn test_plan_display() {
        let plan = Plan {
            id: 2,
            title: "Monthly review".to_string(),
            description: String::new(),
            category: String::new(),
            cycle: Cycle::Monthly,
            occurrence_days: BTreeSet::from([1, 15]),
            start_time: time(18, 30, 0, 0),
            end_time: time(19, 0, 0, 0),
            lifetime_target: Some(12),
            cycle_target: 2,
            cycle_count: 1,
            lifetime_count: 5,
            last_reset_date: date(2025, 11, 1),
            created_at: date(2025, 6, 1),
            active: true,
            important: false,
        };
        let output = plan.to_string();
        assert!(output.contains("- State: ➤ In cycle"));
        assert!(output.contains("- Cycle: monthly (day 1, 15 of the month)"));
        assert!(output.contains("- Time: 18:30 - 19:00"));
        assert!(output.contains("- Lifetime: 5/12"));
        assert_eq!(plan.progress(), "cycle 1/2, lifetime 5/12");
    }
}
