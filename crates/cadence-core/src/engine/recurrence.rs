//! Cycle boundaries and occurrence days.
//!
//! Everything here is a pure function of a plan and a calendar day. The
//! store calls [`reset_cycle_if_due`] for every plan before any spawn
//! decision of the same refresh, so a stale `cycle_count` never leaks into
//! a new cycle.

use jiff::{civil::Date, ToSpan};

use crate::models::{Cycle, Plan};

/// Monday of the week containing `day`.
///
/// Weeks start on Monday: the weekday is numbered Monday=1 … Sunday=7 and
/// `weekday - 1` days are subtracted.
pub fn week_start(day: Date) -> Date {
    let offset = i64::from(day.weekday().to_monday_one_offset()) - 1;
    day.saturating_sub(offset.days())
}

/// Whether `today` lies in a different cycle than the plan's last reset.
pub fn should_reset_cycle(plan: &Plan, today: Date) -> bool {
    let last = plan.last_reset_date;
    match plan.cycle {
        Cycle::Daily => today != last,
        Cycle::Weekly => week_start(today) != week_start(last),
        Cycle::Monthly => (today.year(), today.month()) != (last.year(), last.month()),
    }
}

/// Start a new cycle when one is due. Returns whether the plan changed.
pub fn reset_cycle_if_due(plan: &mut Plan, today: Date) -> bool {
    if !should_reset_cycle(plan, today) {
        return false;
    }
    plan.cycle_count = 0;
    plan.last_reset_date = today;
    true
}

/// Whether the plan produces a task on `today`.
pub fn is_occurrence_day(plan: &Plan, today: Date) -> bool {
    match plan.cycle {
        Cycle::Daily => true,
        Cycle::Weekly => {
            let weekday = today.weekday().to_sunday_zero_offset();
            u8::try_from(weekday).is_ok_and(|d| plan.occurrence_days.contains(&d))
        }
        Cycle::Monthly => {
            u8::try_from(today.day()).is_ok_and(|d| plan.occurrence_days.contains(&d))
        }
    }
}
