//! Date and time display utilities.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

use crate::models::{Cycle, Plan};

/// A `Timestamp` shown in the system time zone as `YYYY-MM-DD HH:MM TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M %Z")
        )
    }
}

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// A plan's occurrence days in words.
///
/// ```rust
/// use std::collections::BTreeSet;
///
/// use cadence_core::{display::OccurrenceDays, models::{Cycle, Plan}};
/// use jiff::civil::{date, time};
///
/// let plan = Plan {
///     id: 1,
///     title: "Weekend run".to_string(),
///     description: String::new(),
///     category: String::new(),
///     cycle: Cycle::Weekly,
///     occurrence_days: BTreeSet::from([6, 0]),
///     start_time: time(20, 0, 0, 0),
///     end_time: time(21, 0, 0, 0),
///     lifetime_target: None,
///     cycle_target: 2,
///     cycle_count: 0,
///     lifetime_count: 0,
///     last_reset_date: date(2025, 11, 24),
///     created_at: date(2025, 11, 24),
///     active: true,
///     important: false,
/// };
/// assert_eq!(OccurrenceDays(&plan).to_string(), "Sun, Sat");
/// ```
pub struct OccurrenceDays<'a>(pub &'a Plan);

impl fmt::Display for OccurrenceDays<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days = &self.0.occurrence_days;
        match self.0.cycle {
            Cycle::Daily => write!(f, "every day"),
            Cycle::Weekly => {
                let names: Vec<&str> = days
                    .iter()
                    .filter_map(|d| WEEKDAYS.get(usize::from(*d)).copied())
                    .collect();
                write!(f, "{}", names.join(", "))
            }
            Cycle::Monthly => {
                let numbers: Vec<String> = days.iter().map(u8::to_string).collect();
                write!(f, "day {} of the month", numbers.join(", "))
            }
        }
    }
}
