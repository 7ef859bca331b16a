//! Sources of the current date and time.
//!
//! Recurrence decisions only ever ask a [`Clock`] what day it is, so tests
//! and hosts can pin or advance time without touching the wall clock.

use std::sync::Mutex;

use jiff::{civil::Date, tz::TimeZone, Timestamp, ToSpan};

use crate::error::{CadenceError, Result};

/// Supplies the current instant and the time zone used to turn it into a
/// calendar day.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> Timestamp;

    /// The time zone calendar days are computed in.
    fn time_zone(&self) -> TimeZone;

    /// The current calendar day in [`Clock::time_zone`].
    fn today(&self) -> Date {
        self.now().to_zoned(self.time_zone()).date()
    }
}

/// Wall clock in the system time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }

    fn time_zone(&self) -> TimeZone {
        TimeZone::system()
    }
}

/// A clock that stays where it is put.
///
/// Used by tests and by the CLI's `--today` flag. The instant can be moved
/// forward with [`FixedClock::advance_days`] or replaced with
/// [`FixedClock::set`].
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<Timestamp>,
    tz: TimeZone,
}

impl FixedClock {
    pub fn new(now: Timestamp, tz: TimeZone) -> Self {
        Self {
            now: Mutex::new(now),
            tz,
        }
    }

    /// A UTC clock pinned to 09:00 on `day`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cadence_core::clock::{Clock, FixedClock};
    /// use jiff::civil::date;
    ///
    /// let clock = FixedClock::on_date(date(2025, 11, 15))?;
    /// assert_eq!(clock.today(), date(2025, 11, 15));
    ///
    /// clock.advance_days(20)?;
    /// assert_eq!(clock.today(), date(2025, 12, 5));
    /// # Ok::<(), cadence_core::CadenceError>(())
    /// ```
    pub fn on_date(day: Date) -> Result<Self> {
        let zoned = day
            .at(9, 0, 0, 0)
            .to_zoned(TimeZone::UTC)
            .map_err(|e| CadenceError::Configuration {
                message: format!("Cannot pin clock to {day}: {e}"),
            })?;
        Ok(Self::new(zoned.timestamp(), TimeZone::UTC))
    }

    pub fn set(&self, now: Timestamp) {
        *self.lock() = now;
    }

    /// Move the clock forward by whole days.
    pub fn advance_days(&self, days: i64) -> Result<()> {
        let mut now = self.lock();
        *now = now
            .checked_add((days * 24).hours())
            .map_err(|e| CadenceError::Configuration {
                message: format!("Cannot advance clock by {days} days: {e}"),
            })?;
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Timestamp> {
        // A poisoned lock still holds a valid timestamp
        self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.lock()
    }

    fn time_zone(&self) -> TimeZone {
        self.tz.clone()
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_fixed_clock_reports_pinned_day() {
        let clock = FixedClock::on_date(date(2025, 10, 15)).expect("valid date");
        assert_eq!(clock.today(), date(2025, 10, 15));
        assert_eq!(clock.today(), clock.today());
    }

    #[test]
    fn test_fixed_clock_advances_across_month_end() {
        let clock = FixedClock::on_date(date(2025, 1, 31)).expect("valid date");
        clock.advance_days(1).expect("advance");
        assert_eq!(clock.today(), date(2025, 2, 1));
    }

    #[test]
    fn test_fixed_clock_respects_time_zone() {
        let instant: Timestamp = "2025-06-01T23:30:00Z".parse().expect("timestamp");
        let tz = TimeZone::fixed(jiff::tz::offset(2));
        let clock = FixedClock::new(instant, tz);
        assert_eq!(clock.today(), date(2025, 6, 2));
    }
}
