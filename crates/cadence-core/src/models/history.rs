//! History record model.

use jiff::{civil::Date, tz::TimeZone, Timestamp};
use serde::{Deserialize, Serialize};

use super::{HistoryKind, SubjectType};

/// Append-only audit entry describing one user-visible activity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryRecord {
    pub id: u64,

    pub kind: HistoryKind,

    /// Title of the subject at the time the record was written
    pub title: String,

    pub timestamp: Timestamp,

    /// ID of the task or plan the record is about
    pub subject_id: u64,

    pub subject_type: SubjectType,
}

impl HistoryRecord {
    /// Calendar day of the record in the given time zone.
    pub fn local_date(&self, tz: &TimeZone) -> Date {
        self.timestamp.to_zoned(tz.clone()).date()
    }
}

/// History records that share a calendar day, newest day first.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HistoryDay {
    pub date: Date,
    pub records: Vec<HistoryRecord>,
}
