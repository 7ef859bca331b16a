//! Activity events that become history records.

use jiff::Timestamp;

use crate::models::{HistoryKind, HistoryRecord, Plan, Task};

/// An activity worth remembering, before it gets an id and a timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: HistoryKind,
    pub title: String,
    pub subject_id: u64,
}

impl Event {
    pub fn task_created(task: &Task) -> Self {
        Self::new(HistoryKind::TaskCreated, &task.title, task.id)
    }

    pub fn task_completed(task: &Task) -> Self {
        Self::new(HistoryKind::TaskCompleted, &task.title, task.id)
    }

    pub fn plan_created(plan: &Plan) -> Self {
        Self::new(HistoryKind::PlanCreated, &plan.title, plan.id)
    }

    /// A completion credited to `plan_id`, titled after whatever was
    /// completed.
    pub fn plan_completed(title: &str, plan_id: u64) -> Self {
        Self::new(HistoryKind::PlanCompleted, title, plan_id)
    }

    /// A plan ended by hand.
    pub fn plan_ended(plan: &Plan) -> Self {
        Self::new(
            HistoryKind::PlanCompleted,
            &format!("{} (ended)", plan.title),
            plan.id,
        )
    }

    fn new(kind: HistoryKind, title: &str, subject_id: u64) -> Self {
        Self {
            kind,
            title: title.to_string(),
            subject_id,
        }
    }

    /// Stamp the event into a record.
    pub fn into_record(self, id: u64, timestamp: Timestamp) -> HistoryRecord {
        HistoryRecord {
            id,
            subject_type: self.kind.subject_type(),
            kind: self.kind,
            title: self.title,
            timestamp,
            subject_id: self.subject_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubjectType;

    #[test]
    fn test_into_record_derives_subject_type() {
        let at: Timestamp = "2025-11-25T10:00:00Z".parse().expect("timestamp");
        let record = Event::plan_completed("Weekend run", 4).into_record(12, at);

        assert_eq!(record.id, 12);
        assert_eq!(record.kind, HistoryKind::PlanCompleted);
        assert_eq!(record.subject_type, SubjectType::Plan);
        assert_eq!(record.subject_id, 4);
        assert_eq!(record.title, "Weekend run");
        assert_eq!(record.timestamp, at);
    }
}
