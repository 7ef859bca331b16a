//! Read-side queries and settings.

use jiff::civil::Date;

use super::{Change, Store};
use crate::{
    models::{
        HistoryDay, HistoryRecord, Overview, Plan, PlanBoard, PlanFilter, Settings, Task,
        TaskFilter,
    },
    params::{ListPlans, ListTasks, UpdateSettings},
};

impl Store {
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Tasks matching `params`, sorted by the requested order or the
    /// stored preference.
    pub fn list_tasks(&self, params: &ListTasks) -> Vec<Task> {
        let filter = TaskFilter::from((params, &self.settings));
        let mut tasks: Vec<Task> = self
            .tasks
            .iter()
            .filter(|t| filter.accepts(t))
            .cloned()
            .collect();
        filter.sort(&mut tasks);
        tasks
    }

    pub fn list_plans(&self, params: &ListPlans) -> Vec<Plan> {
        let filter = PlanFilter::from(params);
        self.plans
            .iter()
            .filter(|p| filter.accepts(p))
            .cloned()
            .collect()
    }

    pub fn plan_board(&self) -> PlanBoard {
        self.plans.iter().cloned().collect()
    }

    /// History records, newest first, optionally capped at `limit`.
    pub fn list_history(&self, limit: Option<usize>) -> Vec<HistoryRecord> {
        let mut records = self.history.clone();
        records.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| b.id.cmp(&a.id))
        });
        if let Some(limit) = limit {
            records.truncate(limit);
        }
        records
    }

    /// History grouped by calendar day in the clock's time zone, newest
    /// day first and newest record first within a day.
    pub fn history_by_day(&self) -> Vec<HistoryDay> {
        let tz = self.clock.time_zone();
        let mut days: Vec<HistoryDay> = Vec::new();
        for record in self.list_history(None) {
            let date = record.local_date(&tz);
            match days.last_mut() {
                Some(day) if day.date == date => day.records.push(record),
                _ => days.push(HistoryDay {
                    date,
                    records: vec![record],
                }),
            }
        }
        days
    }

    /// Applies the requested preference changes. Returns the new settings
    /// and a description of each change; nothing is queued when the
    /// request was empty.
    pub fn update_settings(&mut self, params: &UpdateSettings) -> (Settings, Vec<String>) {
        let changes = params.apply(&mut self.settings);
        if !changes.is_empty() {
            self.queue(Change::SaveSettings(self.settings.clone()));
        }
        (self.settings.clone(), changes)
    }

    pub fn overview(&self, today: Date) -> Overview {
        Overview::compute(&self.tasks, &self.plans, today)
    }
}
