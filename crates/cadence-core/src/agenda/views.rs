//! Refresh, history, settings and overview for the Agenda.

use jiff::civil::Date;

use super::Agenda;
use crate::{
    error::Result,
    models::{HistoryDay, HistoryRecord, Overview, Plan, Settings},
    params::UpdateSettings,
    store::RefreshReport,
};

impl Agenda {
    /// Runs the reset-then-spawn pass for `today` and returns every plan
    /// afterwards.
    ///
    /// Idempotent: a second call for the same day changes nothing.
    pub async fn refresh_plans(&self, today: Date) -> Result<Vec<Plan>> {
        let report = self.mutate(|store| store.refresh_plans(today)).await?;
        Ok(report.plans)
    }

    /// Runs the pass for the clock's current day and reports what it did.
    pub async fn refresh(&self) -> Result<RefreshReport> {
        let today = self.clock.today();
        self.mutate(|store| store.refresh_plans(today)).await
    }

    /// History records, newest first.
    pub async fn list_history(&self, limit: Option<usize>) -> Vec<HistoryRecord> {
        self.read(|store| store.list_history(limit)).await
    }

    /// History grouped by local calendar day, newest day first.
    pub async fn history_by_day(&self) -> Vec<HistoryDay> {
        self.read(|store| store.history_by_day()).await
    }

    pub async fn settings(&self) -> Settings {
        self.read(|store| store.settings().clone()).await
    }

    /// Changes preferences. Returns the new settings and a description of
    /// each change.
    pub async fn update_settings(&self, params: &UpdateSettings) -> Result<(Settings, Vec<String>)> {
        self.mutate(|store| Ok(store.update_settings(params))).await
    }

    /// Headline counts for `today`.
    pub async fn overview(&self, today: Date) -> Overview {
        self.read(|store| store.overview(today)).await
    }
}
