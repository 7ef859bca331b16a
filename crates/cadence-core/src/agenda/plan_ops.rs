//! Plan operations for the Agenda.

use super::Agenda;
use crate::{
    error::Result,
    models::{Plan, PlanBoard},
    params::{CreatePlan, Id, ListPlans, SetPlanActive, UpdatePlan},
    store::DeletedPlan,
};

impl Agenda {
    /// Creates a plan and records `plan_created`. Its first task is
    /// spawned by the next refresh.
    ///
    /// # Errors
    ///
    /// Returns `CadenceError::InvalidInput` for an empty title, a zero
    /// target, unparsable times or occurrence days that do not fit the
    /// cycle.
    pub async fn create_plan(&self, params: &CreatePlan) -> Result<Plan> {
        self.mutate(|store| store.create_plan(params)).await
    }

    /// Applies a partial update to a plan's definition.
    ///
    /// # Errors
    ///
    /// Returns `CadenceError::InvalidState` when changing the lifetime
    /// target of an ended plan.
    pub async fn update_plan(&self, params: &UpdatePlan) -> Result<Plan> {
        self.mutate(|store| store.update_plan(params)).await
    }

    /// Permanently deletes a plan together with the tasks it spawned.
    /// History records about the plan are kept.
    pub async fn delete_plan(&self, params: &Id) -> Result<DeletedPlan> {
        self.mutate(|store| store.delete_plan(params.id)).await
    }

    /// Pauses or resumes a plan.
    ///
    /// # Errors
    ///
    /// Returns `CadenceError::InvalidState` for an ended plan.
    pub async fn set_plan_active(&self, params: &SetPlanActive) -> Result<Plan> {
        self.mutate(|store| store.set_plan_active(params.id, params.active))
            .await
    }

    pub async fn toggle_plan_important(&self, params: &Id) -> Result<Plan> {
        self.mutate(|store| store.toggle_plan_important(params.id))
            .await
    }

    /// Records one completion directly on the plan.
    ///
    /// # Errors
    ///
    /// Returns `CadenceError::InvalidState` unless the plan is active.
    pub async fn complete_plan_once(&self, params: &Id) -> Result<Plan> {
        self.mutate(|store| store.complete_plan_once(params.id))
            .await
    }

    /// Ends a plan for good. The lifetime target becomes the current
    /// lifetime count.
    ///
    /// # Errors
    ///
    /// Returns `CadenceError::InvalidState` when the plan already ended.
    pub async fn end_plan_permanently(&self, params: &Id) -> Result<Plan> {
        self.mutate(|store| store.end_plan_permanently(params.id))
            .await
    }

    /// Retrieves a plan by its ID.
    pub async fn get_plan(&self, params: &Id) -> Result<Plan> {
        self.read(|store| store.plan(params.id).cloned()).await
    }

    /// Lists plans matching `params`.
    pub async fn list_plans(&self, params: &ListPlans) -> Vec<Plan> {
        self.read(|store| store.list_plans(params)).await
    }

    /// Every plan, bucketed by lifecycle state.
    pub async fn plan_board(&self) -> PlanBoard {
        self.read(|store| store.plan_board()).await
    }
}
