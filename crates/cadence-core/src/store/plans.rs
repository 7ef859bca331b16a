//! Plan CRUD, lifecycle transitions and the refresh pass.

use jiff::civil::Date;
use log::{debug, info};
use serde::Serialize;

use super::{Change, Store};
use crate::{
    engine::{lifecycle, recurrence, spawner, Event},
    error::{CadenceError, Result},
    models::{Plan, Task},
    params::{
        normalize_category, parse_time, validate_occurrence_days, validate_positive,
        validate_title, CreatePlan, UpdatePlan,
    },
};

/// A deleted plan and how many spawned tasks went with it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DeletedPlan {
    pub plan: Plan,
    pub removed_tasks: usize,
}

/// What one refresh pass did.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct RefreshReport {
    /// Day the pass ran for
    pub today: Option<Date>,
    /// Plans whose cycle counter was reset
    pub reset: Vec<u64>,
    /// Tasks spawned for today
    pub spawned: Vec<Task>,
    /// Every plan after the pass
    pub plans: Vec<Plan>,
}

impl Store {
    pub fn plan(&self, id: u64) -> Result<&Plan> {
        self.plans
            .iter()
            .find(|p| p.id == id)
            .ok_or(CadenceError::PlanNotFound { id })
    }

    fn plan_mut(&mut self, id: u64) -> Result<&mut Plan> {
        self.plans
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(CadenceError::PlanNotFound { id })
    }

    /// Replace a plan with its edited copy and queue the save.
    fn commit_plan(&mut self, plan: Plan) -> Result<Plan> {
        let slot = self.plan_mut(plan.id)?;
        *slot = plan.clone();
        self.queue(Change::SavePlan(plan.clone()));
        Ok(plan)
    }

    /// Creates a plan starting its first cycle today and records
    /// `plan_created`.
    ///
    /// The plan's first task is spawned by the next refresh.
    pub fn create_plan(&mut self, params: &CreatePlan) -> Result<Plan> {
        let new = params.validate()?;
        let today = self.clock.today();
        let plan = Plan {
            id: self.allocate_plan_id(),
            title: new.title,
            description: new.description,
            category: new.category,
            cycle: new.cycle,
            occurrence_days: new.occurrence_days,
            start_time: new.start_time,
            end_time: new.end_time,
            lifetime_target: new.lifetime_target,
            cycle_target: new.cycle_target,
            cycle_count: 0,
            lifetime_count: 0,
            last_reset_date: today,
            created_at: today,
            active: new.active,
            important: new.important,
        };
        debug!("Created {} plan {} '{}'", plan.cycle.as_str(), plan.id, plan.title);

        self.plans.push(plan.clone());
        self.queue(Change::SavePlan(plan.clone()));
        self.record(Event::plan_created(&plan));
        Ok(plan)
    }

    /// Applies a partial update to a plan's definition.
    ///
    /// The edit is built on a copy, so a rejected field leaves the stored
    /// plan untouched.
    pub fn update_plan(&mut self, params: &UpdatePlan) -> Result<Plan> {
        let mut plan = self.plan(params.id)?.clone();

        if let Some(title) = &params.title {
            plan.title = validate_title(title)?;
        }
        if let Some(description) = &params.description {
            plan.description = description.clone();
        }
        if let Some(category) = &params.category {
            plan.category = normalize_category(Some(category));
        }
        if params.cycle.is_some() || params.occurrence_days.is_some() {
            let cycle = params.cycle.unwrap_or(plan.cycle);
            let days: Vec<u8> = match &params.occurrence_days {
                Some(days) => days.clone(),
                None => plan.occurrence_days.iter().copied().collect(),
            };
            plan.occurrence_days = validate_occurrence_days(cycle, &days)?;
            plan.cycle = cycle;
        }
        if let Some(start) = &params.start_time {
            plan.start_time = parse_time("start_time", start)?;
        }
        if let Some(end) = &params.end_time {
            plan.end_time = parse_time("end_time", end)?;
        }
        if let Some(target) = params.cycle_target {
            plan.cycle_target = validate_positive("cycle_target", target)?;
        }
        if let Some(important) = params.important {
            plan.important = important;
        }
        if let Some(target) = params.lifetime_target_change()? {
            if lifecycle::set_lifetime_target(&mut plan, target)? {
                info!("Plan {} ended by its new lifetime target", plan.id);
            }
        }

        debug!("Updated plan {}", plan.id);
        self.commit_plan(plan)
    }

    /// Removes a plan together with every task it spawned. History is
    /// kept.
    pub fn delete_plan(&mut self, id: u64) -> Result<DeletedPlan> {
        let index = self
            .plans
            .iter()
            .position(|p| p.id == id)
            .ok_or(CadenceError::PlanNotFound { id })?;
        let plan = self.plans.remove(index);

        let before = self.tasks.len();
        self.tasks.retain(|t| t.source_plan_id != Some(id));
        let removed = before - self.tasks.len();
        debug!("Deleted plan {id} and {removed} spawned task(s)");

        self.queue(Change::DeletePlan(id));
        self.queue_counters();
        Ok(DeletedPlan {
            plan,
            removed_tasks: removed,
        })
    }

    /// Pauses or resumes a plan. Setting the current value changes nothing.
    pub fn set_plan_active(&mut self, id: u64, active: bool) -> Result<Plan> {
        let mut plan = self.plan(id)?.clone();
        if !lifecycle::set_active(&mut plan, active)? {
            return Ok(plan);
        }
        debug!("Plan {id} is now {}", plan.state());
        self.commit_plan(plan)
    }

    pub fn toggle_plan_important(&mut self, id: u64) -> Result<Plan> {
        let mut plan = self.plan(id)?.clone();
        plan.important = !plan.important;
        self.commit_plan(plan)
    }

    /// Credits an active plan with one completion and records
    /// `plan_completed`.
    pub fn complete_plan_once(&mut self, id: u64) -> Result<Plan> {
        let mut plan = self.plan(id)?.clone();
        let credit = lifecycle::complete_once(&mut plan)?;
        if credit.ended {
            info!("Plan {id} reached its lifetime target and ended");
        }
        let plan = self.commit_plan(plan)?;
        self.record(Event::plan_completed(&plan.title, id));
        Ok(plan)
    }

    /// Ends a plan for good and records `plan_completed` with an
    /// `(ended)` title.
    pub fn end_plan_permanently(&mut self, id: u64) -> Result<Plan> {
        let mut plan = self.plan(id)?.clone();
        lifecycle::end_permanently(&mut plan)?;
        info!("Plan {id} ended at {} completion(s)", plan.lifetime_count);
        let plan = self.commit_plan(plan)?;
        self.record(Event::plan_ended(&plan));
        Ok(plan)
    }

    /// Spawns the plan's task for `today` unless it is not due or already
    /// exists. Safe to call any number of times.
    pub fn ensure_todays_task(&mut self, plan_id: u64, today: Date) -> Result<Option<Task>> {
        let plan = self.plan(plan_id)?;
        if !spawner::needs_task(plan, today, &self.tasks) {
            return Ok(None);
        }
        let id = self.next_task_id;
        let task = spawner::spawned_task(plan, id, today);
        self.next_task_id += 1;
        debug!("Spawned task {id} from plan {plan_id} for {today}");

        self.tasks.push(task.clone());
        self.queue(Change::SaveTask(task.clone()));
        Ok(Some(task))
    }

    /// Runs the reset-then-spawn pass over every plan.
    ///
    /// All resets happen before the first spawn decision. Running the pass
    /// twice for the same day changes nothing the second time.
    pub fn refresh_plans(&mut self, today: Date) -> Result<RefreshReport> {
        let mut report = RefreshReport {
            today: Some(today),
            ..Default::default()
        };

        let mut reset_plans = Vec::new();
        for plan in &mut self.plans {
            if recurrence::reset_cycle_if_due(plan, today) {
                report.reset.push(plan.id);
                reset_plans.push(plan.clone());
            }
        }
        for plan in reset_plans {
            self.queue(Change::SavePlan(plan));
        }

        let ids: Vec<u64> = self.plans.iter().map(|p| p.id).collect();
        for id in ids {
            if let Some(task) = self.ensure_todays_task(id, today)? {
                report.spawned.push(task);
            }
        }

        if !report.reset.is_empty() || !report.spawned.is_empty() {
            info!(
                "Refresh for {today}: {} cycle reset(s), {} task(s) spawned",
                report.reset.len(),
                report.spawned.len()
            );
        }
        report.plans = self.plans.clone();
        Ok(report)
    }
}
