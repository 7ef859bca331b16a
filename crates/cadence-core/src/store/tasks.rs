//! Task CRUD and completion on the store.

use log::{debug, info, warn};

use super::{Change, Store};
use crate::{
    engine::{lifecycle, Event},
    error::{CadenceError, Result},
    models::Task,
    params::{normalize_category, validate_title, CreateTask, UpdateTask},
};

impl Store {
    pub fn task(&self, id: u64) -> Result<&Task> {
        self.tasks
            .iter()
            .find(|t| t.id == id)
            .ok_or(CadenceError::TaskNotFound { id })
    }

    fn task_mut(&mut self, id: u64) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(CadenceError::TaskNotFound { id })
    }

    /// Creates a task by hand and records `task_created`.
    pub fn create_task(&mut self, params: &CreateTask) -> Result<Task> {
        let new = params.validate()?;
        let task = Task {
            id: self.allocate_task_id(),
            title: new.title,
            description: new.description,
            category: new.category,
            completed: false,
            completed_at: None,
            important: new.important,
            priority: new.priority,
            due_date: new.due_date,
            created_at: self.clock.today(),
            source_plan_id: None,
        };
        debug!("Created task {} '{}'", task.id, task.title);

        self.tasks.push(task.clone());
        self.queue(Change::SaveTask(task.clone()));
        self.record(Event::task_created(&task));
        Ok(task)
    }

    /// Applies a partial update. All fields are validated before any of
    /// them is written.
    pub fn update_task(&mut self, params: &UpdateTask) -> Result<Task> {
        let current = self.task(params.id)?;
        let title = params.title.as_deref().map(validate_title).transpose()?;
        let due_date = params.due_date_change()?;

        if let (Some(plan_id), Some(Some(day))) = (current.source_plan_id, due_date) {
            let taken = self
                .tasks
                .iter()
                .any(|t| t.id != params.id && t.is_occurrence_of(plan_id, day));
            if taken {
                return Err(CadenceError::invalid_input("due_date").with_reason(format!(
                    "plan {plan_id} already has a task due on {day}"
                )));
            }
        }

        let task = self.task_mut(params.id)?;
        if let Some(title) = title {
            task.title = title;
        }
        if let Some(description) = &params.description {
            task.description = description.clone();
        }
        if let Some(category) = &params.category {
            task.category = normalize_category(Some(category));
        }
        if let Some(important) = params.important {
            task.important = important;
        }
        if let Some(priority) = params.priority {
            task.priority = priority;
        }
        if let Some(due_date) = due_date {
            task.due_date = due_date;
        }
        let task = task.clone();
        debug!("Updated task {}", task.id);

        self.queue(Change::SaveTask(task.clone()));
        Ok(task)
    }

    /// Removes a task. History that mentions it is kept.
    pub fn delete_task(&mut self, id: u64) -> Result<Task> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(CadenceError::TaskNotFound { id })?;
        let task = self.tasks.remove(index);
        debug!("Deleted task {id}");

        self.queue(Change::DeleteTask(id));
        self.queue_counters();
        Ok(task)
    }

    /// Flips the completed flag.
    ///
    /// Completing a task records `task_completed`; if the task was spawned
    /// by a plan that is still active, the plan is credited and
    /// `plan_completed` is recorded too. Reopening a task never takes a
    /// completion back from its plan.
    pub fn toggle_task_completed(&mut self, id: u64) -> Result<Task> {
        let now = self.now();
        let task = self.task_mut(id)?;
        task.completed = !task.completed;
        task.completed_at = task.completed.then_some(now);
        let task = task.clone();
        self.queue(Change::SaveTask(task.clone()));

        if !task.completed {
            debug!("Reopened task {id}");
            return Ok(task);
        }

        debug!("Completed task {id}");
        self.record(Event::task_completed(&task));
        if let Some(plan_id) = task.source_plan_id {
            self.credit_plan_for_task(plan_id, &task);
        }
        Ok(task)
    }

    fn credit_plan_for_task(&mut self, plan_id: u64, task: &Task) {
        let Some(plan) = self.plans.iter_mut().find(|p| p.id == plan_id) else {
            warn!(
                "Task {} was spawned by plan {plan_id}, which no longer exists; no plan credit",
                task.id
            );
            return;
        };
        let Some(credit) = lifecycle::complete_via_task(plan) else {
            warn!(
                "Plan {plan_id} is {}; task {} completed without plan credit",
                plan.state(),
                task.id
            );
            return;
        };
        if credit.ended {
            info!("Plan {plan_id} reached its lifetime target and ended");
        }
        let plan = plan.clone();
        self.queue(Change::SavePlan(plan));
        self.record(Event::plan_completed(&task.title, plan_id));
    }

    pub fn toggle_task_important(&mut self, id: u64) -> Result<Task> {
        let task = self.task_mut(id)?;
        task.important = !task.important;
        let task = task.clone();
        self.queue(Change::SaveTask(task.clone()));
        Ok(task)
    }
}
