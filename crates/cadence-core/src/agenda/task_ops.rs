//! Task operations for the Agenda.

use super::Agenda;
use crate::{
    error::Result,
    models::Task,
    params::{CreateTask, Id, ListTasks, UpdateTask},
};

impl Agenda {
    /// Creates a task by hand and records `task_created`.
    ///
    /// # Errors
    ///
    /// Returns `CadenceError::InvalidInput` for an empty title or an
    /// unparsable due date.
    pub async fn create_task(&self, params: &CreateTask) -> Result<Task> {
        self.mutate(|store| store.create_task(params)).await
    }

    /// Applies a partial update to a task.
    ///
    /// # Errors
    ///
    /// Returns `CadenceError::TaskNotFound` for an unknown id and
    /// `CadenceError::InvalidInput` when a field is invalid or when a
    /// spawned task would get a due date its plan already has a task for.
    pub async fn update_task(&self, params: &UpdateTask) -> Result<Task> {
        self.mutate(|store| store.update_task(params)).await
    }

    /// Permanently deletes a task and returns it.
    pub async fn delete_task(&self, params: &Id) -> Result<Task> {
        self.mutate(|store| store.delete_task(params.id)).await
    }

    /// Marks a task done, or open again.
    ///
    /// Completing a task spawned by an active plan also credits the plan.
    pub async fn toggle_task_completed(&self, params: &Id) -> Result<Task> {
        self.mutate(|store| store.toggle_task_completed(params.id))
            .await
    }

    pub async fn toggle_task_important(&self, params: &Id) -> Result<Task> {
        self.mutate(|store| store.toggle_task_important(params.id))
            .await
    }

    /// Retrieves a task by its ID.
    pub async fn get_task(&self, params: &Id) -> Result<Task> {
        self.read(|store| store.task(params.id).cloned()).await
    }

    /// Lists tasks matching `params`.
    pub async fn list_tasks(&self, params: &ListTasks) -> Vec<Task> {
        self.read(|store| store.list_tasks(params)).await
    }
}
