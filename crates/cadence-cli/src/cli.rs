//! Command handlers
//!
//! Each handler calls one agenda operation, wraps the outcome in a display
//! type from `cadence_core::display` and hands the markdown to the
//! renderer.

use anyhow::{Context, Result};
use cadence_core::{
    display::{
        CreateResult, DeleteResult, HistoryDays, HistoryRecords, OperationStatus, Plans, Tasks,
        UpdateResult,
    },
    params::{Id, ListPlans, ListTasks, SetPlanActive, UpdatePlan, UpdateTask},
    Agenda, Clock, RefreshReport,
};
use log::debug;

use crate::{
    args::{HistoryArgs, ListPlansArgs, PlanCommands, SettingsCommands, TaskCommands},
    renderer::TerminalRenderer,
};

pub struct Cli {
    agenda: Agenda,
    renderer: TerminalRenderer,
    refresh: RefreshReport,
}

impl Cli {
    /// Runs today's refresh and returns a handler ready for one command.
    pub async fn start(agenda: Agenda, no_color: bool) -> Result<Self> {
        let refresh = agenda
            .refresh()
            .await
            .context("Failed to refresh plans")?;
        let theme = agenda.settings().await.theme;
        Ok(Self {
            agenda,
            renderer: TerminalRenderer::new(!no_color, theme),
            refresh,
        })
    }

    fn render(&self, output: impl ToString) {
        self.renderer.render(&output.to_string());
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Add(args) => {
                let task = self
                    .agenda
                    .create_task(&args.into())
                    .await
                    .context("Failed to create task")?;
                self.render(CreateResult::new(task));
            }
            TaskCommands::List(args) => self.list_tasks(&args.into()).await,
            TaskCommands::Show(args) => {
                let id: Id = args.into();
                let task = self
                    .agenda
                    .get_task(&id)
                    .await
                    .with_context(|| format!("Failed to show task {}", id.id))?;
                self.render(task);
            }
            TaskCommands::Edit(args) => {
                let params: UpdateTask = args.into();
                let task = self
                    .agenda
                    .update_task(&params)
                    .await
                    .with_context(|| format!("Failed to update task {}", params.id))?;
                self.render(UpdateResult::new(task));
            }
            TaskCommands::Done(args) => {
                let id: Id = args.into();
                let task = self
                    .agenda
                    .toggle_task_completed(&id)
                    .await
                    .with_context(|| format!("Failed to toggle task {}", id.id))?;
                let message = if task.completed {
                    format!("Task {} '{}' completed", task.id, task.title)
                } else {
                    format!("Task {} '{}' reopened", task.id, task.title)
                };
                self.render(OperationStatus::success(message));
            }
            TaskCommands::Star(args) => {
                let id: Id = args.into();
                let task = self
                    .agenda
                    .toggle_task_important(&id)
                    .await
                    .with_context(|| format!("Failed to star task {}", id.id))?;
                let verb = if task.important { "starred" } else { "unstarred" };
                self.render(OperationStatus::success(format!(
                    "Task {} '{}' {verb}",
                    task.id, task.title
                )));
            }
            TaskCommands::Rm(args) => {
                let id: Id = args.into();
                let task = self
                    .agenda
                    .delete_task(&id)
                    .await
                    .with_context(|| format!("Failed to delete task {}", id.id))?;
                self.render(DeleteResult::new(task));
            }
        }
        Ok(())
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Add(args) => {
                let plan = self
                    .agenda
                    .create_plan(&args.into())
                    .await
                    .context("Failed to create plan")?;
                self.render(CreateResult::new(plan));
            }
            PlanCommands::List(args) => self.list_plans(&args).await,
            PlanCommands::Show(args) => {
                let id: Id = args.into();
                let plan = self
                    .agenda
                    .get_plan(&id)
                    .await
                    .with_context(|| format!("Failed to show plan {}", id.id))?;
                self.render(plan);
            }
            PlanCommands::Edit(args) => {
                let params: UpdatePlan = args.into();
                let plan = self
                    .agenda
                    .update_plan(&params)
                    .await
                    .with_context(|| format!("Failed to update plan {}", params.id))?;
                self.render(UpdateResult::new(plan));
            }
            PlanCommands::Pause(args) => self.set_active(args.id, false).await?,
            PlanCommands::Resume(args) => self.set_active(args.id, true).await?,
            PlanCommands::Complete(args) => {
                let id: Id = args.into();
                let plan = self
                    .agenda
                    .complete_plan_once(&id)
                    .await
                    .with_context(|| format!("Failed to complete plan {}", id.id))?;
                self.render(UpdateResult::with_changes(
                    plan.clone(),
                    vec![format!(
                        "Completed once: cycle {}/{}",
                        plan.cycle_count, plan.cycle_target
                    )],
                ));
            }
            PlanCommands::End(args) => {
                let id: Id = args.into();
                let plan = self
                    .agenda
                    .end_plan_permanently(&id)
                    .await
                    .with_context(|| format!("Failed to end plan {}", id.id))?;
                self.render(OperationStatus::success(format!(
                    "Plan {} '{}' ended after {} completion(s)",
                    plan.id, plan.title, plan.lifetime_count
                )));
            }
            PlanCommands::Star(args) => {
                let id: Id = args.into();
                let plan = self
                    .agenda
                    .toggle_plan_important(&id)
                    .await
                    .with_context(|| format!("Failed to star plan {}", id.id))?;
                let verb = if plan.important { "starred" } else { "unstarred" };
                self.render(OperationStatus::success(format!(
                    "Plan {} '{}' {verb}",
                    plan.id, plan.title
                )));
            }
            PlanCommands::Rm(args) => {
                let id: Id = args.into();
                let deleted = self
                    .agenda
                    .delete_plan(&id)
                    .await
                    .with_context(|| format!("Failed to delete plan {}", id.id))?;
                self.render(DeleteResult::new(deleted));
            }
            PlanCommands::Refresh => self.render(&self.refresh),
        }
        Ok(())
    }

    pub async fn handle_settings_command(&self, command: SettingsCommands) -> Result<()> {
        match command {
            SettingsCommands::Show => self.render(self.agenda.settings().await),
            SettingsCommands::Set(args) => {
                let (settings, changes) = self
                    .agenda
                    .update_settings(&args.into())
                    .await
                    .context("Failed to update settings")?;
                self.render(UpdateResult::with_changes(settings, changes));
            }
        }
        Ok(())
    }

    pub async fn show_history(&self, args: HistoryArgs) {
        if args.by_day {
            self.render(HistoryDays(self.agenda.history_by_day().await));
        } else {
            self.render(HistoryRecords(self.agenda.list_history(args.limit).await));
        }
    }

    /// Task list with an overview line and due-date notes.
    pub async fn list_tasks(&self, params: &ListTasks) {
        let today = self.agenda.clock().today();
        let tasks = self.agenda.list_tasks(params).await;
        debug!("Listing {} task(s)", tasks.len());

        let overview = self.agenda.overview(today).await;
        self.render(format!(
            "{overview}\n{}",
            Tasks::new(tasks).as_of(today)
        ));
    }

    async fn list_plans(&self, args: &ListPlansArgs) {
        if args.board {
            self.render(self.agenda.plan_board().await);
        } else {
            let params = ListPlans::from(args);
            self.render(Plans(self.agenda.list_plans(&params).await));
        }
    }

    async fn set_active(&self, id: u64, active: bool) -> Result<()> {
        let plan = self
            .agenda
            .set_plan_active(&SetPlanActive { id, active })
            .await
            .with_context(|| format!("Failed to change plan {id}"))?;
        self.render(OperationStatus::success(format!(
            "Plan {} '{}' is {}",
            plan.id,
            plan.title,
            plan.state().with_icon()
        )));
        Ok(())
    }
}
