//! Command-line interface definitions using clap
//!
//! Argument structs carry clap derives and convert into the core parameter
//! types with `From` implementations, so the core stays free of CLI
//! concerns:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Agenda
//! ```

use std::path::PathBuf;

use cadence_core::{
    models::{Cycle, PlanState, Priority, SortBy, Theme},
    params::*,
};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use jiff::civil::Date;

/// Cadence keeps one-off tasks next to recurring plans
///
/// Plans spawn a task on each day they occur. Completing that task credits
/// the plan toward its per-cycle and lifetime targets. Every invocation
/// first refreshes the plans for today.
#[derive(Parser)]
#[command(version, about, name = "cadence")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/cadence/cadence.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Store data as JSON documents in this directory instead of SQLite
    #[arg(long, global = true, conflicts_with = "database_file")]
    pub json_dir: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub today: Option<Date>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Cadence CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage tasks
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Manage recurring plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Show the activity history, newest first
    #[command(alias = "h")]
    History(HistoryArgs),
    /// Show or change preferences
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
}

// ============================================================================
// Value enums
// ============================================================================

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
}

impl From<PriorityArg> for Priority {
    fn from(val: PriorityArg) -> Self {
        match val {
            PriorityArg::Low => Priority::Low,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::High => Priority::High,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum CycleArg {
    Daily,
    Weekly,
    Monthly,
}

impl From<CycleArg> for Cycle {
    fn from(val: CycleArg) -> Self {
        match val {
            CycleArg::Daily => Cycle::Daily,
            CycleArg::Weekly => Cycle::Weekly,
            CycleArg::Monthly => Cycle::Monthly,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum PlanStateArg {
    InCycle,
    CycleDone,
    Paused,
    Ended,
}

impl From<PlanStateArg> for PlanState {
    fn from(val: PlanStateArg) -> Self {
        match val {
            PlanStateArg::InCycle => PlanState::InCycle,
            PlanStateArg::CycleDone => PlanState::CycleDone,
            PlanStateArg::Paused => PlanState::Paused,
            PlanStateArg::Ended => PlanState::Ended,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum SortByArg {
    Date,
    Priority,
    Name,
}

impl From<SortByArg> for SortBy {
    fn from(val: SortByArg) -> Self {
        match val {
            SortByArg::Date => SortBy::Date,
            SortByArg::Priority => SortBy::Priority,
            SortByArg::Name => SortBy::Name,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Dark,
    Light,
    System,
}

impl From<ThemeArg> for Theme {
    fn from(val: ThemeArg) -> Self {
        match val {
            ThemeArg::Dark => Theme::Dark,
            ThemeArg::Light => Theme::Light,
            ThemeArg::System => Theme::System,
        }
    }
}

// ============================================================================
// Task arguments
// ============================================================================

/// Identifies a task or plan by ID
#[derive(ClapArgs)]
pub struct IdArgs {
    /// Unique identifier of the task or plan
    pub id: u64,
}

impl From<IdArgs> for Id {
    fn from(val: IdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Create a task by hand
#[derive(ClapArgs)]
pub struct CreateTaskArgs {
    /// Title of the task
    pub title: String,
    /// Free-form notes
    #[arg(short, long)]
    pub description: Option<String>,
    /// Category label
    #[arg(short, long)]
    pub category: Option<String>,
    /// Priority of the task
    #[arg(short, long, value_enum)]
    pub priority: Option<PriorityArg>,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,
    /// Star the task
    #[arg(short, long)]
    pub important: bool,
}

impl From<CreateTaskArgs> for CreateTask {
    fn from(val: CreateTaskArgs) -> Self {
        CreateTask {
            title: val.title,
            description: val.description,
            category: val.category,
            important: val.important,
            priority: val.priority.map(Into::into),
            due_date: val.due,
        }
    }
}

/// List tasks
///
/// Without `--done` or `--open` the `show_completed` setting decides whether
/// completed tasks are listed.
#[derive(ClapArgs)]
pub struct ListTasksArgs {
    /// Only tasks whose title or description contains this text
    #[arg(short, long)]
    pub search: Option<String>,
    /// Only starred tasks
    #[arg(short, long)]
    pub important: bool,
    /// Only completed tasks
    #[arg(long, conflicts_with = "open")]
    pub done: bool,
    /// Only open tasks
    #[arg(long)]
    pub open: bool,
    /// Sort order, overriding the stored preference
    #[arg(long, value_enum)]
    pub sort: Option<SortByArg>,
}

impl From<ListTasksArgs> for ListTasks {
    fn from(val: ListTasksArgs) -> Self {
        let completed = match (val.done, val.open) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        ListTasks {
            search: val.search,
            important_only: val.important,
            completed,
            sort_by: val.sort.map(Into::into),
        }
    }
}

/// Edit a task
#[derive(ClapArgs)]
pub struct UpdateTaskArgs {
    /// ID of the task to edit
    pub id: u64,
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(short, long)]
    pub description: Option<String>,
    #[arg(short, long)]
    pub category: Option<String>,
    #[arg(short, long, value_enum)]
    pub priority: Option<PriorityArg>,
    /// New due date (YYYY-MM-DD)
    #[arg(long, conflicts_with = "no_due")]
    pub due: Option<String>,
    /// Remove the due date
    #[arg(long)]
    pub no_due: bool,
}

impl From<UpdateTaskArgs> for UpdateTask {
    fn from(val: UpdateTaskArgs) -> Self {
        UpdateTask {
            id: val.id,
            title: val.title,
            description: val.description,
            category: val.category,
            important: None,
            priority: val.priority.map(Into::into),
            due_date: val.due,
            clear_due_date: val.no_due,
        }
    }
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Create a task
    #[command(aliases = ["a", "new"])]
    Add(CreateTaskArgs),
    /// List tasks
    #[command(aliases = ["l", "ls"])]
    List(ListTasksArgs),
    /// Show one task
    #[command(alias = "s")]
    Show(IdArgs),
    /// Edit a task
    #[command(alias = "e")]
    Edit(UpdateTaskArgs),
    /// Toggle a task between open and done
    #[command(alias = "d")]
    Done(IdArgs),
    /// Toggle the star on a task
    Star(IdArgs),
    /// Delete a task
    #[command(alias = "delete")]
    Rm(IdArgs),
}

// ============================================================================
// Plan arguments
// ============================================================================

/// Create a recurring plan
#[derive(ClapArgs)]
pub struct CreatePlanArgs {
    /// Title of the plan
    pub title: String,
    #[arg(short, long)]
    pub description: Option<String>,
    #[arg(short, long)]
    pub category: Option<String>,
    /// How often the cycle counter resets
    #[arg(long, value_enum, default_value = "daily")]
    pub cycle: CycleArg,
    /// Weekdays (0=Sunday..6=Saturday) or days of the month (1..31),
    /// comma-separated
    #[arg(long, value_delimiter = ',')]
    pub days: Vec<u8>,
    /// Start of the time window (HH:MM)
    #[arg(long, default_value = "09:00")]
    pub start: String,
    /// End of the time window (HH:MM)
    #[arg(long, default_value = "10:00")]
    pub end: String,
    /// Completions wanted per cycle
    #[arg(long)]
    pub per_cycle: Option<u32>,
    /// Total completions before the plan ends; unlimited when omitted
    #[arg(long)]
    pub lifetime: Option<u32>,
    /// Create the plan paused
    #[arg(long)]
    pub paused: bool,
    /// Star the plan
    #[arg(short, long)]
    pub important: bool,
}

impl From<CreatePlanArgs> for CreatePlan {
    fn from(val: CreatePlanArgs) -> Self {
        CreatePlan {
            title: val.title,
            description: val.description,
            category: val.category,
            cycle: val.cycle.into(),
            occurrence_days: val.days,
            start_time: val.start,
            end_time: val.end,
            cycle_target: val.per_cycle,
            lifetime_target: val.lifetime,
            active: !val.paused,
            important: val.important,
        }
    }
}

/// List plans
#[derive(ClapArgs)]
pub struct ListPlansArgs {
    /// Only plans in this state
    #[arg(long, value_enum)]
    pub state: Option<PlanStateArg>,
    /// Only starred plans
    #[arg(short, long)]
    pub important: bool,
    /// Only plans whose title or description contains this text
    #[arg(short, long)]
    pub search: Option<String>,
    /// Group plans by state
    #[arg(long, conflicts_with = "state")]
    pub board: bool,
}

impl From<&ListPlansArgs> for ListPlans {
    fn from(val: &ListPlansArgs) -> Self {
        ListPlans {
            state: val.state.map(Into::into),
            important_only: val.important,
            search: val.search.clone(),
        }
    }
}

/// Edit a plan's definition
#[derive(ClapArgs)]
pub struct UpdatePlanArgs {
    /// ID of the plan to edit
    pub id: u64,
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(short, long)]
    pub description: Option<String>,
    #[arg(short, long)]
    pub category: Option<String>,
    #[arg(long, value_enum)]
    pub cycle: Option<CycleArg>,
    /// Replace the occurrence days, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub days: Option<Vec<u8>>,
    #[arg(long)]
    pub start: Option<String>,
    #[arg(long)]
    pub end: Option<String>,
    #[arg(long)]
    pub per_cycle: Option<u32>,
    #[arg(long, conflicts_with = "unlimited")]
    pub lifetime: Option<u32>,
    /// Remove the lifetime target
    #[arg(long)]
    pub unlimited: bool,
}

impl From<UpdatePlanArgs> for UpdatePlan {
    fn from(val: UpdatePlanArgs) -> Self {
        UpdatePlan {
            id: val.id,
            title: val.title,
            description: val.description,
            category: val.category,
            cycle: val.cycle.map(Into::into),
            occurrence_days: val.days,
            start_time: val.start,
            end_time: val.end,
            cycle_target: val.per_cycle,
            lifetime_target: val.lifetime,
            clear_lifetime_target: val.unlimited,
            important: None,
        }
    }
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a plan
    #[command(aliases = ["a", "new"])]
    Add(CreatePlanArgs),
    /// List plans
    #[command(aliases = ["l", "ls"])]
    List(ListPlansArgs),
    /// Show one plan
    #[command(alias = "s")]
    Show(IdArgs),
    /// Edit a plan
    #[command(alias = "e")]
    Edit(UpdatePlanArgs),
    /// Stop spawning tasks until resumed
    Pause(IdArgs),
    /// Resume a paused plan
    Resume(IdArgs),
    /// Record one completion without a task
    #[command(alias = "c")]
    Complete(IdArgs),
    /// End a plan for good at its current count
    End(IdArgs),
    /// Toggle the star on a plan
    Star(IdArgs),
    /// Delete a plan and the tasks it spawned
    #[command(alias = "delete")]
    Rm(IdArgs),
    /// Show what today's refresh did
    #[command(alias = "r")]
    Refresh,
}

// ============================================================================
// History and settings arguments
// ============================================================================

#[derive(ClapArgs)]
pub struct HistoryArgs {
    /// Group records under one heading per day
    #[arg(long)]
    pub by_day: bool,
    /// Show at most this many records
    #[arg(short = 'n', long, conflicts_with = "by_day")]
    pub limit: Option<usize>,
}

/// Change preferences
#[derive(ClapArgs)]
pub struct UpdateSettingsArgs {
    /// List completed tasks by default
    #[arg(long)]
    pub show_completed: Option<bool>,
    /// Default task order
    #[arg(long, value_enum)]
    pub sort_by: Option<SortByArg>,
    /// Color theme
    #[arg(long, value_enum)]
    pub theme: Option<ThemeArg>,
    #[arg(long)]
    pub notifications: Option<bool>,
    #[arg(long)]
    pub sound: Option<bool>,
}

impl From<UpdateSettingsArgs> for UpdateSettings {
    fn from(val: UpdateSettingsArgs) -> Self {
        UpdateSettings {
            show_completed: val.show_completed,
            sort_by: val.sort_by.map(Into::into),
            theme: val.theme.map(Into::into),
            notifications: val.notifications,
            sound_enabled: val.sound,
        }
    }
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show the current preferences
    Show,
    /// Change one or more preferences
    Set(UpdateSettingsArgs),
}
