//! Cadence CLI Application
//!
//! Command-line host for the Cadence task and plan manager. Every
//! invocation opens the store, refreshes today's plans and runs one
//! command.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use cadence_core::{params::ListTasks, AgendaBuilder, FixedClock};
use clap::Parser;
use cli::Cli;
use log::info;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        json_dir,
        no_color,
        today,
        command,
    } = Args::parse();

    let mut builder = match json_dir {
        Some(dir) => AgendaBuilder::new().with_json_directory(dir),
        None => AgendaBuilder::new().with_database_path(database_file),
    };
    if let Some(day) = today {
        let clock = FixedClock::on_date(day).context("Invalid --today date")?;
        builder = builder.with_clock(clock);
    }

    let agenda = builder
        .build()
        .await
        .context("Failed to initialize agenda")?;

    info!("Cadence started");
    let cli = Cli::start(agenda, no_color).await?;

    match command {
        Some(Task { command }) => cli.handle_task_command(command).await,
        Some(Plan { command }) => cli.handle_plan_command(command).await,
        Some(History(args)) => {
            cli.show_history(args).await;
            Ok(())
        }
        Some(Settings { command }) => cli.handle_settings_command(command).await,
        None => {
            cli.list_tasks(&ListTasks {
                completed: Some(false),
                ..Default::default()
            })
            .await;
            Ok(())
        }
    }
}
