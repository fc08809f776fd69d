use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::engine::{self, TaskList};
use crate::models::Urgency;
use crate::scoring::{ScoringClient, ScoringError};
use crate::store::{StateStore, StoreError};

#[derive(Parser)]
#[command(name = "atomik")]
#[command(about = "Habit and task tracker with points, levels and streaks")]
#[command(version)]
pub struct Cli {
    /// Use development mode (uses separate dev config/state)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch interactive TUI (default if no subcommand)
    Tui,
    /// Quickly add a task to today's list (or tomorrow's plan)
    AddTask {
        /// Task name
        name: String,
        /// Urgency: low, medium or high
        #[arg(long, default_value = "medium")]
        urgency: String,
        /// Add to tomorrow's plan instead of today
        #[arg(long)]
        tomorrow: bool,
    },
    /// Quickly add a recurring habit
    AddHabit {
        /// Habit name
        name: String,
        /// Points earned per completion
        #[arg(long, default_value_t = 10)]
        points: i64,
    },
    /// Score free-text tasks with the point-assignment service and add them
    /// to tomorrow's plan
    Plan {
        /// Task descriptions, one per argument
        tasks: Vec<String>,
    },
    /// Print level, XP, streak and weekly progress
    Stats,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("State error: {0}")]
    Store(#[from] StoreError),
    #[error("Scoring error: {0}")]
    Scoring(#[from] ScoringError),
    #[error("{0}")]
    InvalidUrgency(String),
}

/// Handle the add-task command
pub fn handle_add_task(
    name: String,
    urgency: String,
    tomorrow: bool,
    store: &StateStore,
) -> Result<(), CliError> {
    let urgency: Urgency = urgency.parse().map_err(CliError::InvalidUrgency)?;
    let list = if tomorrow { TaskList::Tomorrow } else { TaskList::Today };

    let state = store.load_or_default();
    let outcome = engine::add_task(&state, list, &name, urgency);
    report_and_save(outcome, store, "Task added")?;
    Ok(())
}

/// Handle the add-habit command
pub fn handle_add_habit(name: String, points: i64, store: &StateStore) -> Result<(), CliError> {
    let state = store.load_or_default();
    let outcome = engine::add_habit(&state, &name, points);
    report_and_save(outcome, store, "Habit added")?;
    Ok(())
}

/// Handle the plan command: one scoring-service call, then a single batch
/// insert (all generated tasks are added, or none are).
pub fn handle_plan(
    tasks: Vec<String>,
    store: &StateStore,
    config: &crate::config::ScoringConfig,
) -> Result<(), CliError> {
    let raw = tasks.join("\n");
    let client = ScoringClient::from_config(config)?;
    let scored = client.assign_points(&raw)?;

    let state = store.load_or_default();
    let outcome = engine::add_generated_tasks(&state, &scored);
    report_and_save(outcome, store, "Tasks planned")?;

    for task in &scored {
        println!("  {} pts  {}", task.points, task.name);
    }
    Ok(())
}

/// Handle the stats command
pub fn handle_stats(store: &StateStore) -> Result<(), CliError> {
    let state = store.load_or_default();
    let info = engine::level_info(state.total_xp);

    println!("Level {} ({} / {} XP to next level)", info.level, info.xp, info.xp_to_next_level);
    println!("Weekly points: {} / {}", state.weekly_points, state.weekly_goal);
    println!("Daily streak: {} days", state.daily_streak);
    println!(
        "Today: {} of {} tasks done, {} of {} habits done",
        state.today_tasks.iter().filter(|t| t.completed).count(),
        state.today_tasks.len(),
        state.habits.iter().filter(|h| h.completed).count(),
        state.habits.len(),
    );
    Ok(())
}

/// Commit a transition from a CLI handler: print the advisory if the engine
/// rejected it, otherwise save and print a success line.
fn report_and_save(
    outcome: engine::Outcome,
    store: &StateStore,
    success: &str,
) -> Result<(), CliError> {
    if outcome.changed {
        store.save(&outcome.state)?;
        match outcome.notice {
            Some(notice) => println!("{}", notice),
            None => println!("{}", success),
        }
    } else if let Some(notice) = outcome.notice {
        println!("{}", notice);
    }
    Ok(())
}
