use std::io::{self, Write};
use std::path::PathBuf;

use chrono::{Local, Timelike};
use clap::Parser;

use ember_core::{Engine, Intent, Notification, TaskId, progress_percent};

use crate::cli::{Cli, Commands};
use crate::display::{
    format_badge_earned, format_badges, format_celebration, format_metrics, format_progress,
    format_task, greeting, supports_color,
};
use crate::error::{CliError, Result};
use crate::quotes::QuoteBook;
use crate::storage::FileStore;

mod cli;
mod config;
mod display;
mod error;
mod quotes;
mod storage;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg: config::Config = confy::load("ember", None)?;
    let store = FileStore::new(PathBuf::from(&cfg.data_directory));
    let mut engine = storage::load_engine(&store);
    let use_color = supports_color();

    match cli.command {
        Commands::Add { text } => {
            let text = text.join(" ");
            let notifications = engine.apply(Intent::AddTask { text: text.clone() })?;
            if notifications.is_empty() {
                // Whitespace-only input: silent no-op
                return Ok(());
            }
            persist(&store, &engine);
            println!("Task added: {}", text.trim());
        }

        Commands::List { no_color } => {
            let use_color = !no_color && supports_color();
            let book = QuoteBook::load(&cfg.quotes_file);
            let quote = quotes::current_quote(&store, &book, cfg.quote_interval_secs);

            println!("{}!", greeting(Local::now().hour()));
            println!("\"{}\"", quote);
            println!();

            if engine.store().is_empty() {
                println!("No tasks yet. Add one with 'ember add <text>'.");
            } else {
                for task in engine.store().tasks() {
                    println!("{}", format_task(task, use_color));
                }
                println!();
                println!(
                    "{}",
                    format_progress(progress_percent(engine.store()), use_color)
                );
                println!("{}", format_metrics(engine.metrics(), use_color));
                println!("{}", format_badges(engine.badges(), use_color));
            }
        }

        Commands::Check { id } => {
            let index = engine
                .store()
                .position_of(TaskId(id))
                .ok_or(CliError::TaskNotFound(id))?;

            let notifications = engine.apply(Intent::ToggleTask { index })?;
            persist(&store, &engine);

            if let Some(task) = engine.store().get(index) {
                let status = if task.completed { "done" } else { "open" };
                println!("Marked task #{} as {}: {}", task.id, status, task.text);
            }
            react(&cfg, &store, &notifications, use_color);
        }

        Commands::Remove { id, force } => {
            let index = engine
                .store()
                .position_of(TaskId(id))
                .ok_or(CliError::TaskNotFound(id))?;
            let text = engine
                .store()
                .get(index)
                .map(|t| t.text.clone())
                .unwrap_or_default();

            if !force && !confirm(&format!("Remove task \"{}\"?", text))? {
                println!("Cancelled.");
                return Ok(());
            }

            let notifications = engine.apply(Intent::DeleteTask { index })?;
            persist(&store, &engine);
            println!("Removed: {}", text);
            react(&cfg, &store, &notifications, use_color);
        }

        Commands::Move { id, pos } => {
            let from = engine
                .store()
                .position_of(TaskId(id))
                .ok_or(CliError::TaskNotFound(id))?;
            if pos == 0 {
                return Err(CliError::validation("move", "Position is 1-based"));
            }

            let notifications = engine.apply(Intent::ReorderTask { from, to: pos - 1 })?;
            persist(&store, &engine);
            println!("Moved task #{} to position {}.", id, pos);
            react(&cfg, &store, &notifications, use_color);
        }

        Commands::Stats { no_color } => {
            let use_color = !no_color && supports_color();
            println!(
                "Tasks: {} total, {} done",
                engine.store().len(),
                engine.store().completed_count()
            );
            println!(
                "{}",
                format_progress(progress_percent(engine.store()), use_color)
            );
            println!("{}", format_metrics(engine.metrics(), use_color));
            println!("{}", format_badges(engine.badges(), use_color));
        }

        Commands::Quote => {
            let book = QuoteBook::load(&cfg.quotes_file);
            println!("\"{}\"", quotes::refresh_quote(&store, &book));
        }

        Commands::Recover { force } => {
            if !store.backup_exists() {
                return Err(CliError::storage("No backup file found"));
            }

            if !force && !confirm("Restore tasks from backup? Current tasks will be replaced.")? {
                println!("Cancelled.");
                return Ok(());
            }

            let tasks = storage::recover_tasks(&store)?;
            engine = Engine::from_snapshot(tasks, engine.badges().clone());
            persist(&store, &engine);
            println!("Recovered {} task(s) from backup.", engine.store().len());
        }
    }

    Ok(())
}

/// Render the notifications a mutation produced.
///
/// A completion refreshes the quote and celebrates; a newly earned badge
/// is announced and, when configured, mirrored as a desktop notification.
fn react(cfg: &config::Config, store: &FileStore, notifications: &[Notification], use_color: bool) {
    for notification in notifications {
        match notification {
            Notification::TaskListChanged => {}
            Notification::TaskCompleted { .. } => {
                println!("{}", format_celebration(use_color));
                let book = QuoteBook::load(&cfg.quotes_file);
                println!("\"{}\"", quotes::refresh_quote(store, &book));
            }
            Notification::MetricsChanged { metrics } => {
                println!("{}", format_metrics(*metrics, use_color));
            }
            Notification::BadgeEarned { milestone } => {
                println!("{}", format_badge_earned(*milestone, use_color));
                if cfg.desktop_notifications {
                    notify_badge(*milestone);
                }
            }
        }
    }
}

/// Persist the snapshot; a write failure is a warning, not an error
fn persist(store: &FileStore, engine: &Engine) {
    if let Err(e) = storage::save_engine(store, engine) {
        eprintln!("Warning: could not save state: {e}");
    }
}

fn notify_badge(milestone: u32) {
    notify_rust::Notification::new()
        .summary("Ember")
        .body(&format!("Badge earned: {} tasks completed! 🏅", milestone))
        .show()
        .ok();
}

/// Ask user for confirmation
fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().to_lowercase() == "y")
}
