// Famboard command-line driver
// Runs reset passes and prints chore calendars against a household snapshot

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use famboard::models::household::HouseholdState;
use famboard::models::member::{format_member_names, MemberId};
use famboard::models::ui::CalendarView;
use famboard::services::icalendar::export;
use famboard::services::occurrence::{build_occurrence_map, compute_range, OccurrenceMap};
use famboard::services::persistence::JsonFileStore;
use famboard::services::reset::{spawn_reset_task, AutoResetScheduler};
use famboard::services::settings::{resolve_data_path, SettingsService};

#[derive(Parser)]
#[command(name = "famboard", version, about = "Household chore scheduler")]
struct Cli {
    /// Path to config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to the household JSON snapshot.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reopen completed recurring chores that are due again.
    Check,

    /// Print the chore calendar around a date.
    Calendar {
        /// day, week or month (defaults to the configured view).
        #[arg(long)]
        view: Option<CalendarView>,

        /// Focus date as YYYY-MM-DD (defaults to today).
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Emit iCalendar text instead of a listing.
        #[arg(long)]
        ics: bool,
    },

    /// Keep checking for resets until interrupted.
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let settings_service = match &cli.config {
        Some(path) => SettingsService::new(path),
        None => SettingsService::at_default_location(),
    };
    let settings = settings_service
        .load()
        .with_context(|| format!("Failed to load config {}", settings_service.path().display()))?;
    let data_path = resolve_data_path(&settings, cli.data.as_deref());
    log::info!("Using household snapshot {}", data_path.display());

    let mut store = JsonFileStore::new(data_path);

    match cli.command {
        Commands::Check => {
            let result = AutoResetScheduler::new().tick(&mut store)?;
            println!("Reset {} chore(s)", result.reset_count());
            if let Some(next) = result.next_reset_in {
                println!("Next reset in {}s", next.as_secs());
            }
        }
        Commands::Calendar { view, date, ics } => {
            let today = Local::now().date_naive();
            let focus = date.unwrap_or(today);
            let view = view.unwrap_or(settings.default_view);
            // Chores due to reopen should show as open
            let state = AutoResetScheduler::new().current_state(&mut store)?;
            let range = compute_range(view, focus, settings.week_start());
            let map = build_occurrence_map(&state, &range, today);

            if ics {
                let occurrences: Vec<_> = map.into_values().flatten().collect();
                print!("{}", export::render(&occurrences));
            } else {
                print_listing(&state, &map);
            }
        }
        Commands::Watch => {
            let store = Arc::new(Mutex::new(store));
            let handle = spawn_reset_task(
                AutoResetScheduler::new(),
                store,
                settings.reset_interval(),
            );
            tokio::signal::ctrl_c()
                .await
                .context("Failed to listen for Ctrl+C")?;
            log::info!("Shutting down");
            handle.shutdown().await;
        }
    }

    Ok(())
}

fn print_listing(state: &HouseholdState, map: &OccurrenceMap) {
    for (key, occurrences) in map {
        println!("{}", key);
        for occurrence in occurrences {
            let done = if occurrence.is_completed_today { "x" } else { " " };
            let names = member_names(state, &occurrence.assigned_to);
            let who = if names.is_empty() {
                "unassigned".to_string()
            } else {
                names
            };
            println!(
                "  [{}] {} ({}, {} pts)",
                done, occurrence.title, who, occurrence.points
            );
        }
    }
}

fn member_names(state: &HouseholdState, ids: &[MemberId]) -> String {
    let names: Vec<&str> = ids
        .iter()
        .filter_map(|id| state.member(id))
        .map(|member| member.name.as_str())
        .collect();
    format_member_names(&names)
}
