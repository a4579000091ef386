mod commands;
mod config;
mod dates;
mod logging;
mod render;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use event_tracker_core::{CalendarWidget, EventStore, Filter, YearMonth};
use tracing::debug;

use crate::config::TrackerConfig;

#[derive(Parser)]
#[command(name = "event-tracker")]
#[command(about = "Track personal events on a month calendar")]
struct Cli {
    /// Treat this date as today (YYYY-MM-DD, or e.g. "aug 28")
    #[arg(long, global = true)]
    today: Option<String>,

    /// Start with an empty calendar instead of the sample events
    #[arg(long, global = true)]
    no_demo: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log state changes to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the calendar and create, view, edit or delete events (default)
    Interactive,
    /// Print one month grid
    Month {
        /// Month to show (YYYY-MM), defaults to the month of today
        #[arg(short, long)]
        month: Option<String>,

        /// Show only All, Past or Upcoming events
        #[arg(short, long)]
        filter: Option<Filter>,
    },
    /// List events grouped by day
    Events {
        /// Show only All, Past or Upcoming events
        #[arg(short, long)]
        filter: Option<Filter>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = TrackerConfig::load()?;

    logging::init(cli.verbose, config.log_file.as_deref());
    if cli.no_color || !config.color {
        owo_colors::set_override(false);
    }

    let today = resolve_today(cli.today.as_deref())?;
    let demo = config.demo_events && !cli.no_demo;
    debug!(%today, demo, "starting");

    let store = if demo {
        EventStore::with_demo_events(today)
    } else {
        EventStore::new()
    };
    let mut widget = CalendarWidget::new(store, today)?;
    widget.set_filter(config.default_filter);

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => commands::interactive::run(widget),
        Commands::Month { month, filter } => {
            let month = month.as_deref().map(YearMonth::parse).transpose()?;
            commands::month::run(widget, month, filter)
        }
        Commands::Events { filter, json } => commands::events::run(widget, filter, json),
    }
}

fn resolve_today(arg: Option<&str>) -> Result<NaiveDate> {
    match arg {
        Some(s) => dates::parse_date(s),
        None => Ok(Local::now().date_naive()),
    }
}
