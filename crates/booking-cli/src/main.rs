//! `agenda` CLI — validate drafts and check a professional's day from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Validate a draft (camelCase form JSON) as of a fixed date
//! agenda validate -i draft.json --today 2024-06-10
//!
//! # Check a candidate against the day's bookings (storage rows, stdin)
//! cat bookings.json | agenda check --professional pro-1 --date 2024-06-10 \
//!     --time 10:15 --duration 30
//!
//! # Suggest open slots inside the shop's hours
//! agenda slots -i bookings.json --date 2024-06-10 --duration 30 --preferred 09:30 \
//!     --open 09:00 --close 18:00
//!
//! # Validate and check in one go
//! agenda review -d draft.json -i bookings.json --today 2024-06-10
//! ```
//!
//! Results are printed as JSON on stdout. Diagnostics go to stderr; set
//! `AGENDA_LOG=debug` to see them.

use anyhow::{Context, Result};
use booking_engine::{bookings_from_json, AppointmentDraft, BusinessHours, ExistingBooking};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "agenda",
    version,
    about = "Appointment validation and conflict checks for a barbershop agenda"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an appointment draft
    Validate {
        /// Draft JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Date treated as today (defaults to the local date)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Check a candidate appointment against the day's bookings
    Check {
        /// Professional whose agenda is being checked
        #[arg(long)]
        professional: String,
        /// Appointment date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Start time (HH:mm)
        #[arg(long)]
        time: String,
        /// Duration in minutes
        #[arg(long)]
        duration: u32,
        /// Booking being edited; it does not conflict with itself
        #[arg(long)]
        exclude: Option<String>,
        /// Bookings JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        #[command(flatten)]
        hours: HoursArgs,
    },
    /// Suggest open start times near a preferred time
    Slots {
        /// Appointment date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Duration in minutes
        #[arg(long)]
        duration: u32,
        /// Preferred start time (HH:mm)
        #[arg(long)]
        preferred: String,
        /// Bookings JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        #[command(flatten)]
        hours: HoursArgs,
    },
    /// Validate a draft and check it against the day's bookings
    Review {
        /// Draft JSON file
        #[arg(short, long)]
        draft: String,
        /// Bookings JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Booking being edited; it does not conflict with itself
        #[arg(long)]
        exclude: Option<String>,
        /// Date treated as today (defaults to the local date)
        #[arg(long)]
        today: Option<NaiveDate>,
        #[command(flatten)]
        hours: HoursArgs,
    },
}

/// Business hours used to search for alternative slots.
#[derive(Args)]
struct HoursArgs {
    /// Opening time (HH:mm)
    #[arg(long, env = "AGENDA_OPEN", default_value = "08:00")]
    open: String,
    /// Closing time (HH:mm)
    #[arg(long, env = "AGENDA_CLOSE", default_value = "19:00")]
    close: String,
    /// Minutes between candidate start times
    #[arg(long, env = "AGENDA_STEP", default_value_t = 30)]
    step: u32,
}

impl HoursArgs {
    fn resolve(&self) -> Result<BusinessHours> {
        let hours = BusinessHours::from_opening_times(&self.open, &self.close)
            .with_context(|| format!("Invalid business hours {}-{}", self.open, self.close))?;
        hours.with_step(self.step).context("Invalid slot step")
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("AGENDA_LOG").unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let output = match cli.command {
        Commands::Validate { input, today } => {
            let draft = read_draft(input.as_deref())?;
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            to_json(&booking_engine::validate_at(&draft, today), cli.pretty)?
        }
        Commands::Check {
            professional,
            date,
            time,
            duration,
            exclude,
            input,
            hours,
        } => {
            let bookings = read_bookings(input.as_deref())?;
            let result = booking_engine::check_conflicts_with_hours(
                &professional,
                date,
                &time,
                duration,
                &bookings,
                exclude.as_deref(),
                &hours.resolve()?,
            )
            .context("Failed to check conflicts")?;
            to_json(&result, cli.pretty)?
        }
        Commands::Slots {
            date,
            duration,
            preferred,
            input,
            hours,
        } => {
            let bookings = read_bookings(input.as_deref())?;
            let slots = booking_engine::find_available_slots(
                &bookings,
                date,
                duration,
                &preferred,
                &hours.resolve()?,
            )
            .context("Failed to search for slots")?;
            to_json(&slots, cli.pretty)?
        }
        Commands::Review {
            draft,
            input,
            exclude,
            today,
            hours,
        } => {
            let draft = read_draft(Some(draft.as_str()))?;
            let bookings = read_bookings(input.as_deref())?;
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            let review = booking_engine::review_draft(
                &draft,
                &bookings,
                exclude.as_deref(),
                today,
                &hours.resolve()?,
            )
            .context("Failed to review draft")?;
            to_json(&review, cli.pretty)?
        }
    };

    println!("{}", output);
    Ok(())
}

fn read_draft(path: Option<&str>) -> Result<AppointmentDraft> {
    let json = read_input(path)?;
    AppointmentDraft::from_json(&json).context("Failed to parse draft JSON")
}

fn read_bookings(path: Option<&str>) -> Result<Vec<ExistingBooking>> {
    let json = read_input(path)?;
    let bookings = bookings_from_json(&json).context("Failed to parse bookings JSON")?;
    debug!(count = bookings.len(), "loaded bookings");
    Ok(bookings)
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
