//! `slotwise` CLI — answer availability questions from a schedule document.
//!
//! The schedule document is the JSON snapshot the booking platform stores per
//! business: weekly rules, blocked periods, bookings, and the buffer setting.
//! Owners use this to debug why a day shows no slots.
//!
//! ## Usage
//!
//! ```sh
//! # Which times can a customer book on a date? (schedule via stdin)
//! cat schedule.json | slotwise resolve --date 2026-09-07
//!
//! # Same, from a file, with a pinned clock (for reproducible output)
//! slotwise resolve -i schedule.json --date 2026-09-07 --now "2026-09-01 08:00"
//!
//! # Is the day bookable at all? (exit 0 = available, 1 = not)
//! slotwise check -i schedule.json --date 2026-09-07
//!
//! # Which days in a range should the calendar enable?
//! slotwise days -i schedule.json --from 2026-09-01 --to 2026-09-30
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use std::process;

use slotwise::resolver::{available_days, is_date_available, resolve_slots};
use slotwise::types::{format_time, parse_date, parse_datetime, Schedule};

#[derive(Parser)]
#[command(
    name = "slotwise",
    version,
    about = "Booking availability inspection for schedule documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the offerable start times for a date
    Resolve {
        /// Schedule JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Target date, YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Pin the clock ("YYYY-MM-DD HH:MM"); defaults to the system time
        #[arg(long)]
        now: Option<String>,
        /// Emit a JSON array instead of one time per line
        #[arg(long)]
        json: bool,
    },
    /// Check whether a date has any availability at all
    Check {
        /// Schedule JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Target date, YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Pin "today" (YYYY-MM-DD); defaults to the system date
        #[arg(long)]
        today: Option<String>,
    },
    /// List the available dates in an inclusive range
    Days {
        /// Schedule JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Range start, YYYY-MM-DD
        #[arg(long)]
        from: String,
        /// Range end, YYYY-MM-DD
        #[arg(long)]
        to: String,
        /// Pin "today" (YYYY-MM-DD); defaults to the system date
        #[arg(long)]
        today: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            input,
            date,
            now,
            json,
        } => {
            let schedule = read_schedule(input.as_deref())?;
            let date = parse_date(&date).context("Invalid --date")?;
            let now = match now {
                Some(raw) => parse_datetime(&raw).context("Invalid --now")?,
                None => chrono::Local::now().naive_local(),
            };

            let slots = resolve_slots(date, now, &schedule);
            if json {
                let labels: Vec<String> = slots.into_iter().map(format_time).collect();
                println!("{}", serde_json::to_string(&labels)?);
            } else {
                for slot in slots {
                    println!("{}", format_time(slot));
                }
            }
        }
        Commands::Check { input, date, today } => {
            let schedule = read_schedule(input.as_deref())?;
            let date = parse_date(&date).context("Invalid --date")?;
            let today = resolve_today(today.as_deref())?;

            if is_date_available(date, today, &schedule.rules, &schedule.blocked_periods) {
                println!("available");
            } else {
                println!("unavailable");
                process::exit(1);
            }
        }
        Commands::Days {
            input,
            from,
            to,
            today,
        } => {
            let schedule = read_schedule(input.as_deref())?;
            let from = parse_date(&from).context("Invalid --from")?;
            let to = parse_date(&to).context("Invalid --to")?;
            let today = resolve_today(today.as_deref())?;

            for day in available_days(&schedule, from, to, today) {
                println!("{}", day.format("%Y-%m-%d"));
            }
        }
    }

    Ok(())
}

fn resolve_today(raw: Option<&str>) -> Result<chrono::NaiveDate> {
    match raw {
        Some(s) => parse_date(s).context("Invalid --today"),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

fn read_schedule(path: Option<&str>) -> Result<Schedule> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
    };
    serde_json::from_str(&raw).context("Failed to parse schedule JSON")
}
