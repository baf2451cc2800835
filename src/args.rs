use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};

use crate::attendance::record::{AbsenceType, Overtime, Position, Status};
use crate::config::DEFAULT_CONFIG_PATH;

/// Daily attendance sheet: record, review, delete and export agent attendance.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON configuration holding the roster, cutoff time and file locations.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Attendance sheet to use instead of the configured one.
    #[arg(short, long)]
    pub store: Option<PathBuf>,

    /// Turn on debug logging.
    #[arg(long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Action,
}

#[derive(Subcommand, Debug)]
pub enum Action {
    /// Record attendance for an agent, replacing any earlier row for the same day.
    Submit {
        #[arg(short, long)]
        name: String,
        /// Defaults to the agent's roster position.
        #[arg(short, long)]
        position: Option<Position>,
        #[arg(long, default_value = "PRESENT")]
        status: Status,
        /// SL, VL or EL.
        #[arg(long)]
        absence: Option<AbsenceType>,
        /// Start hour, 0-24.
        #[arg(long, default_value_t = 8)]
        start: u32,
        /// End hour, start-24.
        #[arg(long, default_value_t = 17)]
        end: u32,
        /// 1, 2 or 3 hours.
        #[arg(long)]
        overtime: Option<Overtime>,
        /// Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Print the sheet, optionally only one day.
    Show {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Delete rows by the index `show` prints for the same view.
    Delete {
        /// Indices refer to this day's view instead of the whole sheet.
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(required = true)]
        indices: Vec<usize>,
    },
    /// Mark roster agents without a row as absent once the cutoff has passed.
    Autofill {
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Time of day to sweep at, HH:MM. Defaults to now.
        #[arg(long, value_parser = parse_clock)]
        at: Option<NaiveTime>,
    },
    /// Write the sheet, or one day of it, to a CSV file.
    Export {
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Defaults to the configured export directory.
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Delete the attendance sheet.
    Reset,
    /// List the configured agents.
    Roster,
}

fn parse_clock(value: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
}
