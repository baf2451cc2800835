use std::path::Path;

use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveTime};
use clap::Parser;
use log::{debug, warn};

use attendo::args::{Action, Args};
use attendo::attendance::commands::{Autofill, Command, Delete, DeleteScope, Submit};
use attendo::attendance::ledger::AttendanceLedger;
use attendo::attendance::roster::AgentRoster;
use attendo::attendance::Outcome;
use attendo::config::Config;
use attendo::form::{FormError, Submission};
use attendo::{data, render};

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let config = Config::load(&args.config)?;
    let store = args.store.clone().unwrap_or_else(|| config.store_path.clone());
    let roster = config.roster()?;
    let cutoff = config.cutoff()?;

    let now = Local::now().naive_local();
    let (today, clock) = (now.date(), now.time());
    debug!("store={}, cutoff={}, agents={}", store.display(), cutoff, roster.len());

    match args.command {
        Action::Submit {
            name,
            position,
            status,
            absence,
            start,
            end,
            overtime,
            date,
        } => {
            let submission = Submission {
                date: date.unwrap_or(today),
                agent_name: name,
                position,
                status,
                absence_type: absence.unwrap_or_default(),
                start_hour: start,
                end_hour: end,
                overtime: overtime.unwrap_or_default(),
            };

            let record = match submission.into_record(&roster) {
                Ok(record) => record,
                Err(FormError::MissingAgentName) => {
                    warn!("no agent name given, nothing recorded");
                    return Ok(());
                },
                Err(err) => return Err(err.into()),
            };

            let mut ledger = data::load(&store)?;
            sweep(&mut ledger, &roster, today, clock, cutoff)?;
            ledger.execute(Command::Submit(Submit::new(record)))?;
            data::save(&store, &ledger)?;
            println!("Attendance has been recorded successfully!");
        },

        Action::Show { date } => {
            let mut ledger = data::load(&store)?;
            if sweep(&mut ledger, &roster, today, clock, cutoff)? {
                data::save(&store, &ledger)?;
            }

            match date {
                Some(date) => print!("{}", render::render_table(ledger.filter_by_date(date))),
                None => print!("{}", render::render_table(ledger.records_iter())),
            }
        },

        Action::Delete { date, indices } => {
            let mut ledger = data::load(&store)?;
            let scope = date.map_or(DeleteScope::All, DeleteScope::Date);
            if let Outcome::Deleted(removed) = ledger.execute(Command::Delete(Delete::new(scope, indices)))? {
                data::save(&store, &ledger)?;
                println!("Deleted {} row(s).", removed.len());
            }
        },

        Action::Autofill { date, at } => {
            let mut ledger = data::load(&store)?;
            if sweep(&mut ledger, &roster, date.unwrap_or(today), at.unwrap_or(clock), cutoff)? {
                data::save(&store, &ledger)?;
            }
        },

        Action::Export { date, out_dir } => {
            let ledger = data::load(&store)?;
            let dir = out_dir.unwrap_or_else(|| config.export_directory.clone());
            let path = match date {
                Some(date) => data::export(&dir, date, true, ledger.filter_by_date(date))?,
                None => data::export(&dir, today, false, ledger.records_iter())?,
            };
            println!("{}", path.display());
        },

        Action::Reset => {
            data::reset(&store)?;
            println!("Attendance data has been reset!");
        },

        Action::Roster => print_roster(&roster, &args.config),
    }

    Ok(())
}

/// Runs the absence sweep and reports whether the ledger changed.
fn sweep(
    ledger: &mut AttendanceLedger,
    roster: &AgentRoster,
    today: NaiveDate,
    clock: NaiveTime,
    cutoff: NaiveTime,
) -> Result<bool> {
    let outcome = ledger.execute(Command::Autofill(Autofill::new(roster.clone(), today, clock, cutoff)))?;

    Ok(matches!(outcome, Outcome::Autofilled(inserted) if inserted > 0))
}

fn print_roster(roster: &AgentRoster, config_path: &Path) {
    if roster.is_empty() {
        println!("No agents configured in {}.", config_path.display());
        return;
    }

    for entry in roster.iter() {
        println!("{}\t{}", entry.name, entry.position);
    }
}
