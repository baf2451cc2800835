use enum_dispatch::enum_dispatch;
use thiserror::Error;

pub mod commands;
pub mod ledger;
pub mod record;
pub mod roster;

#[cfg(test)]
mod ledger_tests;

use commands::{Autofill, Command, Delete, Reset, Submit};
use record::AttendanceRecord;

#[derive(Debug, PartialEq, Error)]
pub enum AttendanceError {
    #[error("agent name is required")]
    MissingAgentName,
    #[error("invalid {0}: {1:?}")]
    InvalidField(&'static str, String),
    #[error("row {index} is out of range for a view of {len} rows")]
    RowOutOfRange { index: usize, len: usize },
}

/// What a command did to the ledger.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    Recorded { replaced: Option<AttendanceRecord> },
    Autofilled(usize),
    Deleted(Vec<AttendanceRecord>),
    Reset,
}

#[enum_dispatch]
pub trait ExecutableCommand {
    fn execute(&self, ledger: &mut ledger::AttendanceLedger) -> Result<Outcome, AttendanceError>;
}
