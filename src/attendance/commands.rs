use chrono::{NaiveDate, NaiveTime};
use enum_dispatch::enum_dispatch;
use log::info;

use super::ledger::AttendanceLedger;
use super::record::AttendanceRecord;
use super::roster::AgentRoster;
use super::{AttendanceError, ExecutableCommand, Outcome};

#[enum_dispatch(ExecutableCommand)]
pub enum Command {
    Submit,
    Autofill,
    Delete,
    Reset,
}

pub struct Submit {
    record: AttendanceRecord,
}

impl Submit {
    pub fn new(record: AttendanceRecord) -> Submit {
        Submit { record }
    }
}

impl ExecutableCommand for Submit {
    fn execute(&self, ledger: &mut AttendanceLedger) -> Result<Outcome, AttendanceError> {
        let replaced = ledger.upsert(self.record.clone());
        info!(
            "recorded attendance, date={}, agent={}, status={}, replaced={}",
            self.record.date(),
            self.record.agent_name(),
            self.record.status(),
            replaced.is_some()
        );

        Ok(Outcome::Recorded { replaced })
    }
}

pub struct Autofill {
    roster: AgentRoster,
    today: NaiveDate,
    now: NaiveTime,
    cutoff: NaiveTime,
}

impl Autofill {
    pub fn new(roster: AgentRoster, today: NaiveDate, now: NaiveTime, cutoff: NaiveTime) -> Autofill {
        Autofill {
            roster,
            today,
            now,
            cutoff,
        }
    }
}

impl ExecutableCommand for Autofill {
    fn execute(&self, ledger: &mut AttendanceLedger) -> Result<Outcome, AttendanceError> {
        let inserted = ledger.autofill_absences(&self.roster, self.today, self.now, self.cutoff);
        if inserted > 0 {
            info!("marked absent after cutoff, date={}, agents={}", self.today, inserted);
        }

        Ok(Outcome::Autofilled(inserted))
    }
}

/// Which view delete indices refer to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeleteScope {
    All,
    Date(NaiveDate),
}

pub struct Delete {
    scope: DeleteScope,
    indices: Vec<usize>,
}

impl Delete {
    pub fn new(scope: DeleteScope, indices: Vec<usize>) -> Delete {
        Delete { scope, indices }
    }
}

impl ExecutableCommand for Delete {
    fn execute(&self, ledger: &mut AttendanceLedger) -> Result<Outcome, AttendanceError> {
        let removed = match self.scope {
            DeleteScope::All => ledger.delete(&self.indices)?,
            DeleteScope::Date(date) => ledger.delete_from_date(date, &self.indices)?,
        };
        info!("deleted rows, scope={:?}, count={}", self.scope, removed.len());

        Ok(Outcome::Deleted(removed))
    }
}

#[derive(Default)]
pub struct Reset;

impl ExecutableCommand for Reset {
    fn execute(&self, ledger: &mut AttendanceLedger) -> Result<Outcome, AttendanceError> {
        let dropped = ledger.len();
        ledger.reset();
        info!("attendance data has been reset, dropped={}", dropped);

        Ok(Outcome::Reset)
    }
}
