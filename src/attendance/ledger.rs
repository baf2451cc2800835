use std::collections::BTreeSet;
use std::slice::Iter;

use chrono::{NaiveDate, NaiveTime};
use log::debug;

use super::commands::Command;
use super::record::AttendanceRecord;
use super::roster::AgentRoster;
use super::{AttendanceError, ExecutableCommand, Outcome};

/// Time of day after which agents without a row are assumed absent.
pub fn default_cutoff() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).expect("09:00 is a valid time")
}

/// Attendance sheet held in memory, ordered by insertion.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AttendanceLedger {
    pub records: Vec<AttendanceRecord>,
}

impl AttendanceLedger {
    pub fn new() -> AttendanceLedger {
        AttendanceLedger { records: Vec::new() }
    }

    /// Builds a ledger from rows in file order. A later row for the same
    /// `(date, agent)` replaces an earlier one.
    pub fn from_records(records: impl IntoIterator<Item = AttendanceRecord>) -> AttendanceLedger {
        let mut ledger = AttendanceLedger::new();
        for record in records {
            ledger.upsert(record);
        }
        ledger
    }

    pub fn execute(&mut self, command: Command) -> Result<Outcome, AttendanceError> {
        command.execute(self)
    }

    /// Removes any record with the same `(date, agent)` and appends `record`
    /// at the end. Returns the replaced record.
    pub fn upsert(&mut self, record: AttendanceRecord) -> Option<AttendanceRecord> {
        let existing = self
            .records
            .iter()
            .position(|existing| existing.is_for(record.date(), record.agent_name()));
        let replaced = existing.map(|idx| self.records.remove(idx));

        if let Some(old) = &replaced {
            debug!(
                "replacing record, date={}, agent={}, old_status={}",
                old.date(),
                old.agent_name(),
                old.status()
            );
        }

        self.records.push(record);
        replaced
    }

    /// Marks every roster agent without a row for `today` as absent, but
    /// only once `now` has reached `cutoff`. Returns the number of
    /// placeholders inserted; a second sweep inserts nothing.
    pub fn autofill_absences(
        &mut self,
        roster: &AgentRoster,
        today: NaiveDate,
        now: NaiveTime,
        cutoff: NaiveTime,
    ) -> usize {
        if now < cutoff {
            return 0;
        }

        let mut inserted = 0;
        for entry in roster.iter() {
            if self.find(today, &entry.name).is_some() {
                continue;
            }

            self.upsert(AttendanceRecord::absent_placeholder(today, &entry.name, entry.position));
            inserted += 1;
        }

        if inserted > 0 {
            debug!("autofilled absences, date={}, count={}", today, inserted);
        }

        inserted
    }

    pub fn find(&self, date: NaiveDate, agent_name: &str) -> Option<&AttendanceRecord> {
        self.records.iter().find(|record| record.is_for(date, agent_name))
    }

    pub fn filter_by_date(&self, date: NaiveDate) -> Vec<&AttendanceRecord> {
        self.records.iter().filter(|record| record.date() == date).collect()
    }

    /// Full-table positions of the rows `filter_by_date(date)` returns, in
    /// the same order.
    pub fn positions_for_date(&self, date: NaiveDate) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.date() == date)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Deletes rows by position in the full table.
    pub fn delete(&mut self, indices: &[usize]) -> Result<Vec<AttendanceRecord>, AttendanceError> {
        remove_rows(&mut self.records, indices)
    }

    /// Deletes rows by position in the `date` view. Positions are mapped back
    /// to the full table so rows of other dates are kept.
    pub fn delete_from_date(
        &mut self,
        date: NaiveDate,
        indices: &[usize],
    ) -> Result<Vec<AttendanceRecord>, AttendanceError> {
        let positions = self.positions_for_date(date);
        let mapped = indices
            .iter()
            .map(|&idx| {
                positions.get(idx).copied().ok_or(AttendanceError::RowOutOfRange {
                    index: idx,
                    len: positions.len(),
                })
            })
            .collect::<Result<Vec<usize>, AttendanceError>>()?;

        remove_rows(&mut self.records, &mapped)
    }

    pub fn reset(&mut self) {
        self.records.clear();
    }

    /// Distinct dates present in the ledger, oldest first.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.records
            .iter()
            .map(|record| record.date())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn records_iter(&self) -> Iter<AttendanceRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Removes the rows at `indices` (duplicates allowed) and returns them in
/// table order. Fails without touching `rows` if any index is out of range.
pub fn remove_rows<T>(rows: &mut Vec<T>, indices: &[usize]) -> Result<Vec<T>, AttendanceError> {
    let targets: BTreeSet<usize> = indices.iter().copied().collect();
    if let Some(&index) = targets.iter().find(|&&idx| idx >= rows.len()) {
        return Err(AttendanceError::RowOutOfRange { index, len: rows.len() });
    }

    let mut kept = Vec::with_capacity(rows.len() - targets.len());
    let mut removed = Vec::with_capacity(targets.len());
    for (idx, row) in rows.drain(..).enumerate() {
        if targets.contains(&idx) {
            removed.push(row);
        } else {
            kept.push(row);
        }
    }

    *rows = kept;
    Ok(removed)
}
