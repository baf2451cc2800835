use anyhow::{bail, Result};
use chrono::{NaiveDate, NaiveTime};
use pretty_assertions::assert_eq;

use super::commands::DeleteScope;
use super::ledger::{default_cutoff, AttendanceLedger};
use super::record::{AbsenceType, Overtime, Position, Status};
use super::roster::AgentRoster;
use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn present(day: NaiveDate, name: &str, position: Position, overtime: Overtime) -> AttendanceRecord {
    AttendanceRecord::new(
        day,
        name,
        position,
        Status::Present,
        AbsenceType::None,
        "08:00 AM – 05:00 PM",
        overtime,
    )
    .unwrap()
}

fn roster() -> AgentRoster {
    vec![("JOAN".to_string(), Position::Tl), ("MARK".to_string(), Position::Agent)]
        .into_iter()
        .collect()
}

fn names(records: &[&AttendanceRecord]) -> Vec<String> {
    records.iter().map(|record| record.agent_name().clone()).collect()
}

#[test]
fn test_upsert_appends() -> Result<()> {
    let mut ledger = AttendanceLedger::new();
    ledger.execute(Command::Submit(Submit::new(present(date(2024, 1, 10), "JOAN", Position::Tl, Overtime::None))))?;
    ledger.execute(Command::Submit(Submit::new(present(date(2024, 1, 10), "MARK", Position::Agent, Overtime::None))))?;

    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.records[0].agent_name(), "JOAN");
    assert_eq!(ledger.records[1].agent_name(), "MARK");

    Ok(())
}

#[test]
fn test_upsert_replaces_same_pair() -> Result<()> {
    let day = date(2024, 1, 10);
    let mut ledger = AttendanceLedger::new();
    ledger.upsert(present(day, "JOAN", Position::Tl, Overtime::None));
    ledger.upsert(present(day, "MARK", Position::Agent, Overtime::None));
    let replaced = ledger.upsert(present(day, "JOAN", Position::Mis, Overtime::TwoHours));

    assert_eq!(replaced, Some(present(day, "JOAN", Position::Tl, Overtime::None)));
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.filter_by_date(day).iter().filter(|r| r.agent_name() == "JOAN").count(), 1);

    // The replacement moves to the end.
    assert_eq!(ledger.records[1], present(day, "JOAN", Position::Mis, Overtime::TwoHours));

    Ok(())
}

#[test]
fn test_upsert_same_name_other_date() {
    let mut ledger = AttendanceLedger::new();
    ledger.upsert(present(date(2024, 1, 10), "JOAN", Position::Tl, Overtime::None));
    let replaced = ledger.upsert(present(date(2024, 1, 11), "JOAN", Position::Tl, Overtime::None));

    assert_eq!(replaced, None);
    assert_eq!(ledger.len(), 2);
}

#[test]
fn test_autofill_after_cutoff() {
    let day = date(2024, 1, 10);
    let roster: AgentRoster = vec![("JOAN".to_string(), Position::Tl)].into_iter().collect();
    let mut ledger = AttendanceLedger::new();

    let inserted = ledger.autofill_absences(&roster, day, time(9, 5), default_cutoff());

    assert_eq!(inserted, 1);
    assert_eq!(ledger.records, vec![AttendanceRecord::absent_placeholder(day, "JOAN", Position::Tl)]);

    let joan = &ledger.records[0];
    assert_eq!(joan.status(), Status::Absent);
    assert_eq!(joan.absence_type(), AbsenceType::None);
    assert_eq!(joan.time_range(), "");
    assert_eq!(joan.overtime(), Overtime::None);
}

#[test]
fn test_autofill_before_cutoff() {
    let mut ledger = AttendanceLedger::new();

    assert_eq!(ledger.autofill_absences(&roster(), date(2024, 1, 10), time(8, 59), default_cutoff()), 0);
    assert_eq!(ledger.is_empty(), true);

    // The cutoff itself counts as closed.
    assert_eq!(ledger.autofill_absences(&roster(), date(2024, 1, 10), time(9, 0), default_cutoff()), 2);
}

#[test]
fn test_autofill_is_idempotent() {
    let day = date(2024, 1, 10);
    let mut once = AttendanceLedger::new();
    once.upsert(present(day, "MARK", Position::Agent, Overtime::None));
    once.autofill_absences(&roster(), day, time(10, 0), default_cutoff());

    let mut twice = once.clone();
    let inserted = twice.autofill_absences(&roster(), day, time(11, 0), default_cutoff());

    assert_eq!(inserted, 0);
    assert_eq!(twice, once);
    assert_eq!(names(&once.filter_by_date(day)), vec!["MARK", "JOAN"]);
}

#[test]
fn test_autofill_ignores_other_dates() {
    let mut ledger = AttendanceLedger::new();
    ledger.upsert(present(date(2024, 1, 9), "JOAN", Position::Tl, Overtime::None));

    let inserted = ledger.autofill_absences(&roster(), date(2024, 1, 10), time(9, 30), default_cutoff());

    assert_eq!(inserted, 2);
    assert_eq!(ledger.len(), 3);
}

#[test]
fn test_submission_replaces_placeholder() -> Result<()> {
    let day = date(2024, 1, 10);
    let mut ledger = AttendanceLedger::new();
    ledger.execute(Command::Autofill(Autofill::new(roster(), day, time(9, 5), default_cutoff())))?;

    let outcome = ledger.execute(Command::Submit(Submit::new(present(day, "JOAN", Position::Tl, Overtime::None))))?;
    assert_eq!(
        outcome,
        Outcome::Recorded {
            replaced: Some(AttendanceRecord::absent_placeholder(day, "JOAN", Position::Tl))
        }
    );

    let joan: Vec<_> = ledger.records_iter().filter(|r| r.is_for(day, "JOAN")).collect();
    assert_eq!(joan.len(), 1);
    assert_eq!(joan[0].status(), Status::Present);
    assert_eq!(joan[0].time_range(), "08:00 AM – 05:00 PM");

    // A later sweep leaves the real submission alone.
    ledger.autofill_absences(&roster(), day, time(12, 0), default_cutoff());
    assert_eq!(ledger.find(day, "JOAN").unwrap().status(), Status::Present);
    assert_eq!(ledger.len(), 2);

    Ok(())
}

#[test]
fn test_filter_by_date() {
    let mut ledger = AttendanceLedger::new();
    ledger.upsert(present(date(2024, 1, 10), "JOAN", Position::Tl, Overtime::None));
    ledger.upsert(present(date(2024, 1, 11), "JOAN", Position::Tl, Overtime::None));
    ledger.upsert(present(date(2024, 1, 10), "MARK", Position::Agent, Overtime::None));

    assert_eq!(names(&ledger.filter_by_date(date(2024, 1, 10))), vec!["JOAN", "MARK"]);
    assert_eq!(ledger.filter_by_date(date(2024, 1, 12)).is_empty(), true);
    assert_eq!(ledger.positions_for_date(date(2024, 1, 10)), vec![0, 2]);
    assert_eq!(ledger.dates(), vec![date(2024, 1, 10), date(2024, 1, 11)]);
    assert_eq!(ledger.len(), 3);
}

#[test]
fn test_delete_full_table() -> Result<()> {
    let mut ledger = AttendanceLedger::new();
    for name in ["A", "B", "C", "D"] {
        ledger.upsert(present(date(2024, 1, 10), name, Position::Agent, Overtime::None));
    }

    let outcome = ledger.execute(Command::Delete(Delete::new(DeleteScope::All, vec![2, 0, 2])))?;
    match outcome {
        Outcome::Deleted(removed) => assert_eq!(removed.len(), 2),
        other => bail!("unexpected outcome {:?}", other),
    }

    let remaining: Vec<_> = ledger.records_iter().map(|r| r.agent_name().as_str()).collect();
    assert_eq!(remaining, vec!["B", "D"]);

    Ok(())
}

#[test]
fn test_delete_from_date_keeps_other_dates() -> Result<()> {
    let mut ledger = AttendanceLedger::new();
    ledger.upsert(present(date(2024, 1, 9), "JOAN", Position::Tl, Overtime::None));
    ledger.upsert(present(date(2024, 1, 10), "JOAN", Position::Tl, Overtime::None));
    ledger.upsert(present(date(2024, 1, 9), "MARK", Position::Agent, Overtime::None));
    ledger.upsert(present(date(2024, 1, 10), "MARK", Position::Agent, Overtime::None));

    // Row 1 of the 2024-01-10 view is MARK.
    let removed = ledger.delete_from_date(date(2024, 1, 10), &[1])?;

    assert_eq!(removed, vec![present(date(2024, 1, 10), "MARK", Position::Agent, Overtime::None)]);
    assert_eq!(ledger.len(), 3);
    assert_eq!(ledger.filter_by_date(date(2024, 1, 9)).len(), 2);
    assert_eq!(names(&ledger.filter_by_date(date(2024, 1, 10))), vec!["JOAN"]);

    Ok(())
}

#[test]
fn test_delete_out_of_range() -> Result<()> {
    let mut ledger = AttendanceLedger::new();
    ledger.upsert(present(date(2024, 1, 9), "JOAN", Position::Tl, Overtime::None));
    ledger.upsert(present(date(2024, 1, 10), "JOAN", Position::Tl, Overtime::None));

    if let Err(err) = ledger.execute(Command::Delete(Delete::new(DeleteScope::All, vec![0, 5]))) {
        assert_eq!(err, AttendanceError::RowOutOfRange { index: 5, len: 2 });
    } else {
        bail!("out of range rows should be rejected");
    }

    if let Err(err) = ledger.delete_from_date(date(2024, 1, 10), &[1]) {
        assert_eq!(err, AttendanceError::RowOutOfRange { index: 1, len: 1 });
    } else {
        bail!("view indices should be checked against the view");
    }

    assert_eq!(ledger.len(), 2);

    Ok(())
}

#[test]
fn test_reset() -> Result<()> {
    let mut ledger = AttendanceLedger::new();
    ledger.upsert(present(date(2024, 1, 9), "JOAN", Position::Tl, Overtime::None));

    assert_eq!(ledger.execute(Command::Reset(Reset))?, Outcome::Reset);
    assert_eq!(ledger.is_empty(), true);

    Ok(())
}

#[test]
fn test_from_records_keeps_last_duplicate() {
    let day = date(2024, 1, 10);
    let ledger = AttendanceLedger::from_records(vec![
        AttendanceRecord::absent_placeholder(day, "JOAN", Position::Tl),
        present(day, "MARK", Position::Agent, Overtime::None),
        present(day, "JOAN", Position::Tl, Overtime::ThreeHours),
    ]);

    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.find(day, "JOAN").unwrap().overtime(), Overtime::ThreeHours);
}

#[test]
fn test_record_requires_name() -> Result<()> {
    if let Err(err) = AttendanceRecord::new(
        date(2024, 1, 10),
        " ",
        Position::Agent,
        Status::Present,
        AbsenceType::None,
        "",
        Overtime::None,
    ) {
        assert_eq!(err, AttendanceError::MissingAgentName);
    } else {
        bail!("records need an agent name");
    }

    Ok(())
}

#[test]
fn test_parse_field_text() -> Result<()> {
    assert_eq!("Field".parse::<Position>()?, Position::Field);
    assert_eq!("present".parse::<Status>()?, Status::Present);
    assert_eq!("".parse::<AbsenceType>()?, AbsenceType::None);
    assert_eq!("VL".parse::<AbsenceType>()?, AbsenceType::Vacation);
    assert_eq!("2 HOURS".parse::<Overtime>()?, Overtime::TwoHours);
    assert_eq!("3".parse::<Overtime>()?, Overtime::ThreeHours);
    assert_eq!(
        "4 HOURS".parse::<Overtime>(),
        Err(AttendanceError::InvalidField("overtime", "4 HOURS".to_string()))
    );

    Ok(())
}

#[test]
fn test_roster_lookup() -> Result<()> {
    let mut roster = AgentRoster::new();
    roster.add("JOAN", Position::Tl)?;
    roster.add(" JOAN ", Position::Agent)?;

    assert_eq!(roster.len(), 1);
    assert_eq!(roster.position_of("JOAN"), Some(Position::Tl));
    assert_eq!(roster.contains("MARK"), false);
    assert_eq!(roster.add("", Position::Agent), Err(AttendanceError::MissingAgentName));

    Ok(())
}
