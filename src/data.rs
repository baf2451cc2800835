use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::attendance::ledger::AttendanceLedger;
use crate::attendance::record::AttendanceRecord;
use crate::attendance::AttendanceError;

/// Column headers of the attendance sheet, in file order.
pub const HEADERS: [&str; 7] = [
    "DATE",
    "NAME OF AGENT",
    "POSITION",
    "STATUS",
    "TYPE OF ABSENT",
    "TIME",
    "OT TIME",
];

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unexpected header row {0:?}")]
    UnexpectedHeaders(Vec<String>),
    #[error("line {line}: {source}")]
    MalformedRow { line: u64, source: csv::Error },
    #[error("line {line}: {source}")]
    InvalidRecord { line: u64, source: AttendanceError },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AttendanceRow {
    #[serde(rename = "DATE")]
    pub date: NaiveDate,
    #[serde(rename = "NAME OF AGENT")]
    pub agent_name: String,
    #[serde(rename = "POSITION")]
    pub position: String,
    #[serde(rename = "STATUS")]
    pub status: String,
    #[serde(rename = "TYPE OF ABSENT", default)]
    pub absence_type: String,
    #[serde(rename = "TIME", default)]
    pub time: String,
    #[serde(rename = "OT TIME", default)]
    pub ot_time: String,
}

impl From<&AttendanceRecord> for AttendanceRow {
    fn from(record: &AttendanceRecord) -> Self {
        AttendanceRow {
            date: record.date(),
            agent_name: record.agent_name().clone(),
            position: record.position().to_string(),
            status: record.status().to_string(),
            absence_type: record.absence_type().to_string(),
            time: record.time_range().clone(),
            ot_time: record.overtime().to_string(),
        }
    }
}

impl TryFrom<AttendanceRow> for AttendanceRecord {
    type Error = AttendanceError;

    fn try_from(row: AttendanceRow) -> Result<Self, Self::Error> {
        AttendanceRecord::new(
            row.date,
            &row.agent_name,
            row.position.parse()?,
            row.status.parse()?,
            row.absence_type.parse()?,
            &row.time,
            row.ot_time.parse()?,
        )
    }
}

/// Reads the sheet at `path`. A missing file is an empty ledger; any row
/// that fails to parse aborts the load.
pub fn load(path: &Path) -> Result<AttendanceLedger> {
    if !path.exists() {
        debug!("no attendance sheet yet, path={}", path.display());
        return Ok(AttendanceLedger::new());
    }

    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let ledger = read_csv(file).with_context(|| format!("failed to load {}", path.display()))?;
    debug!("loaded attendance sheet, path={}, rows={}", path.display(), ledger.len());

    Ok(ledger)
}

pub fn read_csv<R: io::Read>(reader: R) -> Result<AttendanceLedger, StoreError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|source| StoreError::MalformedRow { line: 1, source })?;
    if !headers.is_empty() && headers.iter().ne(HEADERS.iter().copied()) {
        return Err(StoreError::UnexpectedHeaders(headers.iter().map(String::from).collect()));
    }

    let mut records = Vec::new();
    for (idx, row) in csv_reader.deserialize::<AttendanceRow>().enumerate() {
        // Data starts on the line after the header.
        let line = idx as u64 + 2;
        let row = row.map_err(|source| StoreError::MalformedRow { line, source })?;
        let record = row
            .try_into()
            .map_err(|source| StoreError::InvalidRecord { line, source })?;
        records.push(record);
    }

    Ok(AttendanceLedger::from_records(records))
}

/// Writes the header and one row per record. The header is written even for
/// an empty view.
pub fn write_csv<'a, W, I>(writer: W, records: I) -> Result<()>
where
    W: io::Write,
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    let mut csv_writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    csv_writer.write_record(HEADERS)?;
    for record in records {
        let row: AttendanceRow = record.into();
        csv_writer.serialize(row)?;
    }

    csv_writer.flush()?;

    Ok(())
}

/// Rewrites the whole sheet. Rows go to a sibling temporary file that is
/// renamed over `path` once complete.
pub fn save(path: &Path, ledger: &AttendanceLedger) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let tmp_path = temporary_path(path);
    {
        let mut file = File::create(&tmp_path).with_context(|| format!("failed to create {}", tmp_path.display()))?;
        write_csv(&mut file, ledger.records_iter())?;
        file.flush()?;
        file.sync_all()?;
    }

    fs::rename(&tmp_path, path).with_context(|| format!("failed to replace {}", path.display()))?;
    debug!("saved attendance sheet, path={}, rows={}", path.display(), ledger.len());

    Ok(())
}

/// Removes the sheet and returns an empty ledger.
pub fn reset(path: &Path) -> Result<AttendanceLedger> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("failed to remove {}", path.display()))?;
        info!("removed attendance sheet, path={}", path.display());
    }

    Ok(AttendanceLedger::new())
}

pub fn export_file_name(date: NaiveDate, filtered: bool) -> String {
    if filtered {
        format!("Filtered_Attendance_{}.csv", date)
    } else {
        format!("Attendance_{}.csv", date)
    }
}

/// Writes the view to `dir` and returns the path of the exported file.
pub fn export<'a, I>(dir: &Path, date: NaiveDate, filtered: bool, records: I) -> Result<PathBuf>
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(export_file_name(date, filtered));
    let file = File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
    write_csv(file, records)?;
    info!("exported attendance, path={}", path.display());

    Ok(path)
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|name| name.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
