use chrono::NaiveDate;
use thiserror::Error;

use crate::attendance::record::{AbsenceType, AttendanceRecord, Overtime, Position, Status};
use crate::attendance::roster::AgentRoster;
use crate::attendance::AttendanceError;

pub const LAST_HOUR: u32 = 24;

#[derive(Debug, PartialEq, Error)]
pub enum FormError {
    #[error("agent name is required")]
    MissingAgentName,
    #[error("agent {0:?} is not on the roster")]
    UnknownAgent(String),
    #[error("start hour {0} is outside 0..=24")]
    InvalidStartHour(u32),
    #[error("end hour {end} must be between start hour {start} and 24")]
    InvalidEndHour { start: u32, end: u32 },
    #[error("{0}")]
    Record(#[from] AttendanceError),
}

/// Raw values of the attendance form before they become a record.
#[derive(Debug, Clone)]
pub struct Submission {
    pub date: NaiveDate,
    pub agent_name: String,
    /// Overrides the roster position when set.
    pub position: Option<Position>,
    pub status: Status,
    pub absence_type: AbsenceType,
    pub start_hour: u32,
    pub end_hour: u32,
    pub overtime: Overtime,
}

impl Submission {
    pub fn new(date: NaiveDate, agent_name: &str) -> Submission {
        Submission {
            date,
            agent_name: agent_name.to_string(),
            position: None,
            status: Status::Present,
            absence_type: AbsenceType::None,
            start_hour: 8,
            end_hour: 17,
            overtime: Overtime::None,
        }
    }

    /// Validates the fields against `roster`. An empty roster accepts any
    /// name; agents missing from the roster then default to `AGENT`.
    pub fn into_record(self, roster: &AgentRoster) -> Result<AttendanceRecord, FormError> {
        let agent_name = self.agent_name.trim();
        if agent_name.is_empty() {
            return Err(FormError::MissingAgentName);
        }

        let default_position = match roster.position_of(agent_name) {
            Some(position) => position,
            None if roster.is_empty() => Position::Agent,
            None => return Err(FormError::UnknownAgent(agent_name.to_string())),
        };

        let time_range = format_time_range(self.start_hour, self.end_hour)?;

        Ok(AttendanceRecord::new(
            self.date,
            agent_name,
            self.position.unwrap_or(default_position),
            self.status,
            self.absence_type,
            &time_range,
            self.overtime,
        )?)
    }
}

/// 12-hour clock label for an hour of day; both 0 and 24 are midnight.
pub fn hour_label(hour: u32) -> String {
    let hour = hour % 24;
    let meridiem = if hour < 12 { "AM" } else { "PM" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{:02}:00 {}", display, meridiem)
}

pub fn format_time_range(start: u32, end: u32) -> Result<String, FormError> {
    if start > LAST_HOUR {
        return Err(FormError::InvalidStartHour(start));
    }

    if end < start || end > LAST_HOUR {
        return Err(FormError::InvalidEndHour { start, end });
    }

    Ok(format!("{} – {}", hour_label(start), hour_label(end)))
}
