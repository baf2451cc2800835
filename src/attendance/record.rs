use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use getset::{CopyGetters, Getters};

use super::AttendanceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Agent,
    Tl,
    Mis,
    Field,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Present,
    Absent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AbsenceType {
    #[default]
    None,
    Sick,
    Vacation,
    Emergency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overtime {
    #[default]
    None,
    OneHour,
    TwoHours,
    ThreeHours,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Agent => "AGENT",
            Position::Tl => "TL",
            Position::Mis => "MIS",
            Position::Field => "FIELD",
        }
    }
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Present => "PRESENT",
            Status::Absent => "ABSENT",
        }
    }
}

impl AbsenceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbsenceType::None => "",
            AbsenceType::Sick => "SL",
            AbsenceType::Vacation => "VL",
            AbsenceType::Emergency => "EL",
        }
    }
}

impl Overtime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Overtime::None => "",
            Overtime::OneHour => "1 HOUR",
            Overtime::TwoHours => "2 HOURS",
            Overtime::ThreeHours => "3 HOURS",
        }
    }
}

// Text parsing is case-insensitive: older sheets were written with "Agent",
// "Field", "Present" and so on.

impl FromStr for Position {
    type Err = AttendanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AGENT" => Ok(Position::Agent),
            "TL" => Ok(Position::Tl),
            "MIS" => Ok(Position::Mis),
            "FIELD" => Ok(Position::Field),
            _ => Err(AttendanceError::InvalidField("position", s.to_string())),
        }
    }
}

impl FromStr for Status {
    type Err = AttendanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PRESENT" => Ok(Status::Present),
            "ABSENT" => Ok(Status::Absent),
            _ => Err(AttendanceError::InvalidField("status", s.to_string())),
        }
    }
}

impl FromStr for AbsenceType {
    type Err = AttendanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "" => Ok(AbsenceType::None),
            "SL" => Ok(AbsenceType::Sick),
            "VL" => Ok(AbsenceType::Vacation),
            "EL" => Ok(AbsenceType::Emergency),
            _ => Err(AttendanceError::InvalidField("absence type", s.to_string())),
        }
    }
}

impl FromStr for Overtime {
    type Err = AttendanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "" => Ok(Overtime::None),
            "1" | "1 HOUR" => Ok(Overtime::OneHour),
            "2" | "2 HOURS" => Ok(Overtime::TwoHours),
            "3" | "3 HOURS" => Ok(Overtime::ThreeHours),
            _ => Err(AttendanceError::InvalidField("overtime", s.to_string())),
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(Position, Status, AbsenceType, Overtime);

/// One row of the attendance sheet. A ledger holds at most one record per
/// `(date, agent_name)`.
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct AttendanceRecord {
    #[getset(get_copy = "pub")]
    date: NaiveDate,
    #[getset(get = "pub")]
    agent_name: String,
    #[getset(get_copy = "pub")]
    position: Position,
    #[getset(get_copy = "pub")]
    status: Status,
    #[getset(get_copy = "pub")]
    absence_type: AbsenceType,
    #[getset(get = "pub")]
    time_range: String,
    #[getset(get_copy = "pub")]
    overtime: Overtime,
}

impl AttendanceRecord {
    pub fn new(
        date: NaiveDate,
        agent_name: &str,
        position: Position,
        status: Status,
        absence_type: AbsenceType,
        time_range: &str,
        overtime: Overtime,
    ) -> Result<AttendanceRecord, AttendanceError> {
        let agent_name = agent_name.trim();
        if agent_name.is_empty() {
            return Err(AttendanceError::MissingAgentName);
        }

        Ok(AttendanceRecord {
            date,
            agent_name: agent_name.to_string(),
            position,
            status,
            absence_type,
            time_range: time_range.to_string(),
            overtime,
        })
    }

    /// Placeholder written by the autofill sweep for an agent who has not
    /// submitted anything for `date`.
    pub fn absent_placeholder(date: NaiveDate, agent_name: &str, position: Position) -> AttendanceRecord {
        AttendanceRecord {
            date,
            agent_name: agent_name.to_string(),
            position,
            status: Status::Absent,
            absence_type: AbsenceType::None,
            time_range: String::new(),
            overtime: Overtime::None,
        }
    }

    pub fn is_for(&self, date: NaiveDate, agent_name: &str) -> bool {
        self.date == date && self.agent_name == agent_name
    }
}
