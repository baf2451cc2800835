use std::slice::Iter;

use super::record::Position;
use super::AttendanceError;

#[derive(Debug, Clone)]
pub struct RosterEntry {
    pub name: String,
    pub position: Position,
}

/// Known agents and their default position, in configured order.
#[derive(Debug, Clone, Default)]
pub struct AgentRoster {
    entries: Vec<RosterEntry>,
}

impl AgentRoster {
    pub fn new() -> AgentRoster {
        AgentRoster { entries: Vec::new() }
    }

    /// A repeated name keeps its first position.
    pub fn add(&mut self, name: &str, position: Position) -> Result<(), AttendanceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AttendanceError::MissingAgentName);
        }

        if self.position_of(name).is_none() {
            self.entries.push(RosterEntry {
                name: name.to_string(),
                position,
            });
        }

        Ok(())
    }

    pub fn position_of(&self, name: &str) -> Option<Position> {
        self.entries.iter().find(|entry| entry.name == name).map(|entry| entry.position)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position_of(name).is_some()
    }

    pub fn iter(&self) -> Iter<RosterEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Position)> for AgentRoster {
    fn from_iter<I: IntoIterator<Item = (String, Position)>>(iter: I) -> Self {
        let mut roster = AgentRoster::new();
        for (name, position) in iter {
            // Blank names carry nothing to look up.
            let _ = roster.add(&name, position);
        }
        roster
    }
}
