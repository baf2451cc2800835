use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use log::{info, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::attendance::ledger::default_cutoff;
use crate::attendance::record::Position;
use crate::attendance::roster::AgentRoster;
use crate::attendance::AttendanceError;

pub const DEFAULT_CONFIG_PATH: &str = "attendo.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to parse {path}: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error("invalid cutoff {0:?}, expected HH:MM")]
    InvalidCutoff(String),
    #[error("roster entry {name:?}: {source}")]
    InvalidRosterEntry { name: String, source: AttendanceError },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RosterConfig {
    pub name: String,
    pub position: String,
}

/// Contents of `attendo.json`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(rename = "storePath")]
    pub store_path: PathBuf,
    #[serde(rename = "exportDirectory")]
    pub export_directory: PathBuf,
    /// Time of day, `HH:MM`.
    pub cutoff: String,
    pub roster: Vec<RosterConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            store_path: PathBuf::from("attendance_sheet.csv"),
            export_directory: PathBuf::from("."),
            cutoff: default_cutoff().format("%H:%M").to_string(),
            roster: Vec::new(),
        }
    }
}

impl Config {
    /// Reads the configuration at `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            warn!("no configuration at {}, using defaults with an empty roster", path.display());
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Config::from_json(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("loaded configuration, path={}, agents={}", path.display(), config.roster.len());

        Ok(config)
    }

    pub fn from_json(contents: &str) -> Result<Config, serde_json::Error> {
        serde_json::from_str(contents)
    }

    pub fn cutoff(&self) -> Result<NaiveTime, ConfigError> {
        NaiveTime::parse_from_str(self.cutoff.trim(), "%H:%M").map_err(|_| ConfigError::InvalidCutoff(self.cutoff.clone()))
    }

    pub fn roster(&self) -> Result<AgentRoster, ConfigError> {
        let mut roster = AgentRoster::new();
        for entry in &self.roster {
            let invalid = |source| ConfigError::InvalidRosterEntry {
                name: entry.name.clone(),
                source,
            };
            let position: Position = entry.position.parse().map_err(invalid)?;
            roster.add(&entry.name, position).map_err(invalid)?;
        }

        Ok(roster)
    }
}
