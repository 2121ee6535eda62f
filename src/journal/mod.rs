//! Workouts kept on disk, one JSON file per calendar day.
//!
//! A journal is a directory containing files named `YYYY-MM-DD.json`, each
//! holding the text of that day's workout along with the summary that was
//! computed from it.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::language::WorkoutSummary;
use crate::regex::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub date: String,
    pub text: String,
    pub summary: WorkoutSummary,
}

#[derive(Debug)]
pub enum JournalError {
    InvalidDate(String),
    Io(PathBuf, std::io::Error),
    Malformed(PathBuf, serde_json::Error),
    Encoding(PathBuf, serde_json::Error),
}

impl fmt::Display for JournalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JournalError::InvalidDate(date) => {
                write!(f, "invalid date \"{}\", expected YYYY-MM-DD", date)
            }
            JournalError::Io(path, error) => write!(f, "{}: {}", path.display(), error),
            JournalError::Malformed(path, error) => {
                write!(f, "{}: malformed entry: {}", path.display(), error)
            }
            JournalError::Encoding(path, error) => {
                write!(f, "{}: could not encode entry: {}", path.display(), error)
            }
        }
    }
}

impl std::error::Error for JournalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            JournalError::InvalidDate(_) => None,
            JournalError::Io(_, error) => Some(error),
            JournalError::Malformed(_, error) => Some(error),
            JournalError::Encoding(_, error) => Some(error),
        }
    }
}

/// Whether the string is a plausible calendar date in `YYYY-MM-DD` form.
/// Month and day ranges are checked, month lengths are not.
pub fn is_valid_date(date: &str) -> bool {
    let re = regex!(r"^[0-9]{4}-(?:0[1-9]|1[0-2])-(?:0[1-9]|[12][0-9]|3[01])$");
    re.is_match(date)
}

fn encode(path: &Path, entry: &Entry) -> Result<String, JournalError> {
    serde_json::to_string_pretty(entry)
        .map(|json| json + "\n")
        .map_err(|error| JournalError::Encoding(path.to_path_buf(), error))
}

#[derive(Debug, Clone)]
pub struct Journal {
    directory: PathBuf,
}

impl Journal {
    pub fn new(directory: impl Into<PathBuf>) -> Journal {
        Journal {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, date: &str) -> Result<PathBuf, JournalError> {
        if !is_valid_date(date) {
            return Err(JournalError::InvalidDate(date.to_string()));
        }
        Ok(self
            .directory
            .join(format!("{}.json", date)))
    }

    /// Store the workout for a day, replacing whatever was there before.
    pub fn record(
        &self,
        date: &str,
        text: &str,
        summary: &WorkoutSummary,
    ) -> Result<Entry, JournalError> {
        let path = self.path_for(date)?;

        std::fs::create_dir_all(&self.directory)
            .map_err(|error| JournalError::Io(self.directory.clone(), error))?;

        let entry = Entry {
            date: date.to_string(),
            text: text.to_string(),
            summary: summary.clone(),
        };

        let json = encode(&path, &entry)?;
        std::fs::write(&path, json).map_err(|error| JournalError::Io(path.clone(), error))?;

        info!("Recorded {} to {}", date, path.display());
        Ok(entry)
    }

    /// The workout for a day, if one was recorded.
    pub fn load(&self, date: &str) -> Result<Option<Entry>, JournalError> {
        let path = self.path_for(date)?;

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                debug!("No entry at {}", path.display());
                return Ok(None);
            }
            Err(error) => return Err(JournalError::Io(path, error)),
        };

        let entry: Entry = serde_json::from_str(&content)
            .map_err(|error| JournalError::Malformed(path.clone(), error))?;

        Ok(Some(entry))
    }

    /// Every date that has an entry, oldest first. Files in the directory
    /// that aren't named for a date are ignored.
    pub fn dates(&self) -> Result<Vec<String>, JournalError> {
        let entries = match std::fs::read_dir(&self.directory) {
            Ok(entries) => entries,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(JournalError::Io(self.directory.clone(), error)),
        };

        let mut dates = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|error| JournalError::Io(self.directory.clone(), error))?;
            let path = entry.path();

            if path
                .extension()
                .and_then(|s| s.to_str())
                != Some("json")
            {
                continue;
            }

            if let Some(stem) = path
                .file_stem()
                .and_then(|s| s.to_str())
            {
                if is_valid_date(stem) {
                    dates.push(stem.to_string());
                }
            }
        }

        dates.sort();
        Ok(dates)
    }
}
