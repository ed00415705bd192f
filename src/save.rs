//! Save file: one line of four integers, `<high_score> <lives> <score> <level>`.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::entities::MAX_LEVEL;

/// Persisted high score plus an optional resumable game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SaveRecord {
    pub high_score: u32,
    pub lives: u32,
    pub score: u32,
    pub level: u32,
}

impl SaveRecord {
    /// A record holding only a high score.
    pub fn cleared(high_score: u32) -> Self {
        Self {
            high_score,
            ..Self::default()
        }
    }

    pub fn is_resumable(&self) -> bool {
        self.level > 0 && self.lives > 0
    }
}

impl fmt::Display for SaveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.high_score, self.lives, self.score, self.level
        )
    }
}

impl FromStr for SaveRecord {
    type Err = SaveError;

    /// Reads the first four whitespace-separated tokens; anything after them
    /// is ignored.  A level past the last one is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let mut next = |field: &str| -> Result<u32, SaveError> {
            let token = tokens
                .next()
                .ok_or_else(|| SaveError::InvalidSaveFormat(format!("missing {}", field)))?;
            token.parse().map_err(|_| {
                SaveError::InvalidSaveFormat(format!("{} is not a number: {:?}", field, token))
            })
        };
        let record = Self {
            high_score: next("high score")?,
            lives: next("lives")?,
            score: next("score")?,
            level: next("level")?,
        };
        if record.level > MAX_LEVEL {
            return Err(SaveError::InvalidSaveFormat(format!(
                "level {} is above {}",
                record.level, MAX_LEVEL
            )));
        }
        Ok(record)
    }
}

// ── File I/O ──────────────────────────────────────────────────────────────────

/// Read the save file, creating it with `0 0 0 0` when it doesn't exist yet.
pub fn load(path: &Path) -> Result<SaveRecord, SaveError> {
    match std::fs::read_to_string(path) {
        Ok(text) => text.parse(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let fresh = SaveRecord::default();
            store(path, &fresh)?;
            log::info!("Created save file {}", path.display());
            Ok(fresh)
        }
        Err(e) => Err(e.into()),
    }
}

/// Like [`load`], but any failure yields the default record.
pub fn load_or_default(path: &Path) -> SaveRecord {
    match load(path) {
        Ok(record) => {
            log::info!(
                "Loaded save: high score {}, resumable game: {}",
                record.high_score,
                record.is_resumable()
            );
            record
        }
        Err(e) => {
            log::warn!("Could not read save file {}: {}", path.display(), e);
            SaveRecord::default()
        }
    }
}

pub fn store(path: &Path, record: &SaveRecord) -> Result<(), SaveError> {
    std::fs::write(path, record.to_string())?;
    log::debug!("Wrote save file {}: {}", path.display(), record);
    Ok(())
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    InvalidSaveFormat(String),
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::InvalidSaveFormat(why) => write!(f, "Invalid save format: {}", why),
        }
    }
}

impl std::error::Error for SaveError {}
