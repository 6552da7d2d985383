//! Win-streak persistence.
//!
//! The streak lives in a JSON object under [`STREAK_KEY`]. Other keys in the
//! same file are preserved. Writes go to a temporary file that is renamed
//! over the target.

use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};

/// Storage key of the win streak.
pub const STREAK_KEY: &str = "crosswordStreak";

/// Errors that can occur while reading or writing the streak file.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum StoreError {
    #[display("failed to access {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Counts consecutive solved puzzles.
#[derive(Debug, Clone, Default)]
pub struct StreakStore {
    path: Option<PathBuf>,
    entries: Map<String, Value>,
    streak: u32,
}

impl StreakStore {
    /// Creates a store that is never written to disk.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Opens the store at `path`. A missing file starts a streak of zero.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = if path.exists() {
            read_entries(&path)?
        } else {
            Map::new()
        };
        let streak = entries.get(STREAK_KEY).map_or(0, parse_streak);
        log::debug!("loaded streak {streak} from {}", path.display());
        Ok(Self {
            path: Some(path),
            entries,
            streak,
        })
    }

    #[must_use]
    pub const fn streak(&self) -> u32 {
        self.streak
    }

    /// Increments the streak and saves it.
    pub fn record_win(&mut self) -> Result<u32, StoreError> {
        self.streak = self.streak.saturating_add(1);
        self.entries
            .insert(STREAK_KEY.to_owned(), Value::from(self.streak));
        if let Some(path) = &self.path {
            write_entries(path, &self.entries)?;
        }
        log::info!("win streak is now {}", self.streak);
        Ok(self.streak)
    }
}

fn parse_streak(value: &Value) -> u32 {
    let parsed = match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.unwrap_or_else(|| {
        log::warn!("ignoring invalid streak value {value}");
        0
    })
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_owned(),
        source,
    }
}

fn read_entries(path: &Path) -> Result<Map<String, Value>, StoreError> {
    let file = File::open(path).map_err(io_error(path))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| StoreError::Json {
        path: path.to_owned(),
        source,
    })
}

fn write_entries(path: &Path, entries: &Map<String, Value>) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }

    let mut tmp_path = path.to_owned();
    tmp_path.set_extension("json.tmp");
    {
        let file = File::create(&tmp_path).map_err(io_error(&tmp_path))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, entries).map_err(|source| StoreError::Json {
            path: tmp_path.clone(),
            source,
        })?;
        writer.flush().map_err(io_error(&tmp_path))?;
    }
    fs::rename(&tmp_path, path).map_err(io_error(path))
}
