use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

use super::files::{atomic_write, read_file, snapshot_file};

/// Current on-disk schema version. Version 2 was the minute-based schema
/// (tasks only, no day window or title) and carried no version tag.
pub const SNAPSHOT_VERSION: u64 = 3;

const LEGACY_VERSION: u64 = 2;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to decode snapshot: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u64),
}

/// One persisted task row; order in the vec is display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub title: String,
    /// Committed elapsed seconds; `None` when the field was left unset
    #[serde(default)]
    pub actual_seconds: Option<u64>,
}

/// The full serialized state: tasks, day window, planner title.
/// Persisted as one unit after every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
    #[serde(default)]
    pub day_start: String,
    #[serde(default)]
    pub day_end: String,
    #[serde(default)]
    pub title: String,
}

impl Snapshot {
    /// The state a fresh install starts from
    pub fn seeded() -> Self {
        Self {
            tasks: vec![TaskRecord {
                title: "Focus Session".to_string(),
                actual_seconds: Some(3600),
            }],
            day_start: "08:00 AM".to_string(),
            day_end: "09:00 PM".to_string(),
            title: "Today's Agenda".to_string(),
        }
    }
}

/// Decode a snapshot blob, chaining migrations up to the current version.
/// A blob without a version tag is the legacy minute-based v2 schema.
pub fn decode_snapshot(raw: &str) -> Result<Snapshot, StorageError> {
    let mut value: Value = serde_json::from_str(raw)?;
    let mut version = value
        .get("version")
        .and_then(Value::as_u64)
        .unwrap_or(LEGACY_VERSION);

    if version > SNAPSHOT_VERSION {
        return Err(StorageError::UnsupportedVersion(version));
    }

    while version < SNAPSHOT_VERSION {
        value = match version {
            2 => migrate_v2_to_v3(value),
            v => return Err(StorageError::UnsupportedVersion(v)),
        };
        version += 1;
    }

    Ok(serde_json::from_value(value)?)
}

/// Encode a snapshot with its version tag
pub fn encode_snapshot(snapshot: &Snapshot) -> Result<String, StorageError> {
    #[derive(Serialize)]
    struct Tagged<'a> {
        version: u64,
        #[serde(flatten)]
        snapshot: &'a Snapshot,
    }

    Ok(serde_json::to_string_pretty(&Tagged {
        version: SNAPSHOT_VERSION,
        snapshot,
    })?)
}

/// v2 stored `actual_minutes` (possibly fractional) per task and had no
/// day window or title. Minutes become whole seconds, truncated toward
/// zero; negative or non-numeric values become unset.
fn migrate_v2_to_v3(value: Value) -> Value {
    let tasks: Vec<Value> = value
        .get("tasks")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let migrated: Vec<Value> = tasks
        .into_iter()
        .map(|task| {
            let title = task
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string();
            let seconds = task
                .get("actual_minutes")
                .and_then(Value::as_f64)
                .filter(|m| m.is_finite() && *m >= 0.0)
                .map(|m| (m * 60.0) as u64);
            serde_json::json!({ "title": title, "actual_seconds": seconds })
        })
        .collect();

    serde_json::json!({
        "tasks": migrated,
        "day_start": "08:00 AM",
        "day_end": "09:00 PM",
        "title": "Today's Agenda",
    })
}

/// Persistence port. Injected into the app so tests can swap in an
/// in-memory fake instead of touching the filesystem.
pub trait StatePort {
    fn load(&self) -> Result<Snapshot>;
    fn save(&self, snapshot: &Snapshot) -> Result<()>;
}

/// Snapshot store backed by a JSON file, written atomically
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the standard location (local `.agenda` or `~/.agenda`)
    pub fn default_location() -> Result<Self> {
        Ok(Self::at(snapshot_file()?))
    }
}

impl StatePort for FileStore {
    fn load(&self) -> Result<Snapshot> {
        let raw = read_file(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Snapshot::seeded());
        }
        Ok(decode_snapshot(&raw)?)
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let encoded = encode_snapshot(snapshot)?;
        atomic_write(&self.path, &encoded)
    }
}

/// In-memory store for tests
#[cfg(test)]
pub struct MemoryStore {
    slot: std::cell::RefCell<Option<Snapshot>>,
    pub fail_saves: bool,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self {
            slot: std::cell::RefCell::new(None),
            fail_saves: false,
        }
    }

    pub fn saved(&self) -> Option<Snapshot> {
        self.slot.borrow().clone()
    }
}

#[cfg(test)]
impl StatePort for MemoryStore {
    fn load(&self) -> Result<Snapshot> {
        Ok(self.slot.borrow().clone().unwrap_or_else(Snapshot::seeded))
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if self.fail_saves {
            anyhow::bail!("simulated storage failure");
        }
        *self.slot.borrow_mut() = Some(snapshot.clone());
        Ok(())
    }
}
