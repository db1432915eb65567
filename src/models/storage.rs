use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::warn;

use crate::error::StorageError;

/// Key holding the saved color collection.
pub const COLORS_KEY: &str = "colors";

/// Key holding the palette collection.
pub const PALETTES_KEY: &str = "palettes";

/// Key-value persistence contract used by the store.
///
/// Each key holds one JSON document verbatim; writes replace it whole.
pub trait KeyValueBackend {
    /// Read the value stored under `key`, `None` when it was never written.
    fn read(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Replace the value stored under `key`.
    fn write(&mut self, key: &str, value: &Value) -> Result<(), StorageError>;
}

/// Backend storing each key as `<dir>/<key>.json`.
#[derive(Debug)]
pub struct JsonFileBackend {
    dir: PathBuf,
}

impl JsonFileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Directory the key files live in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueBackend for JsonFileBackend {
    fn read(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let path = self.key_path(key);
        match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(value) => Ok(Some(value)),
                Err(error) => {
                    warn!("Ignoring unreadable data at {}: {}", path.display(), error);
                    Ok(None)
                }
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(StorageError::Io(error)),
        }
    }

    fn write(&mut self, key: &str, value: &Value) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(value)?;
        fs::write(self.key_path(key), content)?;
        Ok(())
    }
}

/// In-memory backend, mostly for tests. Counts writes so callers can check
/// that no-op operations leave persistence untouched.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    entries: HashMap<String, Value>,
    writes: usize,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl KeyValueBackend for InMemoryBackend {
    fn read(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &Value) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.clone());
        self.writes += 1;
        Ok(())
    }
}
