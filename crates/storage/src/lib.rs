use anyhow::{Context, Result};
use serde_json::Value;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::sync::Mutex;

/// Append-only trial event log backed by a single human-readable JSON file.
///
/// The file holds one JSON array; records are only ever added to its tail,
/// in arrival order. Appends are serialized through an internal lock so
/// concurrent submissions cannot drop each other's records.
#[derive(Clone)]
pub struct EventLog {
    inner: Arc<Inner>,
}

struct Inner {
    path: PathBuf,
    append_lock: Mutex<()>,
}

impl EventLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(Inner {
                path: path.into(),
                append_lock: Mutex::new(()),
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Appends one record and returns the new log length. Prior records are
    /// never modified; a log that fails to load is left exactly as it was.
    pub async fn append(&self, record: Value) -> Result<usize> {
        let _guard = self.inner.append_lock.lock().await;
        let mut records = self.load()?;
        records.push(record);
        self.store(&records)?;
        Ok(records.len())
    }

    pub async fn read_all(&self) -> Result<Vec<Value>> {
        let _guard = self.inner.append_lock.lock().await;
        self.load()
    }

    pub async fn len(&self) -> Result<usize> {
        Ok(self.read_all().await?.len())
    }

    fn load(&self) -> Result<Vec<Value>> {
        let path = &self.inner.path;
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read event log '{}'", path.display()))?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&raw)
            .with_context(|| format!("event log '{}' is not a valid JSON array", path.display()))
    }

    fn store(&self, records: &[Value]) -> Result<()> {
        let path = &self.inner.path;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create log directory '{}'", parent.display())
                })?;
            }
        }

        let serialized =
            serde_json::to_string_pretty(records).context("failed to serialize event log")?;

        // Write to a sibling file and rename so an interrupted write never
        // leaves a truncated log behind.
        let staged = path.with_extension("tmp");
        fs::write(&staged, serialized)
            .with_context(|| format!("failed to write event log '{}'", staged.display()))?;
        fs::rename(&staged, path)
            .with_context(|| format!("failed to replace event log '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
