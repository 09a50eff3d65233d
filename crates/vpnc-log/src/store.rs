//! Whole-file event log store.
//!
//! Every mutation is load → push → rewrite. Each rewrite goes through a temp
//! file and a rename, so a crash never leaves a half-written document. The
//! read-modify-write cycle itself is not locked: two processes appending at
//! the same time can lose one of the updates.

use crate::codec::{decode_events, encode_events, validate_bytes};
use crate::event::Event;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Errors from reading or writing the event log.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("{path}: I/O error: {message}")]
    Io { path: String, message: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("serialization error: {0}")]
    Serialize(String),

    #[error("corrupted event log: {0}")]
    Corrupt(String),
}

impl StorageError {
    fn io(path: &Path, err: impl ToString) -> Self {
        Self::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

/// Read/append access to an ordered event sequence.
pub trait EventLog {
    fn load(&self) -> Result<Vec<Event>, StorageError>;

    fn append(&self, event: Event) -> Result<(), StorageError>;
}

/// File-backed [`EventLog`] at one caller-supplied path.
#[derive(Debug, Clone)]
pub struct EventLogStore {
    path: PathBuf,
}

impl EventLogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the log, creating it as an empty array on first access.
    pub fn load(&self) -> Result<Vec<Event>, StorageError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "initializing empty event log");
            self.save(&[])?;
            return Ok(Vec::new());
        }
        if !self.path.is_file() {
            return Err(StorageError::Corrupt(format!(
                "{}: event log path is not a file",
                self.path.display()
            )));
        }

        let bytes = fs::read(&self.path).map_err(|e| StorageError::io(&self.path, e))?;
        let text = validate_bytes(&bytes)
            .map_err(|reason| StorageError::Corrupt(format!("{}: {reason}", self.path.display())))?;
        let events = decode_events(text).map_err(|err| match err {
            StorageError::Parse(message) => {
                StorageError::Parse(format!("{}: {message}", self.path.display()))
            }
            other => other,
        })?;
        debug!(path = %self.path.display(), count = events.len(), "loaded event log");
        Ok(events)
    }

    /// Append one event and persist the full sequence.
    pub fn append(&self, event: Event) -> Result<(), StorageError> {
        self.append_all(std::slice::from_ref(&event))
    }

    /// Append several events in one rewrite.
    pub fn append_all(&self, events: &[Event]) -> Result<(), StorageError> {
        let mut current = self.load()?;
        current.extend_from_slice(events);
        self.save(&current)
    }

    /// Replace the persisted sequence.
    pub fn save(&self, events: &[Event]) -> Result<(), StorageError> {
        let path = self.path.as_path();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }

        let rendered = encode_events(events)?;
        let tmp_path = tmp_write_path(path);
        let write_result = (|| -> Result<(), StorageError> {
            let mut file = File::create(&tmp_path).map_err(|e| StorageError::io(&tmp_path, e))?;
            file.write_all(rendered.as_bytes())
                .map_err(|e| StorageError::io(&tmp_path, e))?;
            file.sync_all().map_err(|e| StorageError::io(&tmp_path, e))?;
            Ok(())
        })();

        if let Err(error) = write_result {
            let _ = fs::remove_file(&tmp_path);
            return Err(error);
        }

        fs::rename(&tmp_path, path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            StorageError::Io {
                path: format!("{} -> {}", tmp_path.display(), path.display()),
                message: e.to_string(),
            }
        })?;

        debug!(path = %path.display(), count = events.len(), "saved event log");
        Ok(())
    }
}

impl EventLog for EventLogStore {
    fn load(&self) -> Result<Vec<Event>, StorageError> {
        EventLogStore::load(self)
    }

    fn append(&self, event: Event) -> Result<(), StorageError> {
        EventLogStore::append(self, event)
    }
}

fn tmp_write_path(path: &Path) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let mut tmp: OsString = path.as_os_str().to_os_string();
    tmp.push(format!(".tmp.{}.{}", std::process::id(), unique));
    PathBuf::from(tmp)
}
