//! File-backed session storage.
//!
//! The session is a flat JSON object of strings, e.g.
//! `{"token":"...","companyId":"..."}`. The file is re-read on every access so
//! two processes sharing it see each other's writes (last write wins). Each
//! write goes to its own owner-only temp file in the same directory and is
//! renamed into place, so readers see either the old or the new file.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::debug;
use workpro_core::SessionKey;

use super::{SessionError, SessionStore};

type RawSession = BTreeMap<String, String>;

/// Session storage persisted to a JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileStore {
    /// Use `path` as the session file. It is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the session file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn load(&self) -> Result<RawSession, SessionError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(RawSession::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(RawSession::new()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn save(&self, values: &RawSession) -> Result<(), SessionError> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;

        let json = serde_json::to_vec_pretty(values)?;
        // One temp file per write; handles on the same path never share it.
        let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(|e| self.io_error(e))?;
        tmp.write_all(&json).map_err(|e| self.io_error(e))?;
        tmp.as_file().sync_all().map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        debug!(path = %self.path.display(), keys = values.len(), "Session file written");
        Ok(())
    }

    fn update(&self, apply: impl FnOnce(&mut RawSession)) -> Result<(), SessionError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut values = self.load()?;
        apply(&mut values);
        self.save(&values)
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: SessionKey) -> Result<Option<String>, SessionError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.load()?.remove(key.as_str()))
    }

    fn set(&self, key: SessionKey, value: &str) -> Result<(), SessionError> {
        self.update(|values| {
            values.insert(key.as_str().to_owned(), value.to_owned());
        })
    }

    fn remove(&self, key: SessionKey) -> Result<(), SessionError> {
        self.update(|values| {
            values.remove(key.as_str());
        })
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.update(|values| {
            for key in SessionKey::ALL {
                values.remove(key.as_str());
            }
        })
    }
}
