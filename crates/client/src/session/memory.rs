//! In-process session storage.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use workpro_core::SessionKey;

use super::{SessionError, SessionStore};

/// Session storage that forgets everything when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<SessionKey, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: SessionKey) -> Result<Option<String>, SessionError> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(&key).cloned())
    }

    fn set(&self, key: SessionKey, value: &str) -> Result<(), SessionError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key, value.to_owned());
        Ok(())
    }

    fn remove(&self, key: SessionKey) -> Result<(), SessionError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.remove(&key);
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.clear();
        Ok(())
    }
}
