//! In-memory settings store for testing.

use super::SettingsStore;
use crate::error::SettingsError;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory settings store
///
/// Nothing survives the process; useful for tests and one-shot runs.
#[derive(Debug, Default)]
pub struct InMemorySettings {
    values: RwLock<HashMap<String, String>>,
}

impl InMemorySettings {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> SettingsError {
    SettingsError::QueryFailed("settings lock poisoned".to_string())
}

impl SettingsStore for InMemorySettings {
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        let values = self.values.read().map_err(|_| poisoned())?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        let mut values = self.values.write().map_err(|_| poisoned())?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SettingsError> {
        let mut values = self.values.write().map_err(|_| poisoned())?;
        values.remove(key);
        Ok(())
    }
}
