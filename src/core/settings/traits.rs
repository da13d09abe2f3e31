//! Settings store trait definition.

use crate::error::SettingsError;

/// String key-value store for user preferences
///
/// Each store is scoped to one application identifier, so several tools can
/// share a backing file without clobbering each other's keys.
pub trait SettingsStore: Send + Sync {
    /// Read a value
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<(), SettingsError>;

    /// Delete a value. Missing keys are not an error.
    fn remove(&self, key: &str) -> Result<(), SettingsError>;
}
