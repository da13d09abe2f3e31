//! # Settings Module
//!
//! Persists user preferences between runs.
//!
//! The only preference the EXIF remover keeps is the last output folder. It
//! is read at startup and written whenever the user picks a new folder.
//!
//! ## Backends
//! - `SqliteSettings` - Persistent storage using SQLite
//! - `InMemorySettings` - For testing

mod memory;
mod sqlite;
mod traits;

pub use memory::InMemorySettings;
pub use sqlite::SqliteSettings;
pub use traits::SettingsStore;

use crate::error::SettingsError;
use std::path::{Path, PathBuf};

/// Application identifier settings are scoped to
pub const APP_ID: &str = "ExifRemover";

/// Key holding the last output folder
pub const OUTPUT_DIR_KEY: &str = "output_folder";

/// Default location of the settings database
pub fn default_settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("exif-remover")
        .join("settings.db")
}

/// Last output folder the user chose, if any
pub fn last_output_dir(store: &dyn SettingsStore) -> Result<Option<PathBuf>, SettingsError> {
    Ok(store
        .get(OUTPUT_DIR_KEY)?
        .filter(|value| !value.is_empty())
        .map(PathBuf::from))
}

/// Remember `dir` as the output folder for future runs
pub fn remember_output_dir(store: &dyn SettingsStore, dir: &Path) -> Result<(), SettingsError> {
    store.set(OUTPUT_DIR_KEY, &dir.to_string_lossy())
}

/// Forget the remembered output folder
pub fn forget_output_dir(store: &dyn SettingsStore) -> Result<(), SettingsError> {
    store.remove(OUTPUT_DIR_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_dir_round_trips_through_store() {
        let store = InMemorySettings::new();
        assert_eq!(last_output_dir(&store).unwrap(), None);

        remember_output_dir(&store, Path::new("/exports/clean")).unwrap();

        assert_eq!(
            last_output_dir(&store).unwrap(),
            Some(PathBuf::from("/exports/clean"))
        );
    }

    #[test]
    fn empty_value_counts_as_unset() {
        let store = InMemorySettings::new();
        store.set(OUTPUT_DIR_KEY, "").unwrap();
        assert_eq!(last_output_dir(&store).unwrap(), None);
    }

    #[test]
    fn forget_clears_output_dir() {
        let store = InMemorySettings::new();
        remember_output_dir(&store, Path::new("/exports")).unwrap();

        forget_output_dir(&store).unwrap();

        assert_eq!(last_output_dir(&store).unwrap(), None);
    }

    #[test]
    fn default_path_ends_in_settings_db() {
        let path = default_settings_path();
        assert!(path.ends_with("exif-remover/settings.db"));
    }
}
