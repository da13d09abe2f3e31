//! SQLite settings store for persistent preferences.

use super::SettingsStore;
use crate::error::SettingsError;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// SQLite-backed settings store scoped to one application id
pub struct SqliteSettings {
    conn: Mutex<Connection>,
    app_id: String,
    db_path: PathBuf,
}

impl SqliteSettings {
    /// Open or create a settings database at the given path
    pub fn open(path: &Path, app_id: &str) -> Result<Self, SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SettingsError::OpenFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        }

        let conn = Connection::open(path).map_err(|e| SettingsError::OpenFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS settings (
                app TEXT NOT NULL,
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL,
                PRIMARY KEY (app, key)
            )",
            [],
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
            app_id: app_id.to_string(),
            db_path: path.to_path_buf(),
        })
    }

    /// Location of the database file
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, SettingsError> {
        self.conn.lock().map_err(|_| {
            SettingsError::QueryFailed(format!(
                "settings connection poisoned: {}",
                self.db_path.display()
            ))
        })
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_secs() as i64
    }
}

impl SettingsStore for SqliteSettings {
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        let conn = self.lock()?;
        let value = conn
            .query_row(
                "SELECT value FROM settings WHERE app = ?1 AND key = ?2",
                params![self.app_id, key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO settings (app, key, value, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(app, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at",
            params![self.app_id, key, value, Self::now()],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SettingsError> {
        let conn = self.lock()?;
        conn.execute(
            "DELETE FROM settings WHERE app = ?1 AND key = ?2",
            params![self.app_id, key],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn values_persist_across_opens() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.db");

        {
            let store = SqliteSettings::open(&path, "ExifRemover").unwrap();
            store.set("output_folder", "/exports/clean").unwrap();
        }

        let store = SqliteSettings::open(&path, "ExifRemover").unwrap();
        assert_eq!(
            store.get("output_folder").unwrap().as_deref(),
            Some("/exports/clean")
        );
    }

    #[test]
    fn set_overwrites_previous_value() {
        let dir = TempDir::new().unwrap();
        let store = SqliteSettings::open(&dir.path().join("s.db"), "ExifRemover").unwrap();

        store.set("output_folder", "/a").unwrap();
        store.set("output_folder", "/b").unwrap();

        assert_eq!(store.get("output_folder").unwrap().as_deref(), Some("/b"));
    }

    #[test]
    fn apps_do_not_share_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("s.db");
        let ours = SqliteSettings::open(&path, "ExifRemover").unwrap();
        ours.set("output_folder", "/ours").unwrap();
        drop(ours);

        let theirs = SqliteSettings::open(&path, "SomethingElse").unwrap();
        assert_eq!(theirs.get("output_folder").unwrap(), None);
    }

    #[test]
    fn remove_deletes_value() {
        let dir = TempDir::new().unwrap();
        let store = SqliteSettings::open(&dir.path().join("s.db"), "ExifRemover").unwrap();

        store.set("output_folder", "/a").unwrap();
        store.remove("output_folder").unwrap();

        assert_eq!(store.get("output_folder").unwrap(), None);
    }

    #[test]
    fn open_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/config/settings.db");

        let store = SqliteSettings::open(&path, "ExifRemover").unwrap();

        assert!(path.exists());
        assert_eq!(store.path(), path.as_path());
    }
}
