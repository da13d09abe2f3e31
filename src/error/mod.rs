//! # Error Module
//!
//! Error types for the EXIF remover.
//!
//! ## Taxonomy
//! - [`StripError`] - a single file could not be rebuilt. Recovered inside the
//!   batch loop and reported in the final summary, never fatal.
//! - [`ConfigError`] - the run cannot start (nothing selected, no usable
//!   output directory). Raised before any file is touched.
//! - [`BatchError`] - misuse of the processor or a dead worker thread.
//! - [`SettingsError`] - the persisted settings store failed.
//!
//! Cancellation is not an error: a cancelled run still produces a
//! [`JobResult`](crate::core::batch::JobResult).

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum ExifRemoverError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Batch error: {0}")]
    Batch(#[from] BatchError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Strip error: {0}")]
    Strip(#[from] StripError),

    #[error("Failed to write output: {0}")]
    Output(String),
}

/// Errors that occur while rebuilding a single image
#[derive(Error, Debug)]
pub enum StripError {
    #[error("Failed to open image file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("Cannot tell which format to write for {path} (unknown extension)")]
    UnsupportedOutputFormat { path: PathBuf },

    #[error("Failed to encode {path}: {reason}")]
    Encode { path: PathBuf, reason: String },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Source path has no file name: {path}")]
    InvalidSourcePath { path: PathBuf },

    #[error("Refusing to overwrite the source image {path}. Pick a different output folder.")]
    WouldOverwriteSource { path: PathBuf },
}

/// Errors that stop a run from starting
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No images selected. Please select some images first.")]
    NoFilesSelected,

    #[error("No output folder selected. Please select an output folder.")]
    NoOutputDirectory,

    #[error("The selected output folder does not exist: {path}")]
    OutputDirectoryMissing { path: PathBuf },

    #[error("The selected output folder is not a directory: {path}")]
    OutputNotADirectory { path: PathBuf },

    #[error("Invalid JPEG quality: {value} (must be 1-100)")]
    InvalidJpegQuality { value: u8 },
}

/// Errors from the batch processor itself
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("A batch is already running on this processor")]
    AlreadyRunning,

    #[error("Failed to start worker thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("The worker thread panicked before finishing the batch")]
    WorkerPanicked,
}

/// Errors from the persisted settings store
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to open settings database at {path}: {reason}")]
    OpenFailed { path: PathBuf, reason: String },

    #[error("Settings query failed: {0}")]
    QueryFailed(String),
}

impl From<rusqlite::Error> for SettingsError {
    fn from(err: rusqlite::Error) -> Self {
        SettingsError::QueryFailed(err.to_string())
    }
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, ExifRemoverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_error_includes_path() {
        let error = StripError::Decode {
            path: PathBuf::from("/photos/broken.jpg"),
            reason: "invalid JPEG".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("/photos/broken.jpg"));
        assert!(message.contains("invalid JPEG"));
    }

    #[test]
    fn missing_output_directory_names_the_folder() {
        let error = ConfigError::OutputDirectoryMissing {
            path: PathBuf::from("/exports/clean"),
        };
        assert!(error.to_string().contains("/exports/clean"));
    }

    #[test]
    fn overwrite_error_suggests_recovery() {
        let error = StripError::WouldOverwriteSource {
            path: PathBuf::from("/photos/a.jpg"),
        };
        assert!(error.to_string().contains("different output folder"));
    }

    #[test]
    fn config_error_converts_to_top_level() {
        let error: ExifRemoverError = ConfigError::NoFilesSelected.into();
        assert!(matches!(
            error,
            ExifRemoverError::Config(ConfigError::NoFilesSelected)
        ));
    }
}
