//! Batch job definition and results.

use super::rename::random_file_name;
use crate::error::{ConfigError, StripError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// One run's worth of work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchJob {
    /// Files to strip, in processing order. Duplicates are allowed.
    pub files: Vec<PathBuf>,
    /// Folder the rebuilt images are written to
    pub output_dir: PathBuf,
    /// Give every output file a random name instead of its original one
    pub rename: bool,
}

impl BatchJob {
    /// Create a new job builder
    pub fn builder() -> BatchJobBuilder {
        BatchJobBuilder::new()
    }

    /// Number of files in the job
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the job has no files
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Check that the job can run.
    ///
    /// The output folder must already exist; it is never created.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.files.is_empty() {
            return Err(ConfigError::NoFilesSelected);
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::NoOutputDirectory);
        }
        if !self.output_dir.exists() {
            return Err(ConfigError::OutputDirectoryMissing {
                path: self.output_dir.clone(),
            });
        }
        if !self.output_dir.is_dir() {
            return Err(ConfigError::OutputNotADirectory {
                path: self.output_dir.clone(),
            });
        }
        Ok(())
    }

    /// Destination for `source`: the output folder joined with either the
    /// original file name or a random one with the same extension.
    pub fn output_path_for<R: Rng + ?Sized>(
        &self,
        source: &Path,
        rng: &mut R,
    ) -> Result<PathBuf, StripError> {
        let original = source
            .file_name()
            .ok_or_else(|| StripError::InvalidSourcePath {
                path: source.to_path_buf(),
            })?;

        let name = if self.rename {
            random_file_name(source, rng)
        } else {
            original.to_os_string()
        };

        Ok(self.output_dir.join(name))
    }
}

/// Builder for batch jobs
#[derive(Debug, Default)]
pub struct BatchJobBuilder {
    files: Vec<PathBuf>,
    output_dir: Option<PathBuf>,
    rename: bool,
}

impl BatchJobBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append files to process
    pub fn files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files.extend(files.into_iter().map(Into::into));
        self
    }

    /// Set the output folder
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Enable or disable random output names
    pub fn rename(mut self, rename: bool) -> Self {
        self.rename = rename;
        self
    }

    /// Build and validate the job
    pub fn build(self) -> Result<BatchJob, ConfigError> {
        if self.files.is_empty() {
            return Err(ConfigError::NoFilesSelected);
        }
        let output_dir = self.output_dir.ok_or(ConfigError::NoOutputDirectory)?;

        let job = BatchJob {
            files: self.files,
            output_dir,
            rename: self.rename,
        };
        job.validate()?;
        Ok(job)
    }
}

/// Outcome of one run, complete or cancelled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobResult {
    /// Identifier of the run
    pub job_id: Uuid,
    /// Folder the rebuilt images were written to
    pub output_dir: PathBuf,
    /// Number of files stripped successfully
    pub success_count: usize,
    /// Inputs that could not be stripped, in processing order
    pub failed_paths: Vec<PathBuf>,
    /// Number of files the job contained
    pub total_files: usize,
    /// Whether the run stopped early on request
    pub cancelled: bool,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl JobResult {
    /// Number of failed files
    pub fn failed_count(&self) -> usize {
        self.failed_paths.len()
    }

    /// Number of files attempted (succeeded + failed)
    pub fn attempted(&self) -> usize {
        self.success_count + self.failed_paths.len()
    }

    /// Files never attempted because the run was cancelled
    pub fn skipped(&self) -> usize {
        self.total_files.saturating_sub(self.attempted())
    }
}

/// Percentage of `total` covered by `attempted`, rounded half up
pub fn progress_percent(attempted: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let attempted = attempted.min(total);
    ((attempted * 100 + total / 2) / total) as u8
}
