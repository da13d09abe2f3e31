//! Event type definitions for progress reporting.

use crate::core::batch::JobResult;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// All events emitted by the EXIF remover
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Batch processing events
    Batch(BatchEvent),
}

/// Events during a batch run
///
/// `Completed` is always the last event of a run. A cancelled run sends
/// `Cancelled` right before it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BatchEvent {
    /// The run has started
    Started {
        job_id: Uuid,
        total_files: usize,
        output_dir: PathBuf,
    },
    /// A file was attempted (success or failure)
    Progress(BatchProgress),
    /// A file was stripped and written
    FileStripped { path: PathBuf, output: PathBuf },
    /// A file could not be stripped; the run continues
    FileFailed { path: PathBuf, message: String },
    /// The run stopped early on request
    Cancelled { job_id: Uuid },
    /// Final counts for the run
    Completed { result: JobResult },
}

/// Progress information during a batch run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchProgress {
    /// Run the progress belongs to
    pub job_id: Uuid,
    /// Files attempted so far
    pub attempted: usize,
    /// Files in the job
    pub total: usize,
    /// Rounded percentage, 0-100, never decreasing within a run
    pub percent: u8,
    /// File that was just attempted
    pub current_path: PathBuf,
}
