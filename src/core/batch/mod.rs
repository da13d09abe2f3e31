//! # Batch Module
//!
//! Strips a list of files one after another on a background thread.
//!
//! ## Run Lifecycle
//! `Idle -> Running -> {Completed, Cancelled}`
//!
//! 1. The caller validates a [`BatchJob`] and starts it
//! 2. The worker strips each file in order, never in parallel
//! 3. After every file (success or failure) a progress percentage is sent
//! 4. A [`JobResult`] is delivered exactly once, also for cancelled runs
//!
//! ## Cancellation
//! Cooperative: the worker checks a shared flag before each file, so a
//! request takes effect at the next file boundary. Files never attempted are
//! not counted as failed.
//!
//! ## Example
//! ```rust,ignore
//! let processor = BatchProcessor::default();
//! let job = BatchJob::builder()
//!     .files(selection.files().to_vec())
//!     .output_dir("/exports/clean")
//!     .rename(true)
//!     .build()?;
//!
//! let handle = processor.run(job, |percent| bar.set(percent), |result| {
//!     println!("{} stripped, {} failed", result.success_count, result.failed_count());
//! })?;
//! ```

mod cancel;
mod job;
mod observer;
mod processor;
pub mod rename;

pub use cancel::CancellationToken;
pub use job::{progress_percent, BatchJob, BatchJobBuilder, JobResult};
pub use observer::{BatchObserver, Callbacks};
pub use processor::{BatchHandle, BatchProcessor, BatchState};
